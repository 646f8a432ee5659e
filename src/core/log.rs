//! Tracing setup for the binary. Events go to stderr so they never
//! interleave with the view drawn on stdout.
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, filter::Targets, fmt, prelude::*};

const APP_TARGET: &str = env!("CARGO_CRATE_NAME");

fn app_targets(verbose: bool) -> Targets {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };
    Targets::new().with_target(APP_TARGET, level)
}

/// Installs the global subscriber. Only this crate's events are printed,
/// at debug level when `verbose` is set. `RUST_LOG` filters them further.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "off" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let stderr_layer = fmt::layer()
        .pretty()
        .without_time()
        .with_writer(std::io::stderr)
        .with_filter(app_targets(verbose));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_app_targets() {
        let quiet = app_targets(false);
        assert!(!quiet.would_enable(APP_TARGET, &Level::ERROR));

        let verbose = app_targets(true);
        assert!(verbose.would_enable(APP_TARGET, &Level::DEBUG));
        assert!(verbose.would_enable("fxboard::cli::session", &Level::INFO));
        assert!(!verbose.would_enable(APP_TARGET, &Level::TRACE));
        assert!(!verbose.would_enable("reqwest", &Level::DEBUG));
    }
}
