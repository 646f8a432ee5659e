pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::providers::{CachingRateSource, ErApiProvider};
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        base: Option<String>,
        amount: Option<f64>,
    },
    Session,
}

/// Builds the rate source described by `config`: the open.er-api.com
/// provider behind a cache that lives for one refresh interval.
pub fn rate_source(config: &AppConfig) -> Result<CachingRateSource<ErApiProvider>> {
    let er_api = &config.providers.er_api;
    let provider = ErApiProvider::new(&er_api.base_url, &er_api.reference, er_api.timeout())?;
    Ok(CachingRateSource::new(provider, config.refresh_interval()))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxboard starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let source = rate_source(&config)?;

    match command {
        AppCommand::Convert { base, amount } => {
            cli::convert::run(&config, &source, base.as_deref(), amount).await
        }
        AppCommand::Session => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            cli::session::run(&config, &source, stdin, &mut std::io::stdout()).await
        }
    }
}
