use super::{ui, view};
use crate::core::config::AppConfig;
use crate::core::{DisplayState, FxError, RateSource, compute_conversions};
use anyhow::Result;
use tracing::debug;

/// Builds the starting state from config and optional overrides.
pub fn initial_state(
    config: &AppConfig,
    base: Option<&str>,
    amount: Option<f64>,
) -> Result<DisplayState> {
    let mut state =
        DisplayState::new(config.currencies.clone(), &config.base_currency, config.amount)?;
    if let Some(base) = base {
        state.set_base_currency(&base.trim().to_uppercase());
    }
    if let Some(amount) = amount {
        state.set_base_amount(amount)?;
    }
    Ok(state)
}

/// Fetches rates once and prints the conversion view.
pub async fn run(
    config: &AppConfig,
    source: &dyn RateSource,
    base: Option<&str>,
    amount: Option<f64>,
) -> Result<()> {
    let state = initial_state(config, base, amount)?;

    let pb = ui::new_spinner("Fetching exchange rates...");
    let fetched = source.fetch().await;
    pb.finish_and_clear();
    let snapshot = fetched.map_err(|e| FxError::SnapshotUnavailable(format!("{e:#}")))?;

    let conversions = compute_conversions(&state, &snapshot);
    debug!(count = conversions.len(), "Computed conversions");
    println!("{}", view::render(&state, Some(&snapshot), &conversions, None));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_overrides() {
        let config = AppConfig::default();

        let state = initial_state(&config, None, None).unwrap();
        assert_eq!(state.base_currency(), "TWD");
        assert_eq!(state.base_amount(), 1000.0);

        let state = initial_state(&config, Some(" jpy"), Some(5000.0)).unwrap();
        assert_eq!(state.base_currency(), "JPY");
        assert_eq!(state.base_amount(), 5000.0);
        assert!(!state.target_order().iter().any(|c| c == "JPY"));
        assert_eq!(state.target_order()[0], "TWD");

        assert!(initial_state(&config, None, Some(-1.0)).is_err());
    }
}
