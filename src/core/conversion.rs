//! Derives the list of converted amounts shown for a given state.
use crate::core::currency::RateSnapshot;
use crate::core::state::DisplayState;
use serde::Serialize;
use tracing::debug;

/// One row of the conversion view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub currency: String,
    pub amount: f64,
    pub cross_rate: f64,
}

/// Converts the held amount into every listed target, in list order.
///
/// Targets (or a base) the snapshot cannot price are left out.
pub fn compute_conversions(state: &DisplayState, snapshot: &RateSnapshot) -> Vec<Conversion> {
    let base = state.base_currency();
    if !snapshot.is_convertible(base) {
        debug!(base, "Base currency has no rate in snapshot");
        return Vec::new();
    }

    state
        .target_order()
        .iter()
        .filter_map(|code| {
            let Some(cross_rate) = snapshot.cross_rate(base, code) else {
                debug!(code = %code, "Skipping unconvertible currency");
                return None;
            };
            Some(Conversion {
                currency: code.clone(),
                amount: state.base_amount() * cross_rate,
                cross_rate,
            })
        })
        .collect()
}
