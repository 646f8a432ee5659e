//! Session state for the conversion view.
//!
//! `DisplayState` is owned by a single session and only changes through the
//! methods below. Rates never live here: each render combines the state with
//! whatever `RateSnapshot` is current.
use crate::core::error::{FxError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum number of pinned conversions.
pub const PIN_CAPACITY: usize = 3;

/// A conversion frozen at the moment it was pinned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinnedEntry {
    pub base: String,
    pub base_amount: f64,
    pub target: String,
    pub target_amount: f64,
    pub cross_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    base_currency: String,
    base_amount: f64,
    target_order: Vec<String>,
    pinned: Vec<PinnedEntry>,
    supported: Vec<String>,
}

impl DisplayState {
    /// Creates a state holding `base_amount` of `base_currency`, listing every
    /// other supported currency in canonical order.
    pub fn new(supported: Vec<String>, base_currency: &str, base_amount: f64) -> Result<Self> {
        let mut state = Self {
            base_currency: String::new(),
            base_amount: 0.0,
            target_order: Vec::new(),
            pinned: Vec::new(),
            supported,
        };
        state.set_base_amount(base_amount)?;
        state.set_base_currency(base_currency);
        Ok(state)
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    pub fn base_amount(&self) -> f64 {
        self.base_amount
    }

    pub fn target_order(&self) -> &[String] {
        &self.target_order
    }

    pub fn pinned(&self) -> &[PinnedEntry] {
        &self.pinned
    }

    pub fn supported(&self) -> &[String] {
        &self.supported
    }

    /// Makes `new_base` the held currency and resets the target list to the
    /// canonical order, discarding any ordering left by swaps.
    pub fn set_base_currency(&mut self, new_base: &str) {
        self.base_currency = new_base.to_string();
        self.target_order = self
            .supported
            .iter()
            .filter(|code| *code != new_base)
            .cloned()
            .collect();
        debug!(base = %self.base_currency, targets = ?self.target_order, "Base currency set");
    }

    /// Makes `target` the held currency. The old base takes the slot `target`
    /// occupied, so the other rows keep their positions.
    pub fn swap_with_target(&mut self, target: &str) {
        let old_base = std::mem::replace(&mut self.base_currency, target.to_string());
        match self.target_order.iter().position(|code| code == target) {
            Some(idx) => self.target_order[idx] = old_base,
            None => debug!(code = target, "Swap target not listed, only the base changes"),
        }
        debug!(base = %self.base_currency, targets = ?self.target_order, "Swapped base currency");
    }

    pub fn set_base_amount(&mut self, amount: f64) -> Result<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(FxError::InvalidAmount(amount));
        }
        self.base_amount = amount;
        Ok(())
    }

    /// Records the conversion of the current amount into `target` at
    /// `cross_rate`.
    pub fn pin(&mut self, target: &str, cross_rate: f64) -> Result<&PinnedEntry> {
        if self.pinned.len() >= PIN_CAPACITY {
            return Err(FxError::CapacityExceeded {
                capacity: PIN_CAPACITY,
            });
        }
        if !cross_rate.is_finite() || cross_rate <= 0.0 {
            return Err(FxError::InvalidRate(cross_rate));
        }

        self.pinned.push(PinnedEntry {
            base: self.base_currency.clone(),
            base_amount: self.base_amount,
            target: target.to_string(),
            target_amount: self.base_amount * cross_rate,
            cross_rate,
        });
        let entry = &self.pinned[self.pinned.len() - 1];
        debug!(?entry, "Pinned conversion");
        Ok(entry)
    }

    /// Removes the pinned entry at `index`. Returns `None` when the index is
    /// out of range.
    pub fn unpin(&mut self, index: usize) -> Option<PinnedEntry> {
        if index < self.pinned.len() {
            Some(self.pinned.remove(index))
        } else {
            debug!(index, len = self.pinned.len(), "Ignoring unpin of missing entry");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::DEFAULT_CURRENCIES;

    fn supported() -> Vec<String> {
        DEFAULT_CURRENCIES.iter().map(|c| c.to_string()).collect()
    }

    fn canonical_without(code: &str) -> Vec<String> {
        supported().into_iter().filter(|c| c != code).collect()
    }

    fn state() -> DisplayState {
        DisplayState::new(supported(), "TWD", 1000.0).unwrap()
    }

    #[test]
    fn test_new_lists_everything_but_base() {
        let state = state();
        assert_eq!(state.base_currency(), "TWD");
        assert_eq!(state.base_amount(), 1000.0);
        assert_eq!(state.target_order(), canonical_without("TWD").as_slice());
        assert!(state.pinned().is_empty());
    }

    #[test]
    fn test_new_rejects_negative_amount() {
        let result = DisplayState::new(supported(), "TWD", -1.0);
        assert_eq!(result.unwrap_err(), FxError::InvalidAmount(-1.0));
    }

    #[test]
    fn test_set_base_currency_resets_order() {
        let mut state = state();
        state.swap_with_target("JPY");
        state.swap_with_target("USD");
        assert_ne!(state.target_order(), canonical_without("USD").as_slice());

        for code in DEFAULT_CURRENCIES {
            state.set_base_currency(code);
            assert_eq!(state.base_currency(), code);
            assert!(!state.target_order().iter().any(|c| c == code));
            assert_eq!(state.target_order(), canonical_without(code).as_slice());
        }
    }

    #[test]
    fn test_set_base_currency_is_idempotent() {
        let mut state = state();
        state.set_base_currency("EUR");
        let before = state.clone();
        state.set_base_currency("EUR");
        assert_eq!(state, before);
    }

    #[test]
    fn test_swap_keeps_position() {
        let mut state = state();
        for target in canonical_without("TWD") {
            let old_base = state.base_currency().to_string();
            let idx = state
                .target_order()
                .iter()
                .position(|c| *c == target)
                .unwrap();
            state.swap_with_target(&target);
            assert_eq!(state.target_order()[idx], old_base);
            assert_eq!(state.base_currency(), target);
            assert!(!state.target_order().contains(&target));
        }
    }

    #[test]
    fn test_swap_two_targets() {
        let mut state = DisplayState::new(
            vec!["TWD".into(), "USD".into(), "JPY".into()],
            "TWD",
            1000.0,
        )
        .unwrap();
        assert_eq!(state.target_order(), ["USD", "JPY"]);

        state.swap_with_target("JPY");
        assert_eq!(state.target_order(), ["USD", "TWD"]);
        assert_eq!(state.base_currency(), "JPY");
        assert_eq!(state.base_amount(), 1000.0);
    }

    #[test]
    fn test_swap_with_absent_target_only_changes_base() {
        let mut state = state();
        let order = state.target_order().to_vec();
        state.swap_with_target("CHF");
        assert_eq!(state.base_currency(), "CHF");
        assert_eq!(state.target_order(), order.as_slice());
    }

    #[test]
    fn test_pin_capacity() {
        let mut state = state();
        for target in ["USD", "JPY", "EUR"] {
            assert!(state.pin(target, 0.5).is_ok());
        }
        let before = state.pinned().to_vec();

        let result = state.pin("GBP", 0.02);
        assert_eq!(
            result.unwrap_err(),
            FxError::CapacityExceeded {
                capacity: PIN_CAPACITY
            }
        );
        assert_eq!(state.pinned(), before.as_slice());
    }

    #[test]
    fn test_pin_rejects_bad_rate() {
        let mut state = state();
        assert_eq!(state.pin("USD", 0.0).unwrap_err(), FxError::InvalidRate(0.0));
        assert!(state.pin("USD", f64::INFINITY).is_err());
        assert!(state.pinned().is_empty());
    }

    #[test]
    fn test_pin_stores_exact_product() {
        let mut state = state();
        state.set_base_amount(1234.56).unwrap();
        let entry = state.pin("USD", 0.0311).unwrap().clone();
        assert_eq!(entry.target_amount, 1234.56 * 0.0311);
        assert_eq!(entry.base, "TWD");
        assert_eq!(entry.base_amount, 1234.56);
        assert_eq!(entry.cross_rate, 0.0311);
    }

    #[test]
    fn test_pinned_entry_survives_base_change() {
        let mut state = state();
        state.pin("USD", 0.031).unwrap();
        state.set_base_currency("USD");
        state.set_base_amount(5.0).unwrap();

        let entry = &state.pinned()[0];
        assert_eq!(entry.base, "TWD");
        assert_eq!(entry.base_amount, 1000.0);
        assert_eq!(entry.target, "USD");
        assert_eq!(entry.target_amount, 31.0);
        assert_eq!(state.target_order(), canonical_without("USD").as_slice());
    }

    #[test]
    fn test_pin_does_not_touch_order() {
        let mut state = state();
        let order = state.target_order().to_vec();
        state.pin("JPY", 4.5).unwrap();
        assert_eq!(state.target_order(), order.as_slice());
        assert_eq!(state.base_currency(), "TWD");
    }

    #[test]
    fn test_unpin() {
        let mut state = state();
        for target in ["USD", "JPY", "EUR"] {
            state.pin(target, 1.0).unwrap();
        }

        let removed = state.unpin(1).unwrap();
        assert_eq!(removed.target, "JPY");
        let targets: Vec<_> = state.pinned().iter().map(|p| p.target.as_str()).collect();
        assert_eq!(targets, ["USD", "EUR"]);

        assert!(state.unpin(2).is_none());
        assert!(state.unpin(usize::MAX).is_none());
        assert_eq!(state.pinned().len(), 2);
    }

    #[test]
    fn test_set_base_amount() {
        let mut state = state();
        assert!(state.set_base_amount(0.0).is_ok());
        assert_eq!(state.set_base_amount(-3.0).unwrap_err(), FxError::InvalidAmount(-3.0));
        assert!(state.set_base_amount(f64::NAN).is_err());
        assert_eq!(state.base_amount(), 0.0);
    }
}
