//! Exchange-rate abstractions

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Currencies listed by default, in display order.
pub const DEFAULT_CURRENCIES: [&str; 10] = [
    "TWD", "USD", "VND", "JPY", "EUR", "CNY", "KRW", "HKD", "AUD", "GBP",
];

/// Rates for every known currency against one reference currency, as
/// returned by a single fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    reference: String,
    rates: HashMap<String, f64>,
    fetched_at: DateTime<Utc>,
}

impl RateSnapshot {
    /// Builds a snapshot. The reference currency is always quoted at 1.0.
    pub fn new(reference: &str, mut rates: HashMap<String, f64>, fetched_at: DateTime<Utc>) -> Self {
        let reference = reference.to_uppercase();
        rates.entry(reference.clone()).or_insert(1.0);
        Self {
            reference,
            rates,
            fetched_at,
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Rate of `code` against the reference currency, if it is usable for
    /// conversion.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates
            .get(code)
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
    }

    pub fn is_convertible(&self, code: &str) -> bool {
        self.rate(code).is_some()
    }

    /// Rate that converts one unit of `from` into `to`.
    pub fn cross_rate(&self, from: &str, to: &str) -> Option<f64> {
        Some(self.rate(to)? / self.rate(from)?)
    }
}

/// A source of exchange-rate snapshots.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch(&self) -> Result<RateSnapshot>;

    /// Forgets any cached snapshot so the next `fetch` reaches the origin.
    async fn invalidate(&self) {}
}
