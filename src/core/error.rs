//! Errors raised by the display-state manager and the rate layer.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FxError {
    #[error("At most {capacity} conversions can be pinned, unpin one first")]
    CapacityExceeded { capacity: usize },

    #[error("Cross-rate must be a positive number, got {0}")]
    InvalidRate(f64),

    #[error("Amount must be a non-negative number, got {0}")]
    InvalidAmount(f64),

    #[error("Exchange rates unavailable: {0}")]
    SnapshotUnavailable(String),
}

pub type Result<T> = std::result::Result<T, FxError>;
