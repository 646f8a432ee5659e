//! Core business logic abstractions

pub mod cache;
pub mod config;
pub mod conversion;
pub mod currency;
pub mod error;
pub mod format;
pub mod log;
pub mod state;

// Re-export main types for cleaner imports
pub use conversion::{Conversion, compute_conversions};
pub use currency::{RateSnapshot, RateSource};
pub use error::FxError;
pub use state::{DisplayState, PIN_CAPACITY, PinnedEntry};
