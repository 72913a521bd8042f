//! # Models
//!
//! Shared data model for the development feasibility workspace.
//!
//! - [`inputs`]: the property input document, with every documented default
//! - [`settings`]: the optional `settings.json` (debt terms, IRR search bounds)
//! - [`outputs`]: derived statements produced by the engine and the written report
//! - [`metric`]: numeric results that may be undefined ("N/A")

pub mod inputs;
pub mod metric;
pub mod outputs;
pub mod settings;

pub use inputs::*;
pub use metric::{Metric, UndefinedReason};
pub use outputs::*;
pub use settings::*;

/// Rounds a currency amount to cents.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Rounds a percentage or ratio to four decimals.
pub fn round4(v: f64) -> f64 {
    (v * 10000.0).round() / 10000.0
}
