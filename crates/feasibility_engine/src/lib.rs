pub mod cash_flow;
pub mod development;
pub mod error;
pub mod expenses;
pub mod income;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod unit_mix;
pub mod zoning;

pub use error::{FeasibilityError, Result};
pub use pipeline::analyze;
pub use report::{build_report, generate_report, write_report_json};
