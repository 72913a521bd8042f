//! Tracing setup shared by the command-line tools.
//!
//! `RUST_LOG` wins when set; otherwise the tool's default filter applies.
//! Output goes to stderr so stdout stays free for summaries.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str =
    "feasibility_engine=info,settings_loader=info,analyze_feasibility=info,input_template=info";

/// Filter from `RUST_LOG`, or `default_filter` when unset or invalid.
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into())
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init(default_filter: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Initializing logger: {e}"))
}

/// `-v` raises everything to debug, `-q` keeps warnings and errors only.
pub fn filter_for(verbose: bool, quiet: bool) -> &'static str {
    match (verbose, quiet) {
        (true, _) => "debug",
        (false, true) => "warn",
        (false, false) => DEFAULT_FILTER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_for_flags() {
        assert_eq!(filter_for(true, true), "debug");
        assert_eq!(filter_for(false, true), "warn");
        assert_eq!(filter_for(false, false), DEFAULT_FILTER);
    }

    #[test]
    fn test_second_init_fails() {
        let _ = init("warn");
        assert!(init("warn").is_err());
    }
}
