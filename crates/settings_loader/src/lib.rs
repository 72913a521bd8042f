//! # Settings Loader
//!
//! Reads the two JSON documents the feasibility tools consume:
//!
//! - the property input (parcel, unit mix, income, expense, development and
//!   pro-forma assumptions), see [`load_input`]
//! - the optional `settings.json` (debt terms and IRR search bounds), see
//!   [`load_settings`] and [`resolve_settings`]
//!
//! Missing fields take their documented defaults; malformed JSON is an error
//! carrying the offending path.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! let input = settings_loader::load_input("property.json")?;
//!
//! // Explicit path must exist; otherwise ./settings.json, otherwise defaults
//! let path = Some(PathBuf::from("config/settings.json"));
//! let settings = settings_loader::resolve_settings(path.as_ref())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use models::{PropertyInput, Settings};
use tracing::debug;

pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// Loads a property input document.
pub fn load_input<P: AsRef<Path>>(path: P) -> Result<PropertyInput> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading input file: {}", path.display()))?;
    let input: PropertyInput = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing input JSON in {}", path.display()))?;
    debug!(path = %path.display(), units = input.units.len(), "Input loaded");
    Ok(input)
}

/// Loads settings from a JSON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    debug!(path = %path.display(), version = settings.settings_version, "Settings loaded");
    Ok(settings)
}

/// Loads `settings.json` from the current directory
pub fn load_default_settings() -> Result<Settings> {
    load_settings(DEFAULT_SETTINGS_PATH)
}

/// Loads settings from an optional path, returning None if no path is provided
pub fn load_optional_settings(path: Option<&PathBuf>) -> Result<Option<Settings>> {
    match path {
        Some(settings_path) => Ok(Some(load_settings(settings_path)?)),
        None => Ok(None),
    }
}

/// Settings the tools actually run with.
///
/// An explicit path must load. Without one, `./settings.json` is used when it
/// exists and built-in defaults otherwise.
pub fn resolve_settings(path: Option<&PathBuf>) -> Result<Settings> {
    if let Some(settings) = load_optional_settings(path)? {
        return Ok(settings);
    }
    if default_settings_exist() {
        return load_default_settings();
    }
    debug!("No settings file, using built-in defaults");
    Ok(Settings::default())
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file()
}

/// Checks if the default settings file exists
pub fn default_settings_exist() -> bool {
    settings_file_exists(DEFAULT_SETTINGS_PATH)
}
