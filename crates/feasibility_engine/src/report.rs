use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use models::{FeasibilityAnalysis, FeasibilityReport, PropertyInput, ReportMetadata, Settings};

use crate::pipeline::analyze;

/// Wraps an analysis with the metadata written alongside it.
pub fn build_report(
    input: &PropertyInput,
    settings: &Settings,
    analysis: FeasibilityAnalysis,
) -> FeasibilityReport {
    FeasibilityReport {
        metadata: ReportMetadata {
            generated_at: Utc::now(),
            settings_version: settings.settings_version,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        },
        address: input.address.clone(),
        zoning_code: input.parcel.zoning_code.clone(),
        analysis,
    }
}

/// Runs the analysis and stamps the report. `raw` skips the rounding pass.
pub fn generate_report(
    input: &PropertyInput,
    settings: &Settings,
    raw: bool,
) -> Result<FeasibilityReport> {
    let analysis = analyze(input, settings).context("feasibility analysis")?;
    let report = build_report(input, settings, analysis);
    Ok(if raw { report } else { report.rounded() })
}

/// Writes the report as JSON, creating the parent directory if needed.
pub fn write_report_json(report: &FeasibilityReport, out_path: &Path, pretty: bool) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Creating output directory {}", parent.display()))?;
        }
    }
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    fs::write(out_path, json).with_context(|| format!("Writing report to {}", out_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{ParcelSpec, UnitSpec, UnitType};

    fn input() -> PropertyInput {
        PropertyInput {
            parcel: ParcelSpec {
                lot_size_sqft: 5_000.0,
                max_far: 2.0,
                zoning_code: Some("C-2".to_string()),
                ..ParcelSpec::default()
            },
            units: vec![UnitSpec {
                unit_type: UnitType::OneBedroom,
                size_sqft: 650.0,
                quantity: 10,
                monthly_rent: 2_000.0,
            }],
            ..PropertyInput::default()
        }
    }

    #[test]
    fn test_report_carries_input_identity() {
        let input = input();
        let settings = Settings::default();
        let report = generate_report(&input, &settings, false).unwrap();

        assert_eq!(report.zoning_code.as_deref(), Some("C-2"));
        assert_eq!(report.metadata.settings_version, 1);
        assert_eq!(report.metadata.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(report.analysis.unit_mix.total_units, 10);
    }

    #[test]
    fn test_rounding_is_optional() {
        let input = input();
        let settings = Settings::default();
        let raw = generate_report(&input, &settings, true).unwrap();
        let rounded = generate_report(&input, &settings, false).unwrap();

        let irr = rounded.analysis.metrics.irr_pct;
        assert_eq!(irr, (irr * 10000.0).round() / 10000.0);
        assert!((raw.analysis.metrics.irr_pct - irr).abs() < 1e-4);
    }

    #[test]
    fn test_write_report_creates_parent_dir() {
        let dir = std::env::temp_dir().join(format!("feasibility_report_{}", std::process::id()));
        let out = dir.join("nested").join("feasibility.json");
        let report = generate_report(&input(), &Settings::default(), false).unwrap();

        write_report_json(&report, &out, true).unwrap();
        let raw = fs::read_to_string(&out).unwrap();
        let back: FeasibilityReport = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.zoning_code, report.zoning_code);
        let cost = back.analysis.key_figures.total_project_cost;
        assert!((cost - report.analysis.key_figures.total_project_cost).abs() < 1e-6);
        assert!(raw.contains("\"far_increase_pct\": \"vacant_land\""));

        fs::remove_dir_all(&dir).unwrap();
    }
}
