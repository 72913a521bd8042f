use anyhow::{Context, Result};
use clap::Parser;
use feasibility_engine::{generate_report, write_report_json};
use models::FeasibilityReport;
use std::path::PathBuf;
use tracing::info;

/// Runs the full feasibility analysis on a property input and writes the report.
#[derive(Parser, Debug)]
#[command(
    name = "analyze-feasibility",
    version,
    about = "Zoning, income, cost and return analysis for a development site."
)]
struct Args {
    /// Property input JSON
    #[arg(short, long, default_value = "property.json")]
    input: PathBuf,

    /// Optional settings.json; ./settings.json is used when present
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Report output path
    #[arg(short, long, default_value = "report/feasibility.json")]
    out: PathBuf,

    /// Pretty-print the report JSON
    #[arg(long)]
    pretty: bool,

    /// Write unrounded figures
    #[arg(long)]
    raw: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Warnings and errors only
    #[arg(short, long)]
    quiet: bool,
}

fn summary(report: &FeasibilityReport) -> String {
    let k = &report.analysis.key_figures;
    let m = &report.analysis.metrics;
    let mut lines = vec![
        format!("  actual FAR        : {:.2}", k.actual_far),
        format!("  NOI               : {:.2}", k.net_operating_income),
        format!("  cap rate (%)      : {}", k.cap_rate_pct),
        format!("  total project cost: {:.2}", k.total_project_cost),
        format!("  IRR (%)           : {:.2}", k.irr_pct),
        format!("  NPV               : {:.2}", m.npv),
        format!("  DSCR              : {}", m.dscr),
    ];
    for w in &report.analysis.warnings {
        lines.push(format!("  warning: {w}"));
    }
    lines.join("\n")
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(logger::filter_for(args.verbose, args.quiet))?;

    println!(
        "Analyzing feasibility...\n  input   : {}\n  settings: {}\n  output  : {}",
        args.input.display(),
        args.settings
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(default)".to_string()),
        args.out.display()
    );

    let input = settings_loader::load_input(&args.input)?;
    let settings = settings_loader::resolve_settings(args.settings.as_ref())?;
    info!(
        units = input.units.len(),
        settings_version = settings.settings_version,
        "Inputs resolved"
    );

    let report = generate_report(&input, &settings, args.raw)
        .with_context(|| format!("analyzing {}", args.input.display()))?;
    write_report_json(&report, &args.out, args.pretty).context("write feasibility report")?;

    println!("{}", summary(&report));
    println!("Done. Generated at {}", report.metadata.generated_at.to_rfc3339());
    Ok(())
}
