use anyhow::{Context, Result};
use clap::Parser;
use models::{
    Address, CommonAreas, ExpenseAssumptions, ParcelSpec, PropertyInput, UnitSpec, UnitType,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "input-template",
    about = "Write a property input document filled with default assumptions."
)]
struct Args {
    /// Output path
    #[arg(short, long, default_value = "property.template.json")]
    out: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

fn unit(unit_type: UnitType, size_sqft: f64, quantity: u32, monthly_rent: f64) -> UnitSpec {
    UnitSpec {
        unit_type,
        size_sqft,
        quantity,
        monthly_rent,
    }
}

fn template() -> PropertyInput {
    PropertyInput {
        address: Address {
            street: "123 Example Ave".to_string(),
            city: "Springfield".to_string(),
            state: "CA".to_string(),
            zip: "90000".to_string(),
        },
        parcel: ParcelSpec {
            lot_size_sqft: 10_000.0,
            max_far: 3.0,
            zoning_code: Some("R-4".to_string()),
            ..ParcelSpec::default()
        },
        units: vec![
            unit(UnitType::Studio, 450.0, 6, 1_500.0),
            unit(UnitType::OneBedroom, 650.0, 12, 2_000.0),
            unit(UnitType::TwoBedroom, 900.0, 8, 2_600.0),
            unit(UnitType::Retail, 1_500.0, 1, 4_500.0),
        ],
        common_areas: CommonAreas {
            lobby_sqft: 500.0,
            amenity_sqft: 700.0,
            circulation_sqft: 2_000.0,
        },
        expenses: ExpenseAssumptions {
            taxes: 40_000.0,
            insurance: 10_000.0,
            utilities: 15_000.0,
            repairs: 12_000.0,
            other_expenses: 3_000.0,
            ..ExpenseAssumptions::default()
        },
        ..PropertyInput::default()
    }
}

/// An existing file is only replaced with `--force`.
fn ensure_writable(out: &Path, force: bool) -> Result<()> {
    if out.exists() && !force {
        anyhow::bail!("{} already exists; pass --force to overwrite", out.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(logger::DEFAULT_FILTER)?;

    ensure_writable(&args.out, args.force)?;

    let doc = template();
    let json = serde_json::to_string_pretty(&doc)?;
    fs::write(&args.out, json).with_context(|| format!("writing {}", args.out.display()))?;
    info!(units = doc.units.len(), "Template written");
    println!("Generated input template: {}", args.out.display());
    Ok(())
}
