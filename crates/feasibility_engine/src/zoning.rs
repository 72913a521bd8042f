use models::{CurrentUse, Metric, ParcelSpec, UndefinedReason, UseRecommendation, ZoningCapacity};
use tracing::debug;

use crate::error::{ensure_non_negative, ensure_positive, Result};

/// Typical built FAR for each existing use, used as the baseline for the increase.
pub fn current_far(current_use: CurrentUse) -> f64 {
    match current_use {
        CurrentUse::Vacant => 0.0,
        CurrentUse::SingleFamily => 0.3,
        CurrentUse::MultiFamily => 1.0,
        CurrentUse::Retail => 0.5,
        CurrentUse::Office => 1.2,
        CurrentUse::Industrial => 0.7,
        CurrentUse::MixedUse => 1.5,
        CurrentUse::Unknown => 0.0,
    }
}

/// "R..." codes suggest residential, "C..." commercial, anything else mixed use.
pub fn recommend_use(zoning_code: Option<&str>) -> UseRecommendation {
    match zoning_code.map(str::trim) {
        Some(code) if code.starts_with('R') => UseRecommendation::Residential,
        Some(code) if code.starts_with('C') => UseRecommendation::Commercial,
        _ => UseRecommendation::Mixed,
    }
}

fn validate(parcel: &ParcelSpec) -> Result<()> {
    ensure_positive("parcel.lot_size_sqft", parcel.lot_size_sqft)?;
    ensure_positive("parcel.max_far", parcel.max_far)?;
    ensure_non_negative("parcel.max_height_ft", parcel.max_height_ft)?;
    ensure_non_negative("parcel.setbacks.front_ft", parcel.setbacks.front_ft)?;
    ensure_non_negative("parcel.setbacks.rear_ft", parcel.setbacks.rear_ft)?;
    ensure_non_negative("parcel.setbacks.left_ft", parcel.setbacks.left_ft)?;
    ensure_non_negative("parcel.setbacks.right_ft", parcel.setbacks.right_ft)?;
    ensure_non_negative("parcel.min_parking_ratio", parcel.min_parking_ratio)?;
    Ok(())
}

/// Maximum buildable area and the existing-use baseline for a parcel.
pub fn calculate(parcel: &ParcelSpec) -> Result<ZoningCapacity> {
    validate(parcel)?;

    let max_buildable_area_sqft = parcel.lot_size_sqft * parcel.max_far;
    let current_far = current_far(parcel.current_use);
    let current_buildable_area_sqft = parcel.lot_size_sqft * current_far;

    let far_increase_pct = if current_buildable_area_sqft > 0.0 {
        Metric::Value(
            (max_buildable_area_sqft - current_buildable_area_sqft) / current_buildable_area_sqft
                * 100.0,
        )
    } else {
        Metric::Undefined(UndefinedReason::VacantLand)
    };

    let capacity = ZoningCapacity {
        lot_size_sqft: parcel.lot_size_sqft,
        max_far: parcel.max_far,
        max_buildable_area_sqft,
        current_use: parcel.current_use,
        current_far,
        current_buildable_area_sqft,
        far_increase_pct,
        recommended_use: recommend_use(parcel.zoning_code.as_deref()),
    };
    debug!(
        max_buildable = capacity.max_buildable_area_sqft,
        current_far = capacity.current_far,
        far_increase = %capacity.far_increase_pct,
        "Zoning capacity calculated"
    );
    Ok(capacity)
}
