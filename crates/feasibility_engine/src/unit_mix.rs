use models::{CommonAreas, Metric, UndefinedReason, UnitMixSummary, UnitSpec, ZoningCapacity};
use tracing::debug;

use crate::error::{ensure_finite, ensure_non_negative, Result};

/// Drops lines with no size or no quantity; they carry no area and no rent.
///
/// Rents must be non-negative and sizes finite, otherwise the whole mix is rejected.
pub fn retain_buildable(units: &[UnitSpec]) -> Result<Vec<UnitSpec>> {
    let mut retained = Vec::with_capacity(units.len());
    for (idx, unit) in units.iter().enumerate() {
        ensure_finite(&format!("units[{idx}].size_sqft"), unit.size_sqft)?;
        ensure_non_negative(&format!("units[{idx}].monthly_rent"), unit.monthly_rent)?;
        if unit.size_sqft > 0.0 && unit.quantity > 0 {
            retained.push(*unit);
        }
    }
    Ok(retained)
}

fn validate_common_areas(common: &CommonAreas) -> Result<()> {
    ensure_non_negative("common_areas.lobby_sqft", common.lobby_sqft)?;
    ensure_non_negative("common_areas.amenity_sqft", common.amenity_sqft)?;
    ensure_non_negative("common_areas.circulation_sqft", common.circulation_sqft)?;
    Ok(())
}

/// Building area over maximum buildable area, in percent. Undefined for an
/// empty building as well as for a zero capacity.
pub fn far_utilization(total_building_area_sqft: f64, max_buildable_area_sqft: f64) -> Metric {
    if total_building_area_sqft <= 0.0 {
        Metric::Undefined(UndefinedReason::NoBuildingArea)
    } else {
        Metric::percent(total_building_area_sqft, max_buildable_area_sqft)
    }
}

/// Totals the unit mix and common areas, and measures them against zoning capacity.
pub fn aggregate(
    units: &[UnitSpec],
    common: &CommonAreas,
    capacity: &ZoningCapacity,
) -> Result<UnitMixSummary> {
    validate_common_areas(common)?;
    let units = retain_buildable(units)?;

    let mut total_units: u64 = 0;
    let mut total_residential_area_sqft = 0.0;
    let mut total_commercial_area_sqft = 0.0;
    for unit in &units {
        total_units += u64::from(unit.quantity);
        if unit.is_commercial() {
            total_commercial_area_sqft += unit.area_sqft();
        } else {
            total_residential_area_sqft += unit.area_sqft();
        }
    }
    let total_common_area_sqft = common.total_sqft();
    let total_building_area_sqft =
        total_residential_area_sqft + total_commercial_area_sqft + total_common_area_sqft;

    let summary = UnitMixSummary {
        total_units,
        total_residential_area_sqft,
        total_commercial_area_sqft,
        total_common_area_sqft,
        total_building_area_sqft,
        far_utilization_pct: far_utilization(
            total_building_area_sqft,
            capacity.max_buildable_area_sqft,
        ),
        actual_far: total_building_area_sqft / capacity.lot_size_sqft,
    };
    debug!(
        units = summary.total_units,
        building_area = summary.total_building_area_sqft,
        far_utilization = %summary.far_utilization_pct,
        "Unit mix aggregated"
    );
    Ok(summary)
}
