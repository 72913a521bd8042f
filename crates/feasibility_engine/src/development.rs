use models::{DevelopmentAssumptions, DevelopmentCostBreakdown, Metric, ProjectCost, UnitMixSummary};
use tracing::debug;

use crate::error::{ensure_non_negative, ensure_positive, Result};

fn validate(a: &DevelopmentAssumptions) -> Result<()> {
    ensure_non_negative("development.land_cost_per_sqft", a.land_cost_per_sqft)?;
    ensure_non_negative("development.residential_cost_per_sqft", a.residential_cost_per_sqft)?;
    ensure_non_negative("development.commercial_cost_per_sqft", a.commercial_cost_per_sqft)?;
    ensure_non_negative("development.common_area_cost_per_sqft", a.common_area_cost_per_sqft)?;
    ensure_non_negative("development.soft_costs_pct", a.soft_costs_pct)?;
    ensure_non_negative("development.development_fee_pct", a.development_fee_pct)?;
    ensure_non_negative("development.contingency_pct", a.contingency_pct)?;
    ensure_non_negative("development.financing_costs_pct", a.financing_costs_pct)?;
    Ok(())
}

/// Development budget from lot size, built areas and unit costs.
///
/// Each percentage applies to a fixed base:
/// soft costs on hard costs, fee and contingency on hard + soft,
/// financing on hard + soft + contingency.
pub fn project_cost(
    lot_size_sqft: f64,
    mix: &UnitMixSummary,
    assumptions: &DevelopmentAssumptions,
) -> Result<ProjectCost> {
    ensure_positive("parcel.lot_size_sqft", lot_size_sqft)?;
    validate(assumptions)?;

    let land_cost = lot_size_sqft * assumptions.land_cost_per_sqft;

    let residential_hard_cost =
        mix.total_residential_area_sqft * assumptions.residential_cost_per_sqft;
    let commercial_hard_cost = mix.total_commercial_area_sqft * assumptions.commercial_cost_per_sqft;
    let common_area_hard_cost = mix.total_common_area_sqft * assumptions.common_area_cost_per_sqft;
    let total_hard_costs = residential_hard_cost + commercial_hard_cost + common_area_hard_cost;

    let soft_costs = total_hard_costs * (assumptions.soft_costs_pct / 100.0);
    let development_fee = (total_hard_costs + soft_costs) * (assumptions.development_fee_pct / 100.0);
    let contingency = (total_hard_costs + soft_costs) * (assumptions.contingency_pct / 100.0);
    let financing_costs =
        (total_hard_costs + soft_costs + contingency) * (assumptions.financing_costs_pct / 100.0);

    let total_project_cost =
        land_cost + total_hard_costs + soft_costs + development_fee + contingency + financing_costs;

    debug!(
        land = land_cost,
        hard = total_hard_costs,
        total = total_project_cost,
        "Project cost estimated"
    );
    Ok(ProjectCost {
        assumptions: *assumptions,
        land_cost,
        residential_hard_cost,
        commercial_hard_cost,
        common_area_hard_cost,
        total_hard_costs,
        soft_costs,
        development_fee,
        contingency,
        financing_costs,
        total_project_cost,
        cost_per_gross_sqft: Metric::ratio(total_project_cost, mix.total_building_area_sqft),
    })
}

/// NOI over total project cost as a percentage.
///
/// A non-positive NOI reports 0%, never a negative yield.
pub fn development_yield(net_operating_income: f64, total_project_cost: f64) -> Metric {
    if net_operating_income > 0.0 {
        Metric::percent(net_operating_income, total_project_cost)
    } else {
        Metric::Value(0.0)
    }
}

/// Attaches the development yield once NOI is known.
pub fn breakdown(cost: ProjectCost, net_operating_income: f64) -> DevelopmentCostBreakdown {
    let development_yield_pct = development_yield(net_operating_income, cost.total_project_cost);
    DevelopmentCostBreakdown {
        cost,
        development_yield_pct,
    }
}
