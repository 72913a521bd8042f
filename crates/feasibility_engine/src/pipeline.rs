use models::*;
use tracing::{info, warn};

use crate::error::Result;
use crate::{cash_flow, development, expenses, income, metrics, unit_mix, zoning};

/// Runs every component in dependency order and returns the full analysis.
///
/// Pure: no I/O, no clock. The same input and settings always give the same result.
pub fn analyze(input: &PropertyInput, settings: &Settings) -> Result<FeasibilityAnalysis> {
    let zoning = zoning::calculate(&input.parcel)?;

    let units = unit_mix::retain_buildable(&input.units)?;
    let unit_mix = unit_mix::aggregate(&units, &input.common_areas, &zoning)?;

    let income = income::compute(&units, &input.income)?;
    let operating = expenses::operating_expenses(income.effective_gross_income, &input.expenses)?;

    // Cost does not depend on NOI and NOI does not depend on cost; only the
    // trailing cap rate and development yield look at both.
    let cost = development::project_cost(input.parcel.lot_size_sqft, &unit_mix, &input.development)?;
    let noi = operating.net_operating_income;
    let total_project_cost = cost.total_project_cost;
    let expenses = expenses::statement(operating, total_project_cost);
    let development = development::breakdown(cost, noi);

    let primary = cash_flow::project(total_project_cost, noi, &input.proforma)?;
    let annual_schedule = cash_flow::annual_schedule(
        income.effective_gross_income,
        expenses.operating.total_operating_expenses,
        &input.proforma,
    )?;

    let metrics = metrics::compute(
        &primary,
        total_project_cost,
        noi,
        input.proforma.discount_rate_pct,
        &settings.debt_terms,
        &settings.irr_search,
    )?;

    let warnings = collect_warnings(&primary, noi, &unit_mix, &settings.irr_search);
    for w in &warnings {
        warn!("{}", w);
    }

    let key_figures = KeyFigures {
        actual_far: unit_mix.actual_far,
        net_operating_income: noi,
        cap_rate_pct: expenses.cap_rate_pct,
        total_project_cost,
        irr_pct: metrics.irr_pct,
    };
    info!(
        noi,
        total_project_cost,
        irr = metrics.irr_pct,
        warnings = warnings.len(),
        "Feasibility analysis complete"
    );

    Ok(FeasibilityAnalysis {
        zoning,
        unit_mix,
        income,
        expenses,
        development,
        cash_flows: CashFlowProjection {
            primary,
            annual_schedule,
        },
        metrics,
        key_figures,
        warnings,
    })
}

/// Conditions worth flagging that do not change any figure.
fn collect_warnings(
    primary: &CashFlowSeries,
    noi: f64,
    unit_mix: &UnitMixSummary,
    search: &IrrSearch,
) -> Vec<String> {
    let mut warnings = Vec::new();
    let cash_flows = primary.cash_flows();

    let changes = metrics::sign_changes(&cash_flows);
    if changes > 1 {
        warnings.push(format!(
            "Cash flows change sign {changes} times; IRR may not be unique"
        ));
    }
    if !metrics::irr_is_bracketed(&cash_flows, search) {
        warnings.push(format!(
            "IRR not bracketed on [{}%, {}%]; reported IRR is the bisection midpoint",
            search.min_rate_pct, search.max_rate_pct
        ));
    }
    if noi <= 0.0 {
        warnings.push(format!(
            "Net operating income is not positive ({noi:.2}); payback and yield are not meaningful"
        ));
    }
    if let Some(pct) = unit_mix.far_utilization_pct.value() {
        if pct > 100.0 {
            warnings.push(format!(
                "Building area uses {pct:.1}% of the maximum buildable area"
            ));
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> PropertyInput {
        PropertyInput {
            address: Address {
                street: "100 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip: "62701".to_string(),
            },
            parcel: ParcelSpec {
                lot_size_sqft: 10_000.0,
                max_far: 2.5,
                current_use: CurrentUse::SingleFamily,
                zoning_code: Some("R-5".to_string()),
                ..ParcelSpec::default()
            },
            units: vec![
                UnitSpec {
                    unit_type: UnitType::Studio,
                    size_sqft: 500.0,
                    quantity: 8,
                    monthly_rent: 1_600.0,
                },
                UnitSpec {
                    unit_type: UnitType::OneBedroom,
                    size_sqft: 700.0,
                    quantity: 12,
                    monthly_rent: 2_100.0,
                },
                UnitSpec {
                    unit_type: UnitType::TwoBedroom,
                    size_sqft: 950.0,
                    quantity: 6,
                    monthly_rent: 2_800.0,
                },
                UnitSpec {
                    unit_type: UnitType::Retail,
                    size_sqft: 2_000.0,
                    quantity: 1,
                    monthly_rent: 6_000.0,
                },
            ],
            common_areas: CommonAreas {
                lobby_sqft: 600.0,
                amenity_sqft: 800.0,
                circulation_sqft: 2_500.0,
            },
            income: IncomeAssumptions {
                vacancy_rate_pct: 5.0,
                other_income: 6_000.0,
            },
            expenses: ExpenseAssumptions {
                taxes: 45_000.0,
                insurance: 12_000.0,
                utilities: 18_000.0,
                repairs: 15_000.0,
                other_expenses: 5_000.0,
                property_management_pct: 3.0,
            },
            development: DevelopmentAssumptions::default(),
            proforma: ProformaSettings::default(),
        }
    }

    #[test]
    fn test_full_pipeline_is_consistent() {
        let input = sample_input();
        let a = analyze(&input, &Settings::default()).unwrap();

        // 8*500 + 12*700 + 6*950 = 18,100 residential
        assert_eq!(a.unit_mix.total_residential_area_sqft, 18_100.0);
        assert_eq!(a.unit_mix.total_commercial_area_sqft, 2_000.0);
        assert_eq!(a.unit_mix.total_units, 27);

        assert_eq!(a.income.rent_roll.len(), 4);
        let noi = a.expenses.operating.net_operating_income;
        assert!(
            (noi - (a.income.effective_gross_income - a.expenses.operating.total_operating_expenses))
                .abs()
                < 1e-9
        );

        let total = a.development.cost.total_project_cost;
        assert_eq!(a.cash_flows.primary.periods[0].total_cash_flow, -total);
        assert_eq!(a.cash_flows.primary.periods.len(), 6);
        assert_eq!(a.cash_flows.annual_schedule.periods.len(), 5);

        let cap = a.expenses.cap_rate_pct.value().unwrap();
        assert!((cap - noi / total * 100.0).abs() < 1e-9);
        assert_eq!(a.key_figures.cap_rate_pct, a.expenses.cap_rate_pct);
        assert_eq!(a.key_figures.irr_pct, a.metrics.irr_pct);
        assert!((0.0..=50.0).contains(&a.metrics.irr_pct));
        assert_eq!(
            a.zoning.recommended_use,
            UseRecommendation::Residential
        );
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let input = sample_input();
        let settings = Settings::default();
        let first = analyze(&input, &settings).unwrap();
        let second = analyze(&input, &settings).unwrap();
        assert_eq!(first, second);

        let a = serde_json::to_string(&first).unwrap();
        let b = serde_json::to_string(&second).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_input_fails_fast() {
        let mut input = sample_input();
        input.parcel.lot_size_sqft = 0.0;
        let err = analyze(&input, &Settings::default()).unwrap_err();
        assert_eq!(err.field(), "parcel.lot_size_sqft");

        let mut input = sample_input();
        input.proforma.exit_cap_rate_pct = -1.0;
        let err = analyze(&input, &Settings::default()).unwrap_err();
        assert_eq!(err.field(), "proforma.exit_cap_rate_pct");
    }

    #[test]
    fn test_out_of_range_horizons_are_invalid() {
        let input = sample_input();
        for years in [20_000, 400_000_000] {
            let mut settings = Settings::default();
            settings.debt_terms.amortization_years = years;
            let err = analyze(&input, &settings).unwrap_err();
            assert_eq!(err.field(), "settings.debt_terms.amortization_years");
        }

        let mut input = sample_input();
        input.proforma.projection_years = 100_000;
        let err = analyze(&input, &Settings::default()).unwrap_err();
        assert_eq!(err.field(), "proforma.projection_years");
    }

    #[test]
    fn test_report_figures_are_finite() {
        let mut input = sample_input();
        input.proforma.projection_years = 100;
        let mut settings = Settings::default();
        settings.debt_terms.amortization_years = 100;
        let a = analyze(&input, &settings).unwrap();

        assert!(a.metrics.roi_pct.is_finite());
        assert!(a.metrics.npv.is_finite());
        assert!(a.metrics.irr_pct.is_finite());
        assert!(a.metrics.dscr.value().unwrap().is_finite());
        let json = serde_json::to_string(&a).unwrap();
        assert!(!json.contains("null"));
    }

    #[test]
    fn test_zero_project_cost_is_invalid() {
        let mut input = sample_input();
        input.units.clear();
        input.common_areas = CommonAreas::default();
        input.development.land_cost_per_sqft = 0.0;
        let err = analyze(&input, &Settings::default()).unwrap_err();
        assert_eq!(err.field(), "development.total_project_cost");
    }

    #[test]
    fn test_negative_noi_is_flagged() {
        let mut input = sample_input();
        input.expenses.taxes = 5_000_000.0;
        let a = analyze(&input, &Settings::default()).unwrap();

        assert!(a.expenses.operating.net_operating_income < 0.0);
        assert_eq!(a.development.development_yield_pct, Metric::Value(0.0));
        assert!(a.warnings.iter().any(|w| w.contains("not positive")));
    }

    #[test]
    fn test_over_capacity_is_flagged() {
        let mut input = sample_input();
        input.parcel.max_far = 0.5;
        let a = analyze(&input, &Settings::default()).unwrap();
        assert!(a.unit_mix.far_utilization_pct.value().unwrap() > 100.0);
        assert!(a.warnings.iter().any(|w| w.contains("maximum buildable area")));
    }

    #[test]
    fn test_unbracketed_irr_is_flagged() {
        let mut input = sample_input();
        input.development = DevelopmentAssumptions {
            land_cost_per_sqft: 1.0,
            residential_cost_per_sqft: 10.0,
            commercial_cost_per_sqft: 10.0,
            common_area_cost_per_sqft: 10.0,
            ..DevelopmentAssumptions::default()
        };
        let a = analyze(&input, &Settings::default()).unwrap();
        assert!(a.metrics.irr_pct > 49.0);
        assert!(a.warnings.iter().any(|w| w.contains("not bracketed")));
    }
}
