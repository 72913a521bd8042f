use models::{CashFlowPeriod, CashFlowSeries, ProformaSettings};
use tracing::debug;

use crate::error::{ensure_finite, ensure_positive, FeasibilityError, Result};

pub const MAX_PROJECTION_YEARS: u32 = 100;

pub(crate) fn validate_settings(settings: &ProformaSettings) -> Result<()> {
    if !(1..=MAX_PROJECTION_YEARS).contains(&settings.projection_years) {
        return Err(FeasibilityError::invalid(
            "proforma.projection_years",
            format!(
                "must be between 1 and {MAX_PROJECTION_YEARS}, got {}",
                settings.projection_years
            ),
        ));
    }
    ensure_finite("proforma.rent_growth_pct", settings.rent_growth_pct)?;
    ensure_finite("proforma.expense_growth_pct", settings.expense_growth_pct)?;
    ensure_positive("proforma.exit_cap_rate_pct", settings.exit_cap_rate_pct)?;
    ensure_finite("proforma.discount_rate_pct", settings.discount_rate_pct)?;
    if settings.discount_rate_pct <= -100.0 {
        return Err(FeasibilityError::invalid(
            "proforma.discount_rate_pct",
            format!("must be greater than -100, got {}", settings.discount_rate_pct),
        ));
    }
    Ok(())
}

/// Growth assumptions can compound past `f64::MAX` within the allowed horizon.
fn ensure_finite_periods(periods: &[CashFlowPeriod]) -> Result<()> {
    if let Some(p) = periods.iter().find(|p| !p.total_cash_flow.is_finite()) {
        return Err(FeasibilityError::invalid(
            "proforma.rent_growth_pct",
            format!("projected cash flow for year {} is not finite", p.year),
        ));
    }
    Ok(())
}

/// Direct capitalization of a stabilized NOI.
pub fn exit_value(noi: f64, exit_cap_rate_pct: f64) -> f64 {
    noi / (exit_cap_rate_pct / 100.0)
}

/// Primary series: year 0 outlay, then NOI grown at the net rate
/// (rent growth minus expense growth), with the sale added in the final year.
///
/// The exit capitalizes the final year's NOI as is.
pub fn project(
    total_project_cost: f64,
    initial_noi: f64,
    settings: &ProformaSettings,
) -> Result<CashFlowSeries> {
    ensure_positive("development.total_project_cost", total_project_cost)?;
    ensure_finite("expenses.net_operating_income", initial_noi)?;
    validate_settings(settings)?;

    let years = settings.projection_years;
    let net_growth = 1.0 + (settings.rent_growth_pct - settings.expense_growth_pct) / 100.0;

    let mut periods = Vec::with_capacity(years as usize + 1);
    periods.push(CashFlowPeriod {
        year: 0,
        income: None,
        expenses: None,
        noi: 0.0,
        exit_value: 0.0,
        total_cash_flow: -total_project_cost,
    });

    let mut noi = initial_noi;
    for year in 1..=years {
        noi *= net_growth;
        let exit = if year == years {
            exit_value(noi, settings.exit_cap_rate_pct)
        } else {
            0.0
        };
        periods.push(CashFlowPeriod {
            year,
            income: None,
            expenses: None,
            noi,
            exit_value: exit,
            total_cash_flow: noi + exit,
        });
    }

    ensure_finite_periods(&periods)?;
    debug!(years, final_noi = noi, "Primary cash flow projected");
    Ok(CashFlowSeries { periods })
}

/// Year-by-year schedule for reporting: income and expenses compound separately
/// from their year-1 values.
///
/// The exit in the final year capitalizes the following year's NOI, one rent-growth
/// step beyond the holding period. This differs from [`project`] on purpose and
/// must not feed the return metrics.
pub fn annual_schedule(
    effective_gross_income: f64,
    total_operating_expenses: f64,
    settings: &ProformaSettings,
) -> Result<CashFlowSeries> {
    ensure_finite("income.effective_gross_income", effective_gross_income)?;
    ensure_finite("expenses.total_operating_expenses", total_operating_expenses)?;
    validate_settings(settings)?;

    let years = settings.projection_years;
    let rent_growth = 1.0 + settings.rent_growth_pct / 100.0;
    let expense_growth = 1.0 + settings.expense_growth_pct / 100.0;

    let periods: Vec<CashFlowPeriod> = (1..=years)
        .map(|year| {
            let exponent = (year - 1) as i32;
            let income = effective_gross_income * rent_growth.powi(exponent);
            let expenses = total_operating_expenses * expense_growth.powi(exponent);
            let noi = income - expenses;
            let exit = if year == years {
                exit_value(noi * rent_growth, settings.exit_cap_rate_pct)
            } else {
                0.0
            };
            CashFlowPeriod {
                year,
                income: Some(income),
                expenses: Some(expenses),
                noi,
                exit_value: exit,
                total_cash_flow: noi + exit,
            }
        })
        .collect();

    ensure_finite_periods(&periods)?;
    Ok(CashFlowSeries { periods })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(years: u32) -> ProformaSettings {
        ProformaSettings {
            projection_years: years,
            rent_growth_pct: 3.0,
            expense_growth_pct: 2.0,
            exit_cap_rate_pct: 5.5,
            discount_rate_pct: 7.0,
        }
    }

    #[test]
    fn test_single_year_projection() {
        let series = project(1_000_000.0, 80_000.0, &settings(1)).unwrap();

        assert_eq!(series.periods.len(), 2);
        assert_eq!(series.periods[0].total_cash_flow, -1_000_000.0);

        let y1 = &series.periods[1];
        assert!((y1.noi - 80_800.0).abs() < 1e-6);
        assert!((y1.exit_value - 1_469_090.909_090_9).abs() < 1e-3);
        assert!((y1.total_cash_flow - 1_549_890.909_090_9).abs() < 1e-3);
    }

    #[test]
    fn test_exit_only_in_final_year() {
        let series = project(1_000_000.0, 80_000.0, &settings(5)).unwrap();

        assert_eq!(series.periods.len(), 6);
        for p in &series.periods[..5] {
            assert_eq!(p.exit_value, 0.0);
        }
        assert!(series.periods[5].exit_value > 0.0);

        let expected_final_noi = 80_000.0 * 1.01_f64.powi(5);
        assert!((series.periods[5].noi - expected_final_noi).abs() < 1e-6);
        assert!(
            (series.periods[5].exit_value - expected_final_noi / 0.055).abs() < 1e-4
        );
    }

    #[test]
    fn test_annual_schedule_compounds_separately() {
        let schedule = annual_schedule(200_000.0, 80_000.0, &settings(3)).unwrap();

        assert_eq!(schedule.periods.len(), 3);
        let y1 = &schedule.periods[0];
        assert_eq!(y1.year, 1);
        assert_eq!(y1.income, Some(200_000.0));
        assert_eq!(y1.expenses, Some(80_000.0));
        assert_eq!(y1.noi, 120_000.0);
        assert_eq!(y1.exit_value, 0.0);

        let y3 = &schedule.periods[2];
        let income = 200_000.0 * 1.03_f64.powi(2);
        let expenses = 80_000.0 * 1.02_f64.powi(2);
        assert!((y3.income.unwrap() - income).abs() < 1e-6);
        assert!((y3.expenses.unwrap() - expenses).abs() < 1e-6);
        assert!((y3.noi - (income - expenses)).abs() < 1e-6);

        // Exit on next year's NOI, grown once more at the rent growth rate
        let next_noi = (income - expenses) * 1.03;
        assert!((y3.exit_value - next_noi / 0.055).abs() < 1e-4);
        assert!((y3.total_cash_flow - (y3.noi + y3.exit_value)).abs() < 1e-6);
    }

    #[test]
    fn test_exit_conventions_differ() {
        let s = settings(1);
        let primary = project(1_000_000.0, 120_000.0, &s).unwrap();
        let schedule = annual_schedule(200_000.0, 80_000.0, &s).unwrap();

        // Same starting NOI, but the schedule's exit sits one growth step further out
        assert!(schedule.periods[0].exit_value > primary.periods[1].exit_value * 0.99);
        assert_ne!(schedule.periods[0].exit_value, primary.periods[1].exit_value);
    }

    #[test]
    fn test_invalid_settings() {
        let mut s = settings(5);
        s.exit_cap_rate_pct = 0.0;
        let err = project(1_000_000.0, 80_000.0, &s).unwrap_err();
        assert_eq!(err.field(), "proforma.exit_cap_rate_pct");

        let mut s = settings(0);
        s.exit_cap_rate_pct = 5.5;
        let err = annual_schedule(1.0, 1.0, &s).unwrap_err();
        assert_eq!(err.field(), "proforma.projection_years");
    }

    #[test]
    fn test_horizon_is_bounded() {
        let err = project(1_000_000.0, 80_000.0, &settings(MAX_PROJECTION_YEARS + 1)).unwrap_err();
        assert_eq!(err.field(), "proforma.projection_years");

        let err = annual_schedule(200_000.0, 80_000.0, &settings(100_000)).unwrap_err();
        assert_eq!(err.field(), "proforma.projection_years");

        let longest = project(1_000_000.0, 80_000.0, &settings(MAX_PROJECTION_YEARS)).unwrap();
        assert_eq!(longest.periods.len(), MAX_PROJECTION_YEARS as usize + 1);
        assert!(longest.cash_flows().iter().all(|cf| cf.is_finite()));
    }

    #[test]
    fn test_overflowing_growth_is_invalid() {
        let mut s = settings(MAX_PROJECTION_YEARS);
        s.rent_growth_pct = 1e300;
        let err = project(1_000_000.0, 80_000.0, &s).unwrap_err();
        assert_eq!(err.field(), "proforma.rent_growth_pct");

        let err = annual_schedule(200_000.0, 80_000.0, &s).unwrap_err();
        assert_eq!(err.field(), "proforma.rent_growth_pct");
    }

    #[test]
    fn test_non_positive_cost_is_invalid() {
        let err = project(0.0, 80_000.0, &settings(5)).unwrap_err();
        assert_eq!(err.field(), "development.total_project_cost");
    }
}
