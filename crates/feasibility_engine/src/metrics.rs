use models::{CashFlowSeries, DebtService, DebtTerms, InvestmentMetrics, IrrSearch, Metric};
use tracing::debug;

use crate::error::{ensure_finite, ensure_percentage, ensure_positive, FeasibilityError, Result};

/// Net present value with `rate` as a fraction; cash flow `t` is discounted `t` periods.
pub fn npv(cash_flows: &[f64], rate: f64) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// IRR in percent by bisection on `[min_rate_pct, max_rate_pct]`.
///
/// Assumes NPV falls as the rate rises (one outflow followed by inflows). When the
/// root is not bracketed the interval collapses toward one bound and that midpoint
/// is returned. `None` when NPV at a probed rate is not finite, since the search
/// direction is then unknown.
pub fn irr(cash_flows: &[f64], search: &IrrSearch) -> Option<f64> {
    let mut lo = search.min_rate_pct;
    let mut hi = search.max_rate_pct;

    for _ in 0..search.max_iterations {
        let mid = (lo + hi) / 2.0;
        if (hi - lo).abs() < search.tolerance_pct {
            return Some(mid);
        }
        let value = npv(cash_flows, mid / 100.0);
        if !value.is_finite() {
            return None;
        }
        if value > 0.0 {
            lo = mid;
        } else if value < 0.0 {
            hi = mid;
        } else {
            return Some(mid);
        }
    }
    Some((lo + hi) / 2.0)
}

/// Whether NPV changes sign between the two ends of the search interval.
pub fn irr_is_bracketed(cash_flows: &[f64], search: &IrrSearch) -> bool {
    let at_min = npv(cash_flows, search.min_rate_pct / 100.0);
    let at_max = npv(cash_flows, search.max_rate_pct / 100.0);
    at_min.signum() != at_max.signum() || at_min == 0.0 || at_max == 0.0
}

/// Number of sign changes in a cash-flow sequence, ignoring zeros.
pub fn sign_changes(cash_flows: &[f64]) -> usize {
    let signs: Vec<bool> = cash_flows
        .iter()
        .filter(|cf| **cf != 0.0)
        .map(|cf| *cf > 0.0)
        .collect();
    signs.windows(2).filter(|w| w[0] != w[1]).count()
}

pub const MAX_AMORTIZATION_YEARS: u32 = 100;

/// Level monthly payment on a fixed-rate, fully amortizing loan.
pub fn monthly_payment(loan_amount: f64, annual_rate_pct: f64, term_years: u32) -> f64 {
    let n = f64::from(term_years) * 12.0;
    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    if monthly_rate == 0.0 {
        return loan_amount / n;
    }
    let growth = (1.0 + monthly_rate).powf(n);
    loan_amount * monthly_rate * growth / (growth - 1.0)
}

pub fn debt_service(total_project_cost: f64, terms: &DebtTerms) -> DebtService {
    let loan_amount = total_project_cost * (terms.loan_to_value_pct / 100.0);
    let monthly_payment = monthly_payment(loan_amount, terms.interest_rate_pct, terms.amortization_years);
    DebtService {
        loan_amount,
        monthly_payment,
        annual_debt_service: monthly_payment * 12.0,
    }
}

pub(crate) fn validate_debt_terms(terms: &DebtTerms) -> Result<()> {
    ensure_percentage("settings.debt_terms.loan_to_value_pct", terms.loan_to_value_pct)?;
    ensure_finite("settings.debt_terms.interest_rate_pct", terms.interest_rate_pct)?;
    if terms.interest_rate_pct < 0.0 {
        return Err(FeasibilityError::invalid(
            "settings.debt_terms.interest_rate_pct",
            "must not be negative",
        ));
    }
    if !(1..=MAX_AMORTIZATION_YEARS).contains(&terms.amortization_years) {
        return Err(FeasibilityError::invalid(
            "settings.debt_terms.amortization_years",
            format!(
                "must be between 1 and {MAX_AMORTIZATION_YEARS}, got {}",
                terms.amortization_years
            ),
        ));
    }
    Ok(())
}

pub(crate) fn validate_irr_search(search: &IrrSearch) -> Result<()> {
    ensure_finite("settings.irr_search.min_rate_pct", search.min_rate_pct)?;
    ensure_finite("settings.irr_search.max_rate_pct", search.max_rate_pct)?;
    if search.min_rate_pct <= -100.0 || search.max_rate_pct <= search.min_rate_pct {
        return Err(FeasibilityError::invalid(
            "settings.irr_search",
            format!(
                "needs -100 < min_rate_pct < max_rate_pct, got [{}, {}]",
                search.min_rate_pct, search.max_rate_pct
            ),
        ));
    }
    ensure_positive("settings.irr_search.tolerance_pct", search.tolerance_pct)?;
    if search.max_iterations == 0 {
        return Err(FeasibilityError::invalid(
            "settings.irr_search.max_iterations",
            "must be at least 1",
        ));
    }
    Ok(())
}

/// Return metrics over the primary cash-flow series.
pub fn compute(
    series: &CashFlowSeries,
    total_project_cost: f64,
    initial_noi: f64,
    discount_rate_pct: f64,
    terms: &DebtTerms,
    search: &IrrSearch,
) -> Result<InvestmentMetrics> {
    ensure_positive("development.total_project_cost", total_project_cost)?;
    ensure_finite("expenses.net_operating_income", initial_noi)?;
    ensure_finite("proforma.discount_rate_pct", discount_rate_pct)?;
    validate_debt_terms(terms)?;
    validate_irr_search(search)?;

    let cash_flows = series.cash_flows();
    let total: f64 = cash_flows.iter().sum();
    if !total.is_finite() {
        return Err(FeasibilityError::invalid(
            "proforma",
            "projected cash flows are not finite",
        ));
    }
    let irr_pct = irr(&cash_flows, search).ok_or_else(|| {
        FeasibilityError::invalid(
            "proforma",
            "NPV is not finite inside the IRR search interval",
        )
    })?;
    let net_present_value = ensure_finite(
        "proforma.discount_rate_pct",
        npv(&cash_flows, discount_rate_pct / 100.0),
    )?;

    let debt_service = debt_service(total_project_cost, terms);
    let metrics = InvestmentMetrics {
        roi_pct: total / total_project_cost * 100.0,
        irr_pct,
        npv: net_present_value,
        cash_on_cash_pct: initial_noi / total_project_cost * 100.0,
        dscr: Metric::ratio(initial_noi, debt_service.annual_debt_service),
        payback_period_years: Metric::ratio(total_project_cost, initial_noi),
        debt_service,
    };
    debug!(
        roi = metrics.roi_pct,
        irr = metrics.irr_pct,
        npv = metrics.npv,
        dscr = %metrics.dscr,
        "Investment metrics computed"
    );
    Ok(metrics)
}
