use models::{ExpenseAssumptions, ExpenseStatement, Metric, OperatingExpenses};
use tracing::debug;

use crate::error::{ensure_finite, ensure_non_negative, Result};

fn validate(assumptions: &ExpenseAssumptions) -> Result<()> {
    ensure_non_negative("expenses.taxes", assumptions.taxes)?;
    ensure_non_negative("expenses.insurance", assumptions.insurance)?;
    ensure_non_negative("expenses.utilities", assumptions.utilities)?;
    ensure_non_negative("expenses.repairs", assumptions.repairs)?;
    ensure_non_negative("expenses.other_expenses", assumptions.other_expenses)?;
    ensure_non_negative(
        "expenses.property_management_pct",
        assumptions.property_management_pct,
    )?;
    Ok(())
}

/// Total operating expenses and NOI from effective gross income.
///
/// Does not look at development cost; NOI may come out negative.
pub fn operating_expenses(
    effective_gross_income: f64,
    assumptions: &ExpenseAssumptions,
) -> Result<OperatingExpenses> {
    ensure_finite("income.effective_gross_income", effective_gross_income)?;
    validate(assumptions)?;

    let property_management_fee =
        effective_gross_income * (assumptions.property_management_pct / 100.0);
    let total_operating_expenses = assumptions.taxes
        + assumptions.insurance
        + assumptions.utilities
        + assumptions.repairs
        + property_management_fee
        + assumptions.other_expenses;
    let net_operating_income = effective_gross_income - total_operating_expenses;

    debug!(
        total_opex = total_operating_expenses,
        noi = net_operating_income,
        "Operating expenses computed"
    );
    Ok(OperatingExpenses {
        taxes: assumptions.taxes,
        insurance: assumptions.insurance,
        utilities: assumptions.utilities,
        repairs: assumptions.repairs,
        other_expenses: assumptions.other_expenses,
        property_management_pct: assumptions.property_management_pct,
        property_management_fee,
        total_operating_expenses,
        net_operating_income,
        opex_ratio_pct: Metric::percent(total_operating_expenses, effective_gross_income),
    })
}

/// NOI over total project cost, as a percentage.
pub fn cap_rate(net_operating_income: f64, total_project_cost: f64) -> Metric {
    Metric::percent(net_operating_income, total_project_cost)
}

/// Attaches the cap rate once the project cost is known.
pub fn statement(operating: OperatingExpenses, total_project_cost: f64) -> ExpenseStatement {
    let cap_rate_pct = cap_rate(operating.net_operating_income, total_project_cost);
    ExpenseStatement {
        operating,
        cap_rate_pct,
    }
}
