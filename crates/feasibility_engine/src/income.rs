use models::{IncomeAssumptions, IncomeStatement, RentRollLine, UnitSpec};
use tracing::debug;

use crate::error::{ensure_non_negative, ensure_percentage, Result};

/// Rent roll, vacancy and other income for a retained unit mix.
///
/// Commercial and residential lines are rolled up the same way.
pub fn compute(units: &[UnitSpec], assumptions: &IncomeAssumptions) -> Result<IncomeStatement> {
    let vacancy_rate_pct = ensure_percentage("income.vacancy_rate_pct", assumptions.vacancy_rate_pct)?;
    let other_income = ensure_non_negative("income.other_income", assumptions.other_income)?;

    let rent_roll: Vec<RentRollLine> = units
        .iter()
        .map(|unit| RentRollLine {
            unit_type: unit.unit_type,
            display_name: unit.unit_type.display_name().to_string(),
            quantity: unit.quantity,
            monthly_rent: unit.monthly_rent,
            annual_rent: unit.annual_rent(),
        })
        .collect();

    let potential_gross_income: f64 = rent_roll.iter().map(|line| line.annual_rent).sum();
    let vacancy_loss = potential_gross_income * (vacancy_rate_pct / 100.0);
    let effective_gross_income = potential_gross_income - vacancy_loss + other_income;

    debug!(
        pgi = potential_gross_income,
        egi = effective_gross_income,
        "Income statement computed"
    );
    Ok(IncomeStatement {
        rent_roll,
        potential_gross_income,
        vacancy_rate_pct,
        vacancy_loss,
        other_income,
        effective_gross_income,
    })
}
