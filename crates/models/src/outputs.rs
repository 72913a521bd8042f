use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::inputs::{Address, CurrentUse, DevelopmentAssumptions, UnitType};
use crate::metric::Metric;
use crate::{round2, round4};

// Engine outputs, in pipeline order.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseRecommendation {
    Residential,
    Commercial,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoningCapacity {
    pub lot_size_sqft: f64,
    pub max_far: f64,
    pub max_buildable_area_sqft: f64,
    pub current_use: CurrentUse,
    pub current_far: f64,
    pub current_buildable_area_sqft: f64,
    pub far_increase_pct: Metric,
    /// Advisory only, derived from the zoning code prefix.
    pub recommended_use: UseRecommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitMixSummary {
    pub total_units: u64,
    pub total_residential_area_sqft: f64,
    pub total_commercial_area_sqft: f64,
    pub total_common_area_sqft: f64,
    pub total_building_area_sqft: f64,
    pub far_utilization_pct: Metric,
    /// Building area over lot size.
    pub actual_far: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentRollLine {
    pub unit_type: UnitType,
    pub display_name: String,
    pub quantity: u32,
    pub monthly_rent: f64,
    pub annual_rent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub rent_roll: Vec<RentRollLine>,
    pub potential_gross_income: f64,
    pub vacancy_rate_pct: f64,
    pub vacancy_loss: f64,
    pub other_income: f64,
    pub effective_gross_income: f64,
}

/// Operating expenses and NOI, computed from operating data alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingExpenses {
    pub taxes: f64,
    pub insurance: f64,
    pub utilities: f64,
    pub repairs: f64,
    pub other_expenses: f64,
    pub property_management_pct: f64,
    pub property_management_fee: f64,
    pub total_operating_expenses: f64,
    pub net_operating_income: f64,
    pub opex_ratio_pct: Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseStatement {
    #[serde(flatten)]
    pub operating: OperatingExpenses,
    /// NOI over total project cost.
    pub cap_rate_pct: Metric,
}

/// Development budget, computed from areas and unit costs alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCost {
    pub assumptions: DevelopmentAssumptions,
    pub land_cost: f64,
    pub residential_hard_cost: f64,
    pub commercial_hard_cost: f64,
    pub common_area_hard_cost: f64,
    pub total_hard_costs: f64,
    pub soft_costs: f64,
    pub development_fee: f64,
    pub contingency: f64,
    pub financing_costs: f64,
    pub total_project_cost: f64,
    pub cost_per_gross_sqft: Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentCostBreakdown {
    #[serde(flatten)]
    pub cost: ProjectCost,
    /// NOI over total project cost; 0 whenever NOI is not positive.
    pub development_yield_pct: Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowPeriod {
    pub year: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses: Option<f64>,
    pub noi: f64,
    pub exit_value: f64,
    pub total_cash_flow: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSeries {
    pub periods: Vec<CashFlowPeriod>,
}

impl CashFlowSeries {
    pub fn cash_flows(&self) -> Vec<f64> {
        self.periods.iter().map(|p| p.total_cash_flow).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowProjection {
    /// Year 0 outlay plus net-growth NOI; drives ROI, IRR and NPV.
    pub primary: CashFlowSeries,
    /// Income and expenses compounded separately; reporting only.
    pub annual_schedule: CashFlowSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtService {
    pub loan_amount: f64,
    pub monthly_payment: f64,
    pub annual_debt_service: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    pub roi_pct: f64,
    pub irr_pct: f64,
    pub npv: f64,
    pub cash_on_cash_pct: f64,
    pub dscr: Metric,
    pub payback_period_years: Metric,
    pub debt_service: DebtService,
}

/// Headline numbers for a summary view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyFigures {
    pub actual_far: f64,
    pub net_operating_income: f64,
    pub cap_rate_pct: Metric,
    pub total_project_cost: f64,
    pub irr_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityAnalysis {
    pub zoning: ZoningCapacity,
    pub unit_mix: UnitMixSummary,
    pub income: IncomeStatement,
    pub expenses: ExpenseStatement,
    pub development: DevelopmentCostBreakdown,
    pub cash_flows: CashFlowProjection,
    pub metrics: InvestmentMetrics,
    pub key_figures: KeyFigures,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

// Written report

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub settings_version: u32,
    pub engine_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityReport {
    pub metadata: ReportMetadata,
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoning_code: Option<String>,
    pub analysis: FeasibilityAnalysis,
}

// Rounding applied when a report is written

fn round_metric2(m: Metric) -> Metric {
    m.map(round2)
}

fn round_metric4(m: Metric) -> Metric {
    m.map(round4)
}

impl CashFlowPeriod {
    fn rounded(self) -> Self {
        Self {
            year: self.year,
            income: self.income.map(round2),
            expenses: self.expenses.map(round2),
            noi: round2(self.noi),
            exit_value: round2(self.exit_value),
            total_cash_flow: round2(self.total_cash_flow),
        }
    }
}

impl CashFlowSeries {
    fn rounded(self) -> Self {
        Self {
            periods: self.periods.into_iter().map(CashFlowPeriod::rounded).collect(),
        }
    }
}

impl FeasibilityAnalysis {
    /// Currency to cents, percentages and ratios to four decimals.
    pub fn rounded(mut self) -> Self {
        let z = &mut self.zoning;
        z.max_buildable_area_sqft = round2(z.max_buildable_area_sqft);
        z.current_buildable_area_sqft = round2(z.current_buildable_area_sqft);
        z.far_increase_pct = round_metric4(z.far_increase_pct);

        let u = &mut self.unit_mix;
        u.total_residential_area_sqft = round2(u.total_residential_area_sqft);
        u.total_commercial_area_sqft = round2(u.total_commercial_area_sqft);
        u.total_common_area_sqft = round2(u.total_common_area_sqft);
        u.total_building_area_sqft = round2(u.total_building_area_sqft);
        u.far_utilization_pct = round_metric4(u.far_utilization_pct);
        u.actual_far = round4(u.actual_far);

        let i = &mut self.income;
        for line in i.rent_roll.iter_mut() {
            line.monthly_rent = round2(line.monthly_rent);
            line.annual_rent = round2(line.annual_rent);
        }
        i.potential_gross_income = round2(i.potential_gross_income);
        i.vacancy_loss = round2(i.vacancy_loss);
        i.other_income = round2(i.other_income);
        i.effective_gross_income = round2(i.effective_gross_income);

        let e = &mut self.expenses;
        e.operating.property_management_fee = round2(e.operating.property_management_fee);
        e.operating.total_operating_expenses = round2(e.operating.total_operating_expenses);
        e.operating.net_operating_income = round2(e.operating.net_operating_income);
        e.operating.opex_ratio_pct = round_metric4(e.operating.opex_ratio_pct);
        e.cap_rate_pct = round_metric4(e.cap_rate_pct);

        let c = &mut self.development.cost;
        c.land_cost = round2(c.land_cost);
        c.residential_hard_cost = round2(c.residential_hard_cost);
        c.commercial_hard_cost = round2(c.commercial_hard_cost);
        c.common_area_hard_cost = round2(c.common_area_hard_cost);
        c.total_hard_costs = round2(c.total_hard_costs);
        c.soft_costs = round2(c.soft_costs);
        c.development_fee = round2(c.development_fee);
        c.contingency = round2(c.contingency);
        c.financing_costs = round2(c.financing_costs);
        c.total_project_cost = round2(c.total_project_cost);
        c.cost_per_gross_sqft = round_metric2(c.cost_per_gross_sqft);
        self.development.development_yield_pct =
            round_metric4(self.development.development_yield_pct);

        self.cash_flows = CashFlowProjection {
            primary: self.cash_flows.primary.rounded(),
            annual_schedule: self.cash_flows.annual_schedule.rounded(),
        };

        let m = &mut self.metrics;
        m.roi_pct = round4(m.roi_pct);
        m.irr_pct = round4(m.irr_pct);
        m.npv = round2(m.npv);
        m.cash_on_cash_pct = round4(m.cash_on_cash_pct);
        m.dscr = round_metric4(m.dscr);
        m.payback_period_years = round_metric4(m.payback_period_years);
        m.debt_service.loan_amount = round2(m.debt_service.loan_amount);
        m.debt_service.monthly_payment = round2(m.debt_service.monthly_payment);
        m.debt_service.annual_debt_service = round2(m.debt_service.annual_debt_service);

        let k = &mut self.key_figures;
        k.actual_far = round4(k.actual_far);
        k.net_operating_income = round2(k.net_operating_income);
        k.cap_rate_pct = round_metric4(k.cap_rate_pct);
        k.total_project_cost = round2(k.total_project_cost);
        k.irr_pct = round4(k.irr_pct);

        self
    }
}

impl FeasibilityReport {
    pub fn rounded(self) -> Self {
        Self {
            analysis: self.analysis.rounded(),
            ..self
        }
    }
}
