use serde::{Deserialize, Serialize};

/// Contents of `settings.json`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub settings_version: u32,
    pub debt_terms: DebtTerms,
    pub irr_search: IrrSearch,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            settings_version: 1,
            debt_terms: DebtTerms::default(),
            irr_search: IrrSearch::default(),
        }
    }
}

/// Assumed permanent loan used for the DSCR.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebtTerms {
    pub loan_to_value_pct: f64,
    pub interest_rate_pct: f64,
    pub amortization_years: u32,
}

impl Default for DebtTerms {
    fn default() -> Self {
        Self {
            loan_to_value_pct: 75.0,
            interest_rate_pct: 4.5,
            amortization_years: 30,
        }
    }
}

/// Bisection bounds for the IRR solver, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrrSearch {
    pub min_rate_pct: f64,
    pub max_rate_pct: f64,
    pub tolerance_pct: f64,
    pub max_iterations: u32,
}

impl Default for IrrSearch {
    fn default() -> Self {
        Self {
            min_rate_pct: 0.0,
            max_rate_pct: 50.0,
            tolerance_pct: 0.1,
            max_iterations: 100,
        }
    }
}
