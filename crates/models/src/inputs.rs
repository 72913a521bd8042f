use serde::{Deserialize, Serialize};

// Property input document.
// Any field missing from the JSON takes the default below.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyInput {
    pub address: Address,
    pub parcel: ParcelSpec,
    pub units: Vec<UnitSpec>,
    pub common_areas: CommonAreas,
    pub income: IncomeAssumptions,
    pub expenses: ExpenseAssumptions,
    pub development: DevelopmentAssumptions,
    pub proforma: ProformaSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurrentUse {
    #[default]
    Vacant,
    #[serde(alias = "sfr")]
    SingleFamily,
    #[serde(alias = "mfr")]
    MultiFamily,
    Retail,
    Office,
    Industrial,
    #[serde(alias = "mixed")]
    MixedUse,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Setbacks {
    pub front_ft: f64,
    pub rear_ft: f64,
    pub left_ft: f64,
    pub right_ft: f64,
}

impl Default for Setbacks {
    fn default() -> Self {
        Self {
            front_ft: 20.0,
            rear_ft: 15.0,
            left_ft: 10.0,
            right_ft: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParcelSpec {
    pub lot_size_sqft: f64,
    pub max_far: f64,
    pub max_height_ft: f64,
    pub setbacks: Setbacks,
    pub min_parking_ratio: f64,
    pub current_use: CurrentUse,
    /// Municipal zoning designation, e.g. "R-4" or "C-2".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoning_code: Option<String>,
}

impl Default for ParcelSpec {
    fn default() -> Self {
        Self {
            lot_size_sqft: 10_000.0,
            max_far: 2.5,
            max_height_ft: 60.0,
            setbacks: Setbacks::default(),
            min_parking_ratio: 1.5,
            current_use: CurrentUse::Vacant,
            zoning_code: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Studio,
    #[serde(rename = "1br")]
    OneBedroom,
    #[serde(rename = "2br")]
    TwoBedroom,
    #[serde(rename = "3br")]
    ThreeBedroom,
    Retail,
    Office,
}

impl UnitType {
    pub fn is_commercial(self) -> bool {
        matches!(self, UnitType::Retail | UnitType::Office)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            UnitType::Studio => "Studio",
            UnitType::OneBedroom => "1 Bedroom",
            UnitType::TwoBedroom => "2 Bedroom",
            UnitType::ThreeBedroom => "3 Bedroom",
            UnitType::Retail => "Retail Space",
            UnitType::Office => "Office Space",
        }
    }
}

/// One line of the unit mix. Lines of the same type are kept separate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub unit_type: UnitType,
    #[serde(default)]
    pub size_sqft: f64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub monthly_rent: f64,
}

impl UnitSpec {
    pub fn is_commercial(&self) -> bool {
        self.unit_type.is_commercial()
    }

    pub fn area_sqft(&self) -> f64 {
        self.size_sqft * f64::from(self.quantity)
    }

    pub fn annual_rent(&self) -> f64 {
        self.monthly_rent * 12.0 * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonAreas {
    pub lobby_sqft: f64,
    pub amenity_sqft: f64,
    pub circulation_sqft: f64,
}

impl CommonAreas {
    pub fn total_sqft(&self) -> f64 {
        self.lobby_sqft + self.amenity_sqft + self.circulation_sqft
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeAssumptions {
    pub vacancy_rate_pct: f64,
    /// Annual income outside the rent roll (parking, laundry, ...).
    pub other_income: f64,
}

impl Default for IncomeAssumptions {
    fn default() -> Self {
        Self {
            vacancy_rate_pct: 5.0,
            other_income: 0.0,
        }
    }
}

/// Annual operating expense line items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseAssumptions {
    #[serde(alias = "property_taxes")]
    pub taxes: f64,
    pub insurance: f64,
    pub utilities: f64,
    #[serde(alias = "repairs_maintenance")]
    pub repairs: f64,
    pub other_expenses: f64,
    pub property_management_pct: f64,
}

impl Default for ExpenseAssumptions {
    fn default() -> Self {
        Self {
            taxes: 0.0,
            insurance: 0.0,
            utilities: 0.0,
            repairs: 0.0,
            other_expenses: 0.0,
            property_management_pct: 3.0,
        }
    }
}

/// Unit-cost and percentage assumptions for the development budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevelopmentAssumptions {
    pub land_cost_per_sqft: f64,
    pub residential_cost_per_sqft: f64,
    pub commercial_cost_per_sqft: f64,
    pub common_area_cost_per_sqft: f64,
    pub soft_costs_pct: f64,
    pub development_fee_pct: f64,
    pub contingency_pct: f64,
    pub financing_costs_pct: f64,
}

impl Default for DevelopmentAssumptions {
    fn default() -> Self {
        Self {
            land_cost_per_sqft: 100.0,
            residential_cost_per_sqft: 250.0,
            commercial_cost_per_sqft: 200.0,
            common_area_cost_per_sqft: 180.0,
            soft_costs_pct: 20.0,
            development_fee_pct: 5.0,
            contingency_pct: 10.0,
            financing_costs_pct: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProformaSettings {
    pub projection_years: u32,
    pub rent_growth_pct: f64,
    pub expense_growth_pct: f64,
    pub exit_cap_rate_pct: f64,
    pub discount_rate_pct: f64,
}

impl Default for ProformaSettings {
    fn default() -> Self {
        Self {
            projection_years: 5,
            rent_growth_pct: 3.0,
            expense_growth_pct: 2.0,
            exit_cap_rate_pct: 5.5,
            discount_rate_pct: 7.0,
        }
    }
}
