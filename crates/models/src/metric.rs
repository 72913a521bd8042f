use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a metric has no numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedReason {
    /// The parcel has no existing floor area, so a relative FAR increase is meaningless.
    VacantLand,
    /// Nothing is built, so utilization of the allowed area has nothing to measure.
    NoBuildingArea,
    ZeroDenominator,
    /// An operand or the quotient overflowed or is not a number.
    NotFinite,
}

/// A derived figure that is either a number or explicitly undefined.
///
/// Serialized as a bare number, or as the reason string (`"vacant_land"`,
/// `"no_building_area"`, `"zero_denominator"`, `"not_finite"`), so consumers can
/// render "N/A" instead of 0, `inf` or `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Value(f64),
    Undefined(UndefinedReason),
}

impl Metric {
    /// `numerator / denominator`, undefined when the denominator is exactly zero
    /// or when any operand or the quotient is not finite.
    pub fn ratio(numerator: f64, denominator: f64) -> Self {
        if !numerator.is_finite() || !denominator.is_finite() {
            return Metric::Undefined(UndefinedReason::NotFinite);
        }
        if denominator == 0.0 {
            return Metric::Undefined(UndefinedReason::ZeroDenominator);
        }
        let quotient = numerator / denominator;
        if quotient.is_finite() {
            Metric::Value(quotient)
        } else {
            Metric::Undefined(UndefinedReason::NotFinite)
        }
    }

    /// `numerator / denominator * 100`, undefined under the same rules as [`Metric::ratio`].
    pub fn percent(numerator: f64, denominator: f64) -> Self {
        match Self::ratio(numerator, denominator).map(|v| v * 100.0) {
            Metric::Value(v) if !v.is_finite() => Metric::Undefined(UndefinedReason::NotFinite),
            m => m,
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Metric::Value(v) => Some(v),
            Metric::Undefined(_) => None,
        }
    }

    pub fn is_undefined(self) -> bool {
        matches!(self, Metric::Undefined(_))
    }

    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Metric::Value(v) => Metric::Value(f(v)),
            undefined => undefined,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Value(v) => write!(f, "{v:.2}"),
            Metric::Undefined(UndefinedReason::VacantLand) => write!(f, "N/A (vacant land)"),
            Metric::Undefined(UndefinedReason::NoBuildingArea) => write!(f, "N/A (nothing built)"),
            Metric::Undefined(UndefinedReason::ZeroDenominator | UndefinedReason::NotFinite) => {
                write!(f, "N/A")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_zero_denominator_is_undefined() {
        let m = Metric::ratio(10.0, 0.0);
        assert_eq!(m, Metric::Undefined(UndefinedReason::ZeroDenominator));
        assert!(m.value().is_none());
        assert_eq!(m.to_string(), "N/A");
    }

    #[test]
    fn test_tiny_denominator_is_still_a_value() {
        let v = Metric::ratio(1.0, 1e-17).value().unwrap();
        assert!((v / 1e17 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_operands_never_become_values() {
        let nan = Metric::ratio(f64::NAN, 2.0);
        assert_eq!(nan, Metric::Undefined(UndefinedReason::NotFinite));
        assert_eq!(
            Metric::ratio(1.0, f64::INFINITY),
            Metric::Undefined(UndefinedReason::NotFinite)
        );
        assert_eq!(
            Metric::ratio(f64::MAX, 1e-300),
            Metric::Undefined(UndefinedReason::NotFinite)
        );
        assert_eq!(
            Metric::percent(f64::MAX, 1.0),
            Metric::Undefined(UndefinedReason::NotFinite)
        );
        assert_eq!(serde_json::to_string(&nan).unwrap(), "\"not_finite\"");
        assert_eq!(nan.to_string(), "N/A");
    }

    #[test]
    fn test_percent_scales_value() {
        let m = Metric::percent(25.0, 200.0);
        assert_eq!(m, Metric::Value(12.5));
        assert_eq!(m.to_string(), "12.50");
    }

    #[test]
    fn test_serializes_number_or_reason() {
        let v = serde_json::to_string(&Metric::Value(1.5)).unwrap();
        assert_eq!(v, "1.5");

        let u = serde_json::to_string(&Metric::Undefined(UndefinedReason::VacantLand)).unwrap();
        assert_eq!(u, "\"vacant_land\"");

        let back: Metric = serde_json::from_str("\"zero_denominator\"").unwrap();
        assert_eq!(back, Metric::Undefined(UndefinedReason::ZeroDenominator));
    }

    #[test]
    fn test_map_keeps_undefined() {
        let m = Metric::Undefined(UndefinedReason::VacantLand).map(|v| v * 2.0);
        assert!(m.is_undefined());
    }
}
