use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeasibilityError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeasibilityError {
    #[error("Invalid input `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },
}

impl FeasibilityError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FeasibilityError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending input field.
    pub fn field(&self) -> &str {
        match self {
            FeasibilityError::InvalidInput { field, .. } => field,
        }
    }
}

pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FeasibilityError::invalid(field, format!("must be a finite number, got {value}")))
    }
}

pub(crate) fn ensure_positive(field: &str, value: f64) -> Result<f64> {
    ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(FeasibilityError::invalid(field, format!("must be greater than 0, got {value}")))
    }
}

pub(crate) fn ensure_non_negative(field: &str, value: f64) -> Result<f64> {
    ensure_finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(FeasibilityError::invalid(field, format!("must not be negative, got {value}")))
    }
}

pub(crate) fn ensure_percentage(field: &str, value: f64) -> Result<f64> {
    ensure_non_negative(field, value)?;
    if value <= 100.0 {
        Ok(value)
    } else {
        Err(FeasibilityError::invalid(field, format!("must be between 0 and 100, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_names_field() {
        let err = ensure_positive("parcel.lot_size_sqft", 0.0).unwrap_err();
        assert_eq!(err.field(), "parcel.lot_size_sqft");
        assert_eq!(
            err.to_string(),
            "Invalid input `parcel.lot_size_sqft`: must be greater than 0, got 0"
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(ensure_non_negative("x", f64::NAN).is_err());
        assert!(ensure_positive("x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_percentage_bounds() {
        assert_eq!(ensure_percentage("v", 0.0), Ok(0.0));
        assert_eq!(ensure_percentage("v", 100.0), Ok(100.0));
        assert!(ensure_percentage("v", 100.5).is_err());
        assert!(ensure_percentage("v", -1.0).is_err());
    }
}
