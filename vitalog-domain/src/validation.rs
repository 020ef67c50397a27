//! Input validation contract for health data submissions.
//!
//! Validation is an explicit function returning either the normalized
//! values or the full list of field errors; nothing is persisted until
//! every field has been checked. The three checks are independent of one
//! another.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Accepted systolic range, inclusive
const SYSTOLIC_RANGE: std::ops::RangeInclusive<u32> = 70..=250;
/// Accepted diastolic range, inclusive
const DIASTOLIC_RANGE: std::ops::RangeInclusive<u32> = 40..=150;

static BP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2,3}/\d{2,3}$").expect("blood pressure pattern"));

/// A candidate health data submission, as received from the caller
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthDataSubmission {
    /// Weight in kilograms
    pub weight: f64,

    /// Blood pressure as "systolic/diastolic"
    pub bp: String,

    /// Glucose level
    pub glucose: f64,
}

/// One failed field check, surfaced verbatim in 422 responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Name of the offending field
    pub field: String,

    /// Human-readable description of the failure
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Normalized measurement values ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMeasurements {
    /// Weight rounded to 2 decimal places
    pub weight: f64,

    /// Blood pressure with whitespace removed
    pub bp: String,

    /// Glucose rounded to 2 decimal places
    pub glucose: f64,
}

/// Round to 2 fraction digits, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Weight must be strictly positive; the accepted value is rounded.
pub fn validate_weight(weight: f64) -> Result<f64, FieldError> {
    if weight <= 0.0 {
        return Err(FieldError::new(
            "weight",
            "Weight must be a positive number",
        ));
    }
    Ok(round2(weight))
}

/// Glucose follows the same rule as weight.
pub fn validate_glucose(glucose: f64) -> Result<f64, FieldError> {
    if glucose <= 0.0 {
        return Err(FieldError::new(
            "glucose",
            "Glucose level must be a positive number",
        ));
    }
    Ok(round2(glucose))
}

/// Blood pressure must be `<2-3 digits>/<2-3 digits>` after whitespace
/// removal, with both components inside their clinical ranges. The
/// retained value is the normalized string.
pub fn validate_blood_pressure(bp: &str) -> Result<String, FieldError> {
    let normalized: String = bp.chars().filter(|c| !c.is_whitespace()).collect();

    if !BP_PATTERN.is_match(&normalized) {
        return Err(FieldError::new(
            "bp",
            "Blood pressure must be in format \"systolic/diastolic\" (e.g., 120/80)",
        ));
    }

    // The pattern guarantees two numeric components
    let (systolic, diastolic) = normalized
        .split_once('/')
        .expect("pattern-matched bp contains a slash");
    let systolic: u32 = systolic.parse().expect("pattern-matched digits");
    let diastolic: u32 = diastolic.parse().expect("pattern-matched digits");

    if !SYSTOLIC_RANGE.contains(&systolic) {
        return Err(FieldError::new(
            "bp",
            "Systolic pressure must be between 70 and 250",
        ));
    }

    if !DIASTOLIC_RANGE.contains(&diastolic) {
        return Err(FieldError::new(
            "bp",
            "Diastolic pressure must be between 40 and 150",
        ));
    }

    Ok(normalized)
}

/// Run all field checks, collecting every failure.
pub fn validate_submission(
    submission: &HealthDataSubmission,
) -> Result<ValidatedMeasurements, Vec<FieldError>> {
    let mut errors = Vec::new();

    let weight = validate_weight(submission.weight).map_err(|e| errors.push(e)).ok();
    let bp = validate_blood_pressure(&submission.bp)
        .map_err(|e| errors.push(e))
        .ok();
    let glucose = validate_glucose(submission.glucose)
        .map_err(|e| errors.push(e))
        .ok();

    match (weight, bp, glucose) {
        (Some(weight), Some(bp), Some(glucose)) => Ok(ValidatedMeasurements {
            weight,
            bp,
            glucose,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(weight: f64, bp: &str, glucose: f64) -> HealthDataSubmission {
        HealthDataSubmission {
            weight,
            bp: bp.to_string(),
            glucose,
        }
    }

    #[test]
    fn test_weight_must_be_positive() {
        assert!(validate_weight(0.0).is_err());
        assert!(validate_weight(-12.5).is_err());
        assert_eq!(validate_weight(70.0).unwrap(), 70.0);
    }

    #[test]
    fn test_weight_rounds_to_two_decimals() {
        assert_eq!(validate_weight(82.456).unwrap(), 82.46);
        assert_eq!(validate_weight(100.004).unwrap(), 100.0);
        assert_eq!(validate_weight(59.996).unwrap(), 60.0);
    }

    #[test]
    fn test_glucose_mirrors_weight_rule() {
        assert!(validate_glucose(0.0).is_err());
        assert!(validate_glucose(-1.0).is_err());
        assert_eq!(validate_glucose(5.678).unwrap(), 5.68);
    }

    #[test]
    fn test_bp_accepts_canonical_reading() {
        assert_eq!(validate_blood_pressure("120/80").unwrap(), "120/80");
        assert_eq!(validate_blood_pressure("95/65").unwrap(), "95/65");
    }

    #[test]
    fn test_bp_strips_embedded_whitespace() {
        assert_eq!(validate_blood_pressure("1 20/ 80").unwrap(), "120/80");
        assert_eq!(validate_blood_pressure(" 120 / 80 ").unwrap(), "120/80");
    }

    #[test]
    fn test_bp_rejects_malformed_strings() {
        for bad in ["120-80", "120", "120/", "/80", "1/80", "120/8", "1200/80", "a20/80", ""] {
            assert!(
                validate_blood_pressure(bad).is_err(),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_bp_range_boundaries() {
        // Systolic limits
        assert!(validate_blood_pressure("70/80").is_ok());
        assert!(validate_blood_pressure("250/80").is_ok());
        assert!(validate_blood_pressure("69/80").is_err());
        assert!(validate_blood_pressure("60/80").is_err());

        // Diastolic limits
        assert!(validate_blood_pressure("120/40").is_ok());
        assert!(validate_blood_pressure("120/150").is_ok());
        assert!(validate_blood_pressure("120/39").is_err());
        assert!(validate_blood_pressure("120/30").is_err());
    }

    #[test]
    fn test_bp_error_names_offending_component() {
        let err = validate_blood_pressure("60/80").unwrap_err();
        assert!(err.message.contains("Systolic"));

        let err = validate_blood_pressure("120/30").unwrap_err();
        assert!(err.message.contains("Diastolic"));
    }

    #[test]
    fn test_submission_happy_path() {
        let validated = validate_submission(&submission(70.456, "1 20/ 80", 5.5)).unwrap();
        assert_eq!(validated.weight, 70.46);
        assert_eq!(validated.bp, "120/80");
        assert_eq!(validated.glucose, 5.5);
    }

    #[test]
    fn test_submission_collects_all_field_errors() {
        let errors = validate_submission(&submission(-1.0, "120-80", 0.0)).unwrap_err();
        assert_eq!(errors.len(), 3);

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"weight"));
        assert!(fields.contains(&"bp"));
        assert!(fields.contains(&"glucose"));
    }

    #[test]
    fn test_submission_single_failure_keeps_other_fields_out() {
        let errors = validate_submission(&submission(70.0, "120/30", 5.5)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "bp");
    }
}
