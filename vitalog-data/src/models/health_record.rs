use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored health measurement owned by a single patient.
///
/// Records are written once at submission time and never updated or
/// deleted by this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    /// System-assigned identifier
    pub id: i64,

    /// Id of the patient who submitted the record
    pub patient_id: i64,

    /// Weight in kilograms, rounded to 2 decimal places
    pub weight: f64,

    /// Normalized blood pressure string, "systolic/diastolic"
    pub bp: String,

    /// Glucose level, rounded to 2 decimal places
    pub glucose: f64,

    /// System-assigned creation time
    pub timestamp: DateTime<Utc>,
}

/// Payload for inserting a new health record.
///
/// The measurement fields are expected to be already validated and
/// normalized; id and timestamp are assigned by the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHealthRecord {
    /// Id of the submitting patient
    pub patient_id: i64,

    /// Weight in kilograms
    pub weight: f64,

    /// Normalized blood pressure string
    pub bp: String,

    /// Glucose level
    pub glucose: f64,
}
