use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use vitalog_data::models::HealthRecord;

/// Confirmation returned after a successful submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitResponse {
    /// Confirmation message
    pub message: String,

    /// Id of the newly stored record
    pub data_id: i64,
}

/// Public representation of a stored health record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthDataResponse {
    /// Record identifier
    pub id: i64,

    /// Weight in kilograms
    pub weight: f64,

    /// Normalized blood pressure string
    pub bp: String,

    /// Glucose level
    pub glucose: f64,

    /// When the record was created
    pub timestamp: DateTime<Utc>,
}

impl From<HealthRecord> for HealthDataResponse {
    fn from(record: HealthRecord) -> Self {
        Self {
            id: record.id,
            weight: record.weight,
            bp: record.bp,
            glucose: record.glucose,
            timestamp: record.timestamp,
        }
    }
}
