use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

use crate::validation::{validate_submission, FieldError, HealthDataSubmission};
use vitalog_data::models::{HealthRecord, NewHealthRecord};
use vitalog_data::repository::HealthRecordRepositoryTrait;

/// Health data service errors
#[derive(Debug, Error)]
pub enum HealthDataServiceError {
    /// One or more submitted fields failed validation
    #[error("Invalid health data submission")]
    Validation(Vec<FieldError>),

    /// The persistence layer failed; not retried
    #[error("Repository error: {0}")]
    Repository(String),
}

/// Trait for health data operations
#[async_trait]
pub trait HealthDataServiceTrait {
    /// Validate a submission and persist it for the given patient
    async fn submit(
        &self,
        patient_id: i64,
        submission: HealthDataSubmission,
    ) -> Result<HealthRecord, HealthDataServiceError>;

    /// All records belonging to the given patient, order unspecified
    async fn list_for_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<HealthRecord>, HealthDataServiceError>;
}

/// Health data service wired to a record repository
pub struct HealthDataService<R: HealthRecordRepositoryTrait> {
    repository: R,
}

impl<R: HealthRecordRepositoryTrait> HealthDataService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: HealthRecordRepositoryTrait + Send + Sync> HealthDataServiceTrait for HealthDataService<R> {
    async fn submit(
        &self,
        patient_id: i64,
        submission: HealthDataSubmission,
    ) -> Result<HealthRecord, HealthDataServiceError> {
        // Every field is checked before anything touches the repository
        let validated =
            validate_submission(&submission).map_err(HealthDataServiceError::Validation)?;

        let record = self
            .repository
            .insert(NewHealthRecord {
                patient_id,
                weight: validated.weight,
                bp: validated.bp,
                glucose: validated.glucose,
            })
            .await
            .map_err(|e| {
                error!("Failed to store health record: {}", e);
                HealthDataServiceError::Repository(e.to_string())
            })?;

        info!(
            "Health record {} stored for patient {}",
            record.id, record.patient_id
        );
        Ok(record)
    }

    async fn list_for_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<HealthRecord>, HealthDataServiceError> {
        self.repository
            .list_for_patient(patient_id)
            .await
            .map_err(|e| {
                error!("Failed to list health records: {}", e);
                HealthDataServiceError::Repository(e.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalog_data::repository::InMemoryHealthRecordRepository;

    fn service() -> HealthDataService<InMemoryHealthRecordRepository> {
        HealthDataService::new(InMemoryHealthRecordRepository::new())
    }

    fn submission(weight: f64, bp: &str, glucose: f64) -> HealthDataSubmission {
        HealthDataSubmission {
            weight,
            bp: bp.to_string(),
            glucose,
        }
    }

    #[tokio::test]
    async fn test_submit_stores_normalized_values() {
        let service = service();

        let record = service
            .submit(3, submission(70.456, "1 20/ 80", 5.678))
            .await
            .unwrap();

        assert_eq!(record.patient_id, 3);
        assert_eq!(record.weight, 70.46);
        assert_eq!(record.bp, "120/80");
        assert_eq!(record.glucose, 5.68);
        assert!(record.id > 0);
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_fields_without_persisting() {
        let service = service();

        let err = service
            .submit(3, submission(-1.0, "120/80", 5.5))
            .await
            .unwrap_err();

        match err {
            HealthDataServiceError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "weight");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }

        // Nothing was written
        assert!(service.list_for_patient(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_returns_only_own_records() {
        let service = service();

        service
            .submit(1, submission(70.0, "120/80", 5.0))
            .await
            .unwrap();
        service
            .submit(2, submission(80.0, "130/85", 6.0))
            .await
            .unwrap();

        let mine = service.list_for_patient(1).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].weight, 70.0);

        assert!(service.list_for_patient(99).await.unwrap().is_empty());
    }
}
