use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{error, info, instrument, warn};

use vitalog_data::models::User;
use vitalog_domain::services::HealthDataServiceError;
use vitalog_domain::validation::HealthDataSubmission;

use crate::api::AppState;
use crate::entities::common::ErrorResponse;
use crate::entities::health_data::{HealthDataResponse, SubmitResponse};

/// Record a new health measurement for the authenticated patient
#[utoipa::path(
    post,
    path = "/healthdata/",
    request_body = HealthDataSubmission,
    responses(
        (status = 201, description = "Health data recorded", body = SubmitResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 422, description = "One or more fields failed validation", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("bearer" = [])
    ),
    tag = "healthdata"
)]
#[instrument(skip(state, submission))]
pub async fn submit_health_data(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(submission): Json<HealthDataSubmission>,
) -> Result<impl IntoResponse, ErrorResponse> {
    match state.service.submit(user.id, submission).await {
        Ok(record) => {
            info!("Recorded health data {} for patient {}", record.id, user.id);
            Ok((
                StatusCode::CREATED,
                Json(SubmitResponse {
                    message: "Health data recorded".to_string(),
                    data_id: record.id,
                }),
            ))
        }
        Err(HealthDataServiceError::Validation(errors)) => {
            warn!(
                "Rejected health data submission from patient {}: {} invalid field(s)",
                user.id,
                errors.len()
            );
            Err(ErrorResponse::validation_error(errors))
        }
        Err(e) => {
            error!("Failed to record health data: {}", e);
            Err(ErrorResponse::internal_error())
        }
    }
}

/// List the authenticated patient's health records.
///
/// The order of the returned records is unspecified; callers must not
/// rely on insertion order.
#[utoipa::path(
    get,
    path = "/healthdata/",
    responses(
        (status = 200, description = "The caller's health records", body = [HealthDataResponse]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("bearer" = [])
    ),
    tag = "healthdata"
)]
#[instrument(skip(state))]
pub async fn list_health_data(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, ErrorResponse> {
    match state.service.list_for_patient(user.id).await {
        Ok(records) => {
            let records: Vec<HealthDataResponse> =
                records.into_iter().map(HealthDataResponse::from).collect();
            Ok((StatusCode::OK, Json(records)))
        }
        Err(e) => {
            error!("Failed to list health data for patient {}: {}", user.id, e);
            Err(ErrorResponse::internal_error())
        }
    }
}
