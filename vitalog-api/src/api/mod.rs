pub mod auth;
pub mod handlers;
pub mod routes;

use std::sync::Arc;

use vitalog_data::repository::UserDirectory;
use vitalog_domain::auth::TokenCodec;
use vitalog_domain::services::HealthDataServiceTrait;

/// Per-process collaborators handed to every request.
///
/// Constructed once by the hosting layer (the binary or a test harness)
/// and threaded down explicitly; there is no global state.
#[derive(Clone)]
pub struct AppState {
    /// Health data business logic
    pub service: Arc<dyn HealthDataServiceTrait + Send + Sync>,

    /// Resolves token subjects to existing users
    pub users: Arc<dyn UserDirectory + Send + Sync>,

    /// Verifies bearer tokens
    pub codec: Arc<dyn TokenCodec + Send + Sync>,
}
