// Domain services

mod health_data;

pub use health_data::{HealthDataService, HealthDataServiceError, HealthDataServiceTrait};
