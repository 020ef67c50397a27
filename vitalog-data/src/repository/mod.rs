// Repository module structure
pub mod errors;
mod health_records;
mod users;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use health_records::{
    HealthRecordRepositoryTrait, InMemoryHealthRecordRepository, SqliteHealthRecordRepository,
};
pub use users::{InMemoryUserDirectory, SqliteUserDirectory, UserDirectory};
