// Storage models shared by the repository implementations

mod health_record;
mod user;

pub use health_record::{HealthRecord, NewHealthRecord};
pub use user::User;
