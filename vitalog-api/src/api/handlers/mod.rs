// Request handlers

pub mod health;
pub mod health_data;
