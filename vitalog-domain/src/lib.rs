// Vitalog domain layer
// Business logic: authentication, measurement validation, and the
// health-data service

// Authentication
pub mod auth;

// Input validation contract
pub mod validation;

// Services that implement business logic
pub mod services;

// Re-export the data layer for convenience
pub use vitalog_data as data;
