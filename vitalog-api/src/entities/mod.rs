// Public entities for the Vitalog API
// Data structures crossing the HTTP boundary

// Health data request/response types
pub mod health_data;

// Common error envelope
pub mod common;
