// Vitalog data layer
// This crate handles persistence for health records and user lookup

// Database connection management
pub mod database;

// Repository implementations for data access
pub mod repository;

// Storage models
pub mod models;
