// vitalog-api lib.rs
//
// Public API layer for the Vitalog service: router, middleware,
// request/response entities, and the OpenAPI document.

// Public modules
pub mod api;
pub mod entities;
pub mod openapi;
