//! # API Shared
//!
//! Shared request/response types and services for the qform APIs.
//!
//! Contains:
//! - Wire types with OpenAPI schemas (`dto` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
