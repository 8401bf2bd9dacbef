//! # API Shared
//!
//! Shared definitions for the symptom checker's outward surfaces.
//!
//! Contains:
//! - Request/response types (`types` module) with OpenAPI schemas
//! - Conversions from core results into those types
//! - `HealthService`
//!
//! Used by `api-rest` and by the CLI's `--json` output.

pub mod health;
pub mod types;

pub use health::HealthService;
pub use types::*;
