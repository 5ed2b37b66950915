//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::engine::FacilityInputs;

/// `GET /health` body.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Engine version string.
    pub engine_version: String,
}

/// `POST /allocate` body.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllocateRequest {
    /// Facility inputs.
    pub inputs: FacilityInputs,
    /// Zone label.
    pub zone_name: String,
    /// Zone floor area (m²).
    pub zone_area_m2: f64,
}

/// Error body returned with 4xx/5xx statuses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
