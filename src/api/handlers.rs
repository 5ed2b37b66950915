//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::{debug, error};

use super::AppState;
use super::types::{AllocateRequest, ErrorResponse, HealthResponse};
use crate::config::FactorsConfig;
use crate::engine::{
    ENGINE_VERSION, FacilityInputs, FacilityResult, InputError, ZoneResult, allocate_to_zone,
    run_facility, zone_share,
};
use crate::portfolio::{Facility, PortfolioResult, run_portfolio, validate_facilities};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: String) -> ApiError {
    (status, Json(ErrorResponse { error }))
}

/// Joins every input error into one 400 response.
fn check_inputs(inputs: &FacilityInputs, prefix: &str) -> Result<(), ApiError> {
    let errors = inputs.validate();
    if errors.is_empty() {
        return Ok(());
    }
    Err(api_error(StatusCode::BAD_REQUEST, join_errors(&errors, prefix)))
}

fn join_errors(errors: &[InputError], prefix: &str) -> String {
    errors
        .iter()
        .map(|e| format!("{prefix}{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// `GET /health` → 200 + `HealthResponse`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        engine_version: ENGINE_VERSION.to_string(),
    })
}

/// `GET /factors` → 200 + `FactorsConfig`
pub async fn get_factors(State(state): State<Arc<AppState>>) -> Json<FactorsConfig> {
    Json(state.factors)
}

/// Runs the aggregator for one facility and audits the run when enabled.
///
/// `POST /calculate` → 200 + `FacilityResult`
/// invalid inputs → 400 + `ErrorResponse`
/// missing or unknown keys → 422
/// audit write failure → 500 + `ErrorResponse`
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    Json(inputs): Json<FacilityInputs>,
) -> Result<Json<FacilityResult>, ApiError> {
    check_inputs(&inputs, "")?;
    let result = run_facility(&inputs);

    if let Some(log) = &state.audit {
        let record = log.append("api", &result).map_err(|e| {
            error!("audit append failed: {e}");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
        debug!(run_id = %record.run_id, "calculation audited");
    }

    Ok(Json(result))
}

/// Evaluates a list of facilities in order.
///
/// `POST /portfolio` → 200 + `PortfolioResult`
/// invalid inputs, zones, sensors, or duplicate ids → 400 + `ErrorResponse`
pub async fn portfolio(
    Json(facilities): Json<Vec<Facility>>,
) -> Result<Json<PortfolioResult>, ApiError> {
    let errors = validate_facilities(&facilities);
    if !errors.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, join_errors(&errors, "")));
    }
    Ok(Json(run_portfolio(&facilities)))
}

/// Allocates one facility's result to a zone.
///
/// `POST /allocate` → 200 + `ZoneResult`
/// invalid inputs or zone area → 400 + `ErrorResponse`
pub async fn allocate(Json(req): Json<AllocateRequest>) -> Result<Json<ZoneResult>, ApiError> {
    check_inputs(&req.inputs, "inputs.")?;
    if !req.zone_area_m2.is_finite() || req.zone_area_m2 < 0.0 {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!(
                "zone_area_m2: must be a finite number >= 0, got {}",
                req.zone_area_m2
            ),
        ));
    }
    let total = req.inputs.floor_area_m2;
    zone_share(req.zone_area_m2, total)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;
    let result = run_facility(&req.inputs);
    Ok(Json(allocate_to_zone(
        &result,
        &req.zone_name,
        req.zone_area_m2,
        total,
    )))
}
