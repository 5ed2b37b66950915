//! REST API over the calculation engine.
//!
//! - `GET /health` — liveness and engine version
//! - `GET /factors` — emission factors the server was started with
//! - `POST /calculate` — one facility, optionally audited
//! - `POST /portfolio` — list of facilities with totals
//! - `POST /allocate` — one facility allocated to a zone

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::audit::AuditLog;
use crate::config::FactorsConfig;

pub use types::{AllocateRequest, ErrorResponse, HealthResponse};

/// Application state shared across all request handlers.
///
/// Built once at startup and wrapped in `Arc`. The audit log serializes its
/// own appends.
pub struct AppState {
    /// Factors reported by `/factors`.
    pub factors: FactorsConfig,
    /// Audit log for `/calculate`; `None` disables auditing.
    pub audit: Option<AuditLog>,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/factors", get(handlers::get_factors))
        .route("/calculate", post(handlers::calculate))
        .route("/portfolio", post(handlers::portfolio))
        .route("/allocate", post(handlers::allocate))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process stops.
///
/// # Errors
///
/// Returns an I/O error if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
