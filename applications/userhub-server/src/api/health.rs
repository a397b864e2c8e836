/// Liveness route
use axum::Json;
use serde::Serialize;

/// Body of `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process is serving requests
    pub status: &'static str,
    /// Crate version of the running binary
    pub version: &'static str,
}

/// GET /health
///
/// Answers as long as the router is up. The store is not consulted, so an
/// unreachable database still reports `ok` here and shows up as 500s on the
/// `/users` routes instead.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
