use axum::http::StatusCode;

/// Liveness probe.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe. The service has no warm-up, so it is ready once it serves.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
