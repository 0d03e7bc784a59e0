use axum::http::StatusCode;

/// Liveness probe, answers as long as the server accepts connections.
pub async fn get() -> (StatusCode, &'static str) {
    (StatusCode::OK, "healthy")
}
