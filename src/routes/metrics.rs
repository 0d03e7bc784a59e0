use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use prometheus::{Encoder, TextEncoder};

use crate::metrics::REGISTRY;

/// Session metrics followed by the process-wide default registry.
pub async fn metrics_handler() -> Response {
    let mut body = encode(&REGISTRY.gather(), "session");
    body.push_str(&encode(&prometheus::gather(), "prometheus"));

    (StatusCode::OK, body).into_response()
}

fn encode(metric_families: &[prometheus::proto::MetricFamily], source: &str) -> String {
    let mut buffer = Vec::new();
    if let Err(error) = TextEncoder::new().encode(metric_families, &mut buffer) {
        log::error!("Could not encode {source} metrics. Error: '{error}'.");
    }
    String::from_utf8(buffer).unwrap_or_else(|error| {
        log::error!("The {source} metrics are not valid UTF-8. Error: '{error}'.");
        String::default()
    })
}
