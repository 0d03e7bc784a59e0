use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::session_factory::actor_client::SessionFactoryClient;

mod health;
mod metrics;
mod session;

pub fn create_router(config: &Config) -> Router<Arc<SessionFactoryClient>> {
    Router::new()
        .route("/health", get(health::get))
        .route("/metrics", get(metrics::metrics_handler))
        .route("/session", post(session::create))
        .route(
            "/session/:session_id/ws",
            get(session::connect_client_to_websocket),
        )
        .layer(if config.allow_cors {
            log::info!("CorsLayer Permissive");
            CorsLayer::permissive()
        } else {
            CorsLayer::default()
        })
}
