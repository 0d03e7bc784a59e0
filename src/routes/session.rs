use std::sync::Arc;

use axum::extract::{Path, State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::client::actor::ClientActor;
use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::session_factory::actor_client::SessionFactoryClient;
use crate::websocket::send_error_and_close;

#[derive(Deserialize, Default)]
pub struct CreateSessionRequest {
    profile: Option<String>,
}

#[derive(Serialize)]
pub struct CreateSessionResponse {
    id: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    r#type: String,
    detail: String,
}

pub async fn create(
    State(session_factory): State<Arc<SessionFactoryClient>>,
    request: Option<Json<CreateSessionRequest>>,
) -> Response {
    let request = request.map(|Json(request)| request).unwrap_or_default();
    match session_factory.create_session(request.profile.as_deref()).await {
        Ok(id) => (StatusCode::OK, Json(CreateSessionResponse { id })).into_response(),
        Err(error) => error_response(error),
    }
}

pub async fn connect_client_to_websocket(
    State(session_factory): State<Arc<SessionFactoryClient>>,
    Path(session_id): Path<String>,
    websocket_upgrade: WebSocketUpgrade,
) -> Response {
    websocket_upgrade.on_upgrade(move |websocket| async move {
        match session_factory.get_session(&session_id).await {
            Ok(session) => ClientActor::create(session_id, session, websocket).await,
            Err(error) => send_error_and_close(websocket, &error).await,
        }
    })
}

fn error_response(error: Error) -> Response {
    let (status, r#type) = match &error {
        Error::Domain(DomainError::SessionDoesNotExist(_)) => {
            (StatusCode::NOT_FOUND, "SESSION_DOES_NOT_EXIST")
        }
        Error::Domain(_) => (StatusCode::BAD_REQUEST, "DOMAIN"),
        Error::Storage(_) => (StatusCode::SERVICE_UNAVAILABLE, "STORAGE"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER"),
    };
    (
        status,
        Json(ErrorResponse {
            r#type: r#type.to_string(),
            detail: error.to_string(),
        }),
    )
        .into_response()
}
