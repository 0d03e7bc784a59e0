pub mod message;

use axum::extract::ws::{Message, WebSocket};
use serde::Serialize;

use crate::error::domain_error::DomainError;
use crate::error::Error;
use message::{WsMessageIn, WsMessageOut};

pub async fn send_error_and_close(mut websocket: WebSocket, error: &Error) {
    send_error(&mut websocket, error).await;
    close(websocket).await;
}

pub async fn send_error(websocket: &mut WebSocket, error: &Error) {
    // The client may already be gone, there is nobody left to tell
    let _ = send_message(websocket, &error_to_ws_error(error)).await;
}

pub async fn close(websocket: WebSocket) {
    if let Err(error) = websocket.close().await {
        log::debug!("Could not close the WebSocket. Error: '{error}'.")
    }
}

pub fn parse_message(message: &str) -> Result<WsMessageIn, Error> {
    serde_json::from_str(message).map_err(|error| {
        log::warn!("Unprocessable message. Message: '{message}', Error: '{error}'.");
        Error::UnprocessableMessage(error.to_string(), message.to_string())
    })
}

pub async fn send_message<T>(websocket: &mut WebSocket, value: &T) -> Result<(), Error>
where
    T: ?Sized + Serialize,
{
    let message = serde_json::to_string(value).map_err(|error| {
        Error::log_and_create_internal(&format!(
            "Could not serialize the message. Error: '{error}'."
        ))
    })?;

    send_message_string(websocket, &message).await
}

pub async fn send_message_string(websocket: &mut WebSocket, message: &str) -> Result<(), Error> {
    websocket
        .send(Message::Text(message.to_string()))
        .await
        .map_err(|error| Error::WebsocketClosed(error.to_string()))
}

fn error_to_ws_error(error: &Error) -> WsMessageOut {
    let (r#type, title) = match error {
        Error::Domain(DomainError::RoundNotInProgress(_)) => {
            ("ROUND_NOT_IN_PROGRESS", "There is no round in progress")
        }
        Error::Domain(DomainError::InvalidWordCount(_, _, _)) => {
            ("INVALID_WORD_COUNT", "Invalid amount of words")
        }
        Error::Domain(DomainError::EmptyPlayerName) => {
            ("EMPTY_PLAYER_NAME", "The player name is empty")
        }
        Error::Domain(DomainError::PlayersNotRegistered) => {
            ("PLAYERS_NOT_REGISTERED", "The players are not registered")
        }
        Error::Domain(DomainError::SessionDoesNotExist(_)) => {
            ("SESSION_DOES_NOT_EXIST", "The session does not exist")
        }
        Error::Internal(_) => ("INTERNAL_SERVER", "Internal Server error"),
        Error::Storage(_) => ("STORAGE", "The scores could not be stored"),
        Error::WordSource(_) => ("WORD_SOURCE", "The word list is unavailable"),
        Error::UnprocessableMessage(_, _) => {
            ("UNPROCESSABLE_WEBSOCKET_MESSAGE", "The message could not be processed")
        }
        Error::WebsocketClosed(_) => ("WEBSOCKET_CLOSED", "The client websocket is closed"),
    };

    WsMessageOut::Error {
        r#type: r#type.to_string(),
        title: title.to_string(),
        detail: error.to_string(),
    }
}
