use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Sender as OneshotSender};

use crate::error::Error;
use crate::session::actor_client::SessionClient;
use crate::session_factory::actor::{SessionFactoryCommand, SessionFactoryResponse};

/// Handle to the SessionFactory actor, shared by the routes and by every running session.
pub struct SessionFactoryClient {
    pub(super) session_factory_tx: Sender<SessionFactoryCommand>,
}

impl SessionFactoryClient {
    /// Opens a session on `profile`, or on the default profile. Returns the new session id.
    pub async fn create_session(&self, profile: Option<&str>) -> Result<String, Error> {
        let response = self
            .request(|response_channel| SessionFactoryCommand::CreateSession {
                profile: profile.map(str::to_string),
                response_channel,
            })
            .await?;

        match response {
            SessionFactoryResponse::SessionCreated { session_id } => Ok(session_id),
            unexpected => Err(SessionFactoryClient::unexpected_response(unexpected)),
        }
    }

    pub async fn get_session(&self, session_id: &str) -> Result<SessionClient, Error> {
        let response = self
            .request(|response_channel| SessionFactoryCommand::GetSessionActor {
                session_id: session_id.to_string(),
                response_channel,
            })
            .await?;

        match response {
            SessionFactoryResponse::SessionActor { session } => Ok(session),
            unexpected => Err(SessionFactoryClient::unexpected_response(unexpected)),
        }
    }

    /// Called by a session on its way out, no answer is awaited.
    pub async fn remove_session(&self, session_id: &str) -> Result<(), Error> {
        self.session_factory_tx
            .send(SessionFactoryCommand::RemoveSession {
                session_id: session_id.to_string(),
            })
            .await
            .map_err(|_| {
                Error::log_and_create_internal(&format!(
                    "Session {session_id} stopped but the SessionFactory is already gone."
                ))
            })
    }

    async fn request<F>(&self, command: F) -> Result<SessionFactoryResponse, Error>
    where
        F: FnOnce(OneshotSender<SessionFactoryResponse>) -> SessionFactoryCommand,
    {
        let (response_tx, response_rx) = oneshot::channel();
        self.session_factory_tx
            .send(command(response_tx))
            .await
            .map_err(|error| {
                Error::log_and_create_internal(&format!(
                    "The SessionFactory is not alive. Command: '{:?}'.",
                    error.0
                ))
            })?;

        match response_rx.await {
            Ok(SessionFactoryResponse::Error { error }) => Err(error),
            Ok(response) => Ok(response),
            Err(_) => Err(Error::log_and_create_internal(
                "The SessionFactory dropped a request without answering it.",
            )),
        }
    }

    fn unexpected_response(response: SessionFactoryResponse) -> Error {
        Error::log_and_create_internal(&format!(
            "Received an unexpected SessionFactoryResponse. SessionFactoryResponse: '{response}'."
        ))
    }
}
