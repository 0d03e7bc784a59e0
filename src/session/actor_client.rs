use tokio::sync::broadcast;
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Receiver as OneshotReceiver, Sender as OneshotSender};

use crate::error::Error;
use crate::session::actor::{SessionCommand, SessionEvent, SessionWideEvent};

#[derive(Clone, Debug)]
pub struct SessionClient {
    pub(super) session_tx: Sender<SessionCommand>,
}

impl SessionClient {
    pub async fn attach(&self) -> Result<SessionWideEventReceiver, Error> {
        let (tx, rx): (OneshotSender<SessionEvent>, OneshotReceiver<SessionEvent>) =
            oneshot::channel();

        self.session_tx
            .send(SessionCommand::Attach { response_tx: tx })
            .await
            // The session is still listed in the factory but its actor already stopped
            .map_err(|error| {
                Error::log_and_create_internal(&format!(
                    "The Session is not alive. Can't attach a client. Error: '{error}'"
                ))
            })?;

        match rx.await {
            Ok(SessionEvent::Attached { broadcast_rx }) => {
                Ok(SessionWideEventReceiver { broadcast_rx })
            }
            Ok(SessionEvent::Error { error }) => Err(error),
            _ => Err(Error::log_and_create_internal(
                "Client sent a SessionCommand::Attach to Session, but Session channel died.",
            )),
        }
    }

    pub async fn detach(&self) -> Result<(), Error> {
        self.session_tx
            .send(SessionCommand::Detach)
            .await
            .map_err(|error| Error::log_and_create_internal(&format!("Tried to send SessionCommand::Detach but SessionActor is not listening. Error: {error}.")))
    }

    pub async fn register_players(&self, player1: &str, player2: Option<&str>) -> Result<(), Error> {
        self.request(|response_tx| SessionCommand::RegisterPlayers {
            player1: player1.to_string(),
            player2: player2.map(str::to_string),
            response_tx,
        })
        .await
    }

    pub async fn new_round(&self, word_count: usize) -> Result<(), Error> {
        self.request(|response_tx| SessionCommand::NewRound {
            word_count,
            response_tx,
        })
        .await
    }

    pub async fn guess(&self, text: &str) -> Result<(), Error> {
        self.request(|response_tx| SessionCommand::Guess {
            text: text.to_string(),
            response_tx,
        })
        .await
    }

    pub async fn end_round(&self) -> Result<(), Error> {
        self.request(|response_tx| SessionCommand::EndRound { response_tx })
            .await
    }

    pub async fn reset(&self) -> Result<(), Error> {
        self.request(|response_tx| SessionCommand::Reset { response_tx })
            .await
    }

    async fn request<F>(&self, command: F) -> Result<(), Error>
    where
        F: FnOnce(OneshotSender<SessionEvent>) -> SessionCommand,
    {
        let (tx, rx): (OneshotSender<SessionEvent>, OneshotReceiver<SessionEvent>) =
            oneshot::channel();

        self.session_tx.send(command(tx)).await.map_err(|error| {
            Error::log_and_create_internal(&format!(
                "Tried to send a SessionCommand but SessionActor is not listening. Error: {error}."
            ))
        })?;

        match rx.await {
            Ok(SessionEvent::Ok) => Ok(()),
            Ok(SessionEvent::Error { error }) => Err(error),
            Ok(unexpected_event) => Err(Error::log_and_create_internal(&format!(
                "Received an unexpected SessionEvent. SessionEvent: '{unexpected_event}'."
            ))),
            Err(_) => Err(Error::log_and_create_internal(
                "Sent a command to the Session actor, but the actor channel died.",
            )),
        }
    }
}

pub struct SessionWideEventReceiver {
    broadcast_rx: broadcast::Receiver<SessionWideEvent>,
}

impl SessionWideEventReceiver {
    pub async fn next(&mut self) -> Result<SessionWideEvent, Error> {
        loop {
            match self.broadcast_rx.recv().await {
                Ok(event) => return Ok(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::warn!("Client lagged behind the session. SkippedEvents: '{skipped}'.");
                }
                Err(error) => {
                    return Err(Error::log_and_create_internal(&format!(
                        "The broadcast channel with the Session has been closed. Error: {error}."
                    )))
                }
            }
        }
    }
}
