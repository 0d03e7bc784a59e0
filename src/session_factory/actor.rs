use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::oneshot::Sender as OneshotSender;

use crate::config::GameSettings;
use crate::dictionary::{Dictionary, OutcomeImages};
use crate::error::Error;
use crate::session::actor_client::SessionClient;
use crate::session_factory::actor_client::SessionFactoryClient;
use crate::session_factory::SessionFactory;
use crate::storage::KeyValueStore;

pub struct SessionFactoryActor {
    session_factory: SessionFactory,
    session_factory_rx: Receiver<SessionFactoryCommand>,
    session_factory_tx: Sender<SessionFactoryCommand>,
}

impl SessionFactoryActor {
    /// Runs the SessionFactory Actor in background and returns a Client to communicate with it
    pub fn spawn(
        game_settings: GameSettings,
        dictionary: Arc<Dictionary>,
        images: OutcomeImages,
        store: Arc<dyn KeyValueStore>,
    ) -> SessionFactoryClient {
        let session_factory = SessionFactory::new(game_settings, dictionary, images, store);
        let (session_factory_tx, session_factory_rx): (
            Sender<SessionFactoryCommand>,
            Receiver<SessionFactoryCommand>,
        ) = mpsc::channel(512);

        tokio::spawn(
            SessionFactoryActor {
                session_factory,
                session_factory_rx,
                session_factory_tx: session_factory_tx.clone(),
            }
            .start(),
        );

        SessionFactoryClient { session_factory_tx }
    }

    async fn start(mut self) {
        while let Some(message) = self.session_factory_rx.recv().await {
            let response = match message {
                SessionFactoryCommand::CreateSession {
                    profile,
                    response_channel,
                } => {
                    let result = self
                        .session_factory
                        .create_new_session(
                            profile.as_deref(),
                            SessionFactoryClient {
                                session_factory_tx: self.session_factory_tx.clone(),
                            },
                        )
                        .map(|session_id| SessionFactoryResponse::SessionCreated { session_id });
                    Some((result, response_channel))
                }
                SessionFactoryCommand::RemoveSession { session_id } => {
                    let _ = self.session_factory.remove_session(&session_id);
                    None
                }
                SessionFactoryCommand::GetSessionActor {
                    session_id,
                    response_channel,
                } => {
                    let result = self
                        .session_factory
                        .get_session(&session_id)
                        .map(|session| SessionFactoryResponse::SessionActor {
                            session: session.clone(),
                        });
                    Some((result, response_channel))
                }
            };
            if let Some((result, response_tx)) = response {
                let event = match result {
                    Ok(event) => event,
                    Err(error) => SessionFactoryResponse::Error { error },
                };
                if let Err(error) = response_tx.send(event) {
                    log::error!("Sent SessionFactoryResponse but the response channel is closed. Error: '{error}'.");
                }
            }
        }
    }
}

#[derive(Debug)]
pub(crate) enum SessionFactoryCommand {
    CreateSession {
        profile: Option<String>,
        response_channel: OneshotSender<SessionFactoryResponse>,
    },
    RemoveSession {
        session_id: String,
    },
    GetSessionActor {
        session_id: String,
        response_channel: OneshotSender<SessionFactoryResponse>,
    },
}

#[allow(clippy::enum_variant_names)]
#[derive(Debug)]
pub(crate) enum SessionFactoryResponse {
    SessionCreated { session_id: String },
    SessionActor { session: SessionClient },
    Error { error: Error },
}

impl Display for SessionFactoryResponse {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                SessionFactoryResponse::SessionCreated { session_id } =>
                    format!("SessionCreated(session_id: {session_id})"),
                SessionFactoryResponse::SessionActor { session: _ } => "SessionActor".to_string(),
                SessionFactoryResponse::Error { error } => format!("Error '{error}'"),
            }
        )
    }
}
