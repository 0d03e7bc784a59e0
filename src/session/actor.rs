use std::fmt::{Display, Formatter};
use std::time::Duration;
use tokio::sync::oneshot::Sender as OneshotSender;
use tokio::sync::{
    broadcast, mpsc,
    mpsc::{Receiver, Sender},
};
use tokio::time;

use crate::config::GameSettings;
use crate::error::Error;
use crate::game::outcome::{GuessOutcome, RoundStatus};
use crate::metrics::{ACTIVE_SESSIONS, GUESSES, ROUNDS_LOST, ROUNDS_WON};
use crate::session::actor_client::SessionClient;
use crate::session::pacing::{Cue, Pacing};
use crate::session::{Session, SessionView};
use crate::session_factory::actor_client::SessionFactoryClient;

pub struct SessionActor {
    id: String,
    session: Session,
    session_rx: Receiver<SessionCommand>,
    session_tx: Sender<SessionCommand>,
    broadcast_tx: broadcast::Sender<SessionWideEvent>,
    session_factory: SessionFactoryClient,
    settings: GameSettings,
    pacing: Pacing,
    attached_clients: usize,
}

impl SessionActor {
    pub fn spawn(
        id: &str,
        session: Session,
        settings: GameSettings,
        session_factory: SessionFactoryClient,
    ) -> SessionClient {
        let (session_tx, session_rx): (Sender<SessionCommand>, Receiver<SessionCommand>) =
            mpsc::channel(128);
        let (broadcast_tx, _): (
            broadcast::Sender<SessionWideEvent>,
            broadcast::Receiver<SessionWideEvent>,
        ) = broadcast::channel(32);

        tokio::spawn(
            SessionActor {
                id: id.to_string(),
                session,
                session_rx,
                session_tx: session_tx.clone(),
                broadcast_tx,
                session_factory,
                settings,
                pacing: Pacing::default(),
                attached_clients: 0,
            }
            .start(),
        );

        SessionClient { session_tx }
    }

    async fn start(mut self) {
        ACTIVE_SESSIONS.inc();
        let inactivity_timeout: Duration = self.settings.inactivity_timeout();

        loop {
            match time::timeout(inactivity_timeout, self.session_rx.recv()).await {
                Err(_) => {
                    if self.attached_clients == 0 {
                        log::info!(
                            "No activity detected in session {} after {} seconds. Stopping session actor.",
                            self.id,
                            inactivity_timeout.as_secs()
                        );
                        break;
                    }
                }
                Ok(None) => {
                    log::info!("Session channel has been dropped. Stopping session actor.");
                    break;
                }
                Ok(Some(command)) => {
                    let response = match command {
                        SessionCommand::Attach { response_tx } => {
                            self.attached_clients += 1;
                            let event = SessionEvent::Attached {
                                broadcast_rx: self.broadcast_tx.subscribe(),
                            };
                            Some((Ok(event), response_tx))
                        }
                        SessionCommand::Detach => {
                            self.attached_clients = self.attached_clients.saturating_sub(1);
                            continue;
                        }
                        SessionCommand::RegisterPlayers {
                            player1,
                            player2,
                            response_tx,
                        } => {
                            let result = self
                                .session
                                .register_players(&player1, player2.as_deref())
                                .map(|_| {
                                    self.pacing.cancel_all();
                                    SessionEvent::Ok
                                });
                            Some((result, response_tx))
                        }
                        SessionCommand::NewRound {
                            word_count,
                            response_tx,
                        } => {
                            let result = self.session.new_round(word_count).map(|_| {
                                self.pacing.cancel_all();
                                SessionEvent::Ok
                            });
                            Some((result, response_tx))
                        }
                        SessionCommand::Guess { text, response_tx } => {
                            let result = self.guess(&text).map(|_| SessionEvent::Ok);
                            Some((result, response_tx))
                        }
                        SessionCommand::EndRound { response_tx } => {
                            let result = self.session.close_round().map(|_| SessionEvent::Ok);
                            Some((result, response_tx))
                        }
                        SessionCommand::Reset { response_tx } => {
                            self.pacing.cancel_all();
                            let result = self.session.reset().map(|_| SessionEvent::Ok);
                            Some((result, response_tx))
                        }
                        SessionCommand::CueElapsed { ticket, cue } => {
                            if !self.pacing.take_elapsed(cue, ticket) {
                                log::debug!("Ignoring a stale cue. Cue: '{cue:?}'.");
                                continue;
                            }
                            if let Err(error) = self.session.apply_cue(cue) {
                                log::error!("Could not apply a cue. Cue: '{cue:?}', Error: '{error}'.");
                            }
                            None
                        }
                    };
                    if let Some((result, response_tx)) = response {
                        let event = match result {
                            Ok(event) => event,
                            Err(error) => SessionEvent::Error { error },
                        };
                        if let Err(error) = response_tx.send(event) {
                            log::error!("Sent SessionEvent but the response channel is closed. SessionId: '{}', Error: '{error}'.", self.id);
                        }
                    }
                    self.send_session_state();
                }
            }
        }

        self.stop_session().await;
        ACTIVE_SESSIONS.dec();
    }

    fn guess(&mut self, text: &str) -> Result<(), Error> {
        let (outcome, cues) = self.session.guess(text)?;
        GUESSES.inc();
        if let GuessOutcome::Adjudicated(adjudication) = &outcome {
            match adjudication.round {
                RoundStatus::Won => ROUNDS_WON.inc(),
                RoundStatus::Lost { .. } => ROUNDS_LOST.inc(),
                RoundStatus::InProgress => {}
            }
        }
        for cue in cues {
            self.pacing.schedule(
                cue,
                cue.delay(&self.settings),
                self.session_tx.clone(),
            );
        }
        // Nobody listening is fine, the state is sent again on attach
        let _ = self
            .broadcast_tx
            .send(SessionWideEvent::GuessOutcome { outcome });
        Ok(())
    }

    fn send_session_state(&self) {
        let _ = self.broadcast_tx.send(SessionWideEvent::SessionState {
            view: self.session.view(),
        });
    }

    async fn stop_session(self) {
        log::info!(
            "Session stopped. SessionId: '{}', Profile: '{}'.",
            self.id,
            self.session.profile()
        );
        if let Err(error) = self.session_factory.remove_session(&self.id).await {
            log::error!(
                "The SessionFactory channel is closed, can't remove the Session. SessionId: '{}', Error: '{error}'.",
                self.id
            );
        }
    }
}

pub(crate) enum SessionCommand {
    Attach {
        response_tx: OneshotSender<SessionEvent>,
    },
    Detach,
    RegisterPlayers {
        player1: String,
        player2: Option<String>,
        response_tx: OneshotSender<SessionEvent>,
    },
    NewRound {
        word_count: usize,
        response_tx: OneshotSender<SessionEvent>,
    },
    Guess {
        text: String,
        response_tx: OneshotSender<SessionEvent>,
    },
    EndRound {
        response_tx: OneshotSender<SessionEvent>,
    },
    Reset {
        response_tx: OneshotSender<SessionEvent>,
    },
    CueElapsed {
        ticket: u64,
        cue: Cue,
    },
}

#[derive(Debug)]
pub(crate) enum SessionEvent {
    Attached {
        broadcast_rx: broadcast::Receiver<SessionWideEvent>,
    },
    Ok,
    Error {
        error: Error,
    },
}

impl Display for SessionEvent {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                SessionEvent::Attached { .. } => "SessionEvent::Attached".to_string(),
                SessionEvent::Ok => "SessionEvent::Ok".to_string(),
                SessionEvent::Error { error } => format!("Error '{error}'"),
            }
        )
    }
}

#[derive(Clone, Debug)]
pub enum SessionWideEvent {
    SessionState { view: SessionView },
    GuessOutcome { outcome: GuessOutcome },
}
