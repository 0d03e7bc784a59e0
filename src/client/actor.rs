use axum::extract::ws::{Message, WebSocket};
use std::time::Duration;
use tokio::select;
use tokio::time::error::Elapsed;
use tokio::time::timeout;

use crate::error::Error;
use crate::metrics::CONNECTED_CLIENTS;
use crate::session::actor::SessionWideEvent;
use crate::session::actor_client::{SessionClient, SessionWideEventReceiver};
use crate::websocket::message::{WsMessageIn, WsMessageOut};
use crate::websocket::{close, parse_message, send_error, send_message, send_message_string};

/// Bridges one WebSocket with its session: commands go in, session-wide events come out.
pub struct ClientActor {
    session_id: String,
    session: SessionClient,
    session_wide_event_receiver: SessionWideEventReceiver,
    websocket: WebSocket,
    inactivity_timeout: Duration,
}

impl ClientActor {
    /// Clients ping every couple of seconds, a longer silence means they are gone.
    const INACTIVITY_TIMEOUT: Duration = Duration::from_millis(2500);

    pub async fn create(session_id: String, session: SessionClient, mut websocket: WebSocket) {
        match session.attach().await {
            Ok(session_wide_event_receiver) => {
                ClientActor {
                    session_id,
                    session,
                    session_wide_event_receiver,
                    websocket,
                    inactivity_timeout: ClientActor::INACTIVITY_TIMEOUT,
                }
                .start()
                .await
            }
            Err(error) => {
                send_error(&mut websocket, &error).await;
                close(websocket).await;
            }
        }
    }

    async fn start(mut self) {
        CONNECTED_CLIENTS.inc();

        loop {
            select! {
                session_wide_message = self.session_wide_event_receiver.next() => {
                    if let Err(error) = self.receive_session_wide_message(session_wide_message).await {
                        send_error(&mut self.websocket, &error).await;
                        if error.is_fatal_for_client() {
                            break;
                        }
                    }
                },
                websocket_message = timeout(self.inactivity_timeout, self.websocket.recv()) => {
                    if let Err(error) = self.receive_websocket_message(websocket_message).await {
                        send_error(&mut self.websocket, &error).await;
                        if error.is_fatal_for_client() {
                            break;
                        }
                    }
                },
            }
        }

        let _ = self.session.detach().await;
        close(self.websocket).await;
        CONNECTED_CLIENTS.dec();
    }

    async fn receive_session_wide_message(
        &mut self,
        session_wide_message: Result<SessionWideEvent, Error>,
    ) -> Result<(), Error> {
        match session_wide_message? {
            SessionWideEvent::SessionState { view } => {
                send_message(&mut self.websocket, &WsMessageOut::from(view)).await
            }
            SessionWideEvent::GuessOutcome { outcome } => {
                send_message(&mut self.websocket, &WsMessageOut::GuessOutcome { outcome }).await
            }
        }
    }

    async fn receive_websocket_message(
        &mut self,
        websocket_message: Result<Option<Result<Message, axum::Error>>, Elapsed>,
    ) -> Result<(), Error> {
        match websocket_message {
            Ok(Some(Ok(Message::Text(txt)))) => match txt.as_str() {
                "ping" => send_message_string(&mut self.websocket, "pong").await,
                message => match parse_message(message)? {
                    WsMessageIn::RegisterPlayers { player1, player2 } => {
                        self.session
                            .register_players(&player1, player2.as_deref())
                            .await
                    }
                    WsMessageIn::NewRound { word_count } => {
                        self.session.new_round(word_count).await
                    }
                    WsMessageIn::Guess { text } => self.session.guess(&text).await,
                    WsMessageIn::EndRound => self.session.end_round().await,
                    WsMessageIn::Reset => self.session.reset().await,
                },
            },
            // axum answers protocol pings on its own
            Ok(Some(Ok(Message::Ping(_) | Message::Pong(_)))) => Ok(()),
            // client said "close"
            Ok(Some(Ok(Message::Close(_)))) => {
                self.connection_lost("client sent 'Close' websocket frame")
            }
            // websocket was closed
            Ok(None) => self.connection_lost("other end of websocket was closed abruptly"),
            // timeout without receiving anything from the client
            Err(_) => self.connection_lost("connection timed out; missing 'Ping' messages"),
            Ok(Some(Err(error))) => Err(Error::UnprocessableMessage(
                "Message cannot be loaded".to_string(),
                error.to_string(),
            )),
            Ok(Some(Ok(_))) => Err(Error::UnprocessableMessage(
                "Unsupported message type".to_string(),
                "Unsupported message type".to_string(),
            )),
        }
    }

    fn connection_lost(&self, reason: &str) -> Result<(), Error> {
        log::info!(
            "Connection with a client of session {} lost due to: {}. Stopping client actor.",
            self.session_id,
            reason,
        );
        Err(Error::WebsocketClosed(reason.to_string()))
    }
}
