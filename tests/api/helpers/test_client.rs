use futures_util::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};

pub struct TestClient {
    pub tx: SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>,
    pub rx: SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>,
}

impl TestClient {
    pub async fn receive(&mut self) -> Result<WsMessageIn, String> {
        match self.rx.next().await {
            Some(Ok(message)) => {
                serde_json::from_str(message.to_text().expect("Message was not a text"))
                    .map_err(|error| format!("Could not parse the message. Error: '{error}'."))
            }
            Some(Err(error)) => Err(format!("Websocket returned an error {error}")),
            None => Err("Websocket closed before expected.".to_string()),
        }
    }

    pub async fn receive_session_state(&mut self) -> Result<SessionState, String> {
        match self.receive().await? {
            WsMessageIn::SessionState(state) => Ok(state),
            WsMessageIn::Error {
                r#type,
                title,
                detail,
            } => {
                assert!(!title.is_empty());
                assert!(!detail.is_empty());
                Err(r#type)
            }
            WsMessageIn::GuessOutcome { outcome } => {
                Err(format!("Expected a session state, got the outcome {outcome}"))
            }
        }
    }

    pub async fn receive_guess_outcome(&mut self) -> Result<serde_json::Value, String> {
        match self.receive().await? {
            WsMessageIn::GuessOutcome { outcome } => Ok(outcome),
            WsMessageIn::Error { r#type, .. } => Err(r#type),
            WsMessageIn::SessionState(state) => {
                Err(format!("Expected a guess outcome, got the state {state:?}"))
            }
        }
    }

    pub async fn receive_error(&mut self) -> String {
        match self.receive().await {
            Ok(WsMessageIn::Error { r#type, .. }) => r#type,
            other => panic!("Expected an error, got {other:?}"),
        }
    }

    pub async fn register_players(
        &mut self,
        player1: &str,
        player2: Option<&str>,
    ) -> Result<SessionState, String> {
        self.send_text_message(WsMessageOut::RegisterPlayers {
            player1: player1.to_string(),
            player2: player2.map(str::to_string),
        })
        .await;
        self.receive_session_state().await
    }

    pub async fn new_round(&mut self, word_count: usize) -> Result<SessionState, String> {
        self.send_text_message(WsMessageOut::NewRound { word_count })
            .await;
        self.receive_session_state().await
    }

    /// Sends a guess and returns the outcome together with the state that follows it.
    pub async fn guess(&mut self, text: &str) -> Result<(serde_json::Value, SessionState), String> {
        self.send_text_message(WsMessageOut::Guess {
            text: text.to_string(),
        })
        .await;
        let outcome = self.receive_guess_outcome().await?;
        let state = self.receive_session_state().await?;
        Ok((outcome, state))
    }

    pub async fn end_round(&mut self) -> Result<SessionState, String> {
        self.send_text_message(WsMessageOut::EndRound).await;
        self.receive_session_state().await
    }

    pub async fn reset(&mut self) -> Result<SessionState, String> {
        self.send_text_message(WsMessageOut::Reset).await;
        self.receive_session_state().await
    }

    pub async fn send_message(&mut self, message: Message) {
        self.tx.send(message).await.expect("Could not send message");
    }

    async fn send_text_message(&mut self, message: WsMessageOut) {
        self.send_message(Message::Text(
            serde_json::to_string(&message).expect("Could not serialize message"),
        ))
        .await;
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum WsMessageIn {
    Error {
        r#type: String,
        title: String,
        detail: String,
    },
    SessionState(SessionState),
    GuessOutcome {
        outcome: serde_json::Value,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum WsMessageOut {
    RegisterPlayers {
        player1: String,
        player2: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    NewRound {
        word_count: usize,
    },
    Guess {
        text: String,
    },
    EndRound,
    Reset,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub awaiting_players: bool,
    pub state: Option<String>,
    pub players: Vec<Player>,
    pub current_player: Option<usize>,
    pub round: Option<Round>,
    pub presentation: Presentation,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    pub score: u32,
    pub chance: u8,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub words: Vec<Word>,
    pub revealed_letters: usize,
    pub hidden_letters: usize,
    pub solved_words: usize,
    pub attempted_letters: Vec<char>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub is_solved: bool,
    pub letters: Vec<Letter>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Letter {
    pub letter: Option<char>,
    pub reveal: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub tone: String,
    pub chance_tier: Option<String>,
    pub image: Option<String>,
    pub input_enabled: bool,
    pub new_game_prompt: bool,
}
