use std::{net::SocketAddr, path::PathBuf, time::Duration};

use futures_util::StreamExt;
use letras::config::Config;
use serde::Deserialize;
use tokio::net::TcpListener;

use super::test_client::TestClient;

pub const WORD: &str = "abacate";

pub struct TestApp {
    pub base_address: String,
    pub inactivity_timeout: Duration,
    pub round_close_delay: Duration,
    storage_path: PathBuf,
    words_path: PathBuf,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        // Binding to port 0 triggers an OS scan for an available port, this way we can run tests in parallel where each runs its own application
        let random_port_address = SocketAddr::from(([127, 0, 0, 1], 0));
        let listener = TcpListener::bind(random_port_address)
            .await
            .expect("Failed to bind to bind random port.");
        let address = listener.local_addr().unwrap();

        // A single word list makes every round predictable
        let directory = std::env::temp_dir().join(format!("letras-api-{}", address.port()));
        std::fs::create_dir_all(&directory).expect("Failed to create the test directory.");
        let words_path = directory.join("words.txt");
        std::fs::write(&words_path, format!("{WORD}\ncasa\n")).expect("Failed to write words.");
        let storage_path = directory.join("scores.json");
        let _ = std::fs::remove_file(&storage_path);

        std::env::set_var("ENVIRONMENT", "dev");
        let config = {
            let mut config = Config::get().expect("Failed to read configuration.");
            config.game.inactivity_timeout_seconds = 1;
            config.words.location = words_path.to_string_lossy().to_string();
            config.storage.path = storage_path.clone();
            config
        };

        let server = letras::startup::create_web_server(config.clone(), listener);
        let _ = tokio::spawn(server);

        TestApp {
            base_address: format!("localhost:{}", address.port()),
            inactivity_timeout: config.game.inactivity_timeout(),
            round_close_delay: config.game.round_close_delay(),
            storage_path,
            words_path,
        }
    }

    pub async fn create_session(&self, profile: &str) -> String {
        let response = reqwest::Client::new()
            .post(format!("http://{}/session", self.base_address))
            .json(&serde_json::json!({ "profile": profile }))
            .send()
            .await
            .expect("Failed to execute CreateSession request.");
        assert!(response.status().is_success());

        let session_created_response: SessionCreatedResponse = response
            .json()
            .await
            .expect("Failed to parse SessionCreatedResponse.");
        assert!(!session_created_response.id.is_empty());

        session_created_response.id
    }

    pub async fn connect(&self, session_id: &str) -> Result<TestClient, String> {
        let (tx, rx) = tokio_tungstenite::connect_async(format!(
            "ws://{}/session/{session_id}/ws",
            self.base_address
        ))
        .await
        .map(|websocket_stream| websocket_stream.0)
        .map_err(|error| format!("WebSocket could not be created. Error: '{error}'."))?
        .split();

        Ok(TestClient { tx, rx })
    }

    /// Creates a session for `profile` and attaches a client, which receives the initial state.
    pub async fn open_session(&self, profile: &str) -> TestClient {
        let session_id = self.create_session(profile).await;
        self.connect(&session_id).await.unwrap()
    }

    /// The store file is written in the background, so this polls until `expected` shows up.
    pub async fn wait_for_stored_scores(&self, expected: &str) -> bool {
        for _ in 0..50 {
            let stored = std::fs::read_to_string(&self.storage_path).unwrap_or_default();
            if stored.contains(expected) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        false
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.words_path);
        let _ = std::fs::remove_file(&self.storage_path);
    }
}

#[derive(Deserialize)]
struct SessionCreatedResponse {
    id: String,
}
