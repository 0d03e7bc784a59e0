use futures_util::StreamExt;
use serde_json::json;
use tokio_tungstenite::tungstenite::Message;

use crate::helpers::test_app::{TestApp, WORD};
use crate::helpers::test_client::{SessionState, TestClient};

static PROFILE: &str = "home";

async fn registered_client(app: &TestApp, player2: Option<&str>) -> TestClient {
    let mut client = app.open_session(PROFILE).await;
    let state = client.receive_session_state().await.unwrap();
    assert!(state.awaiting_players);

    let state = client.register_players("Ana", player2).await.unwrap();
    assert_eq!(state.state.as_deref(), Some("InProgress"));
    client
}

async fn win_round(client: &mut TestClient) -> SessionState {
    let (outcome, _) = client.guess(WORD).await.unwrap();
    assert_eq!(outcome["round"]["status"], json!("won"));
    // the round closes on its own shortly after
    client.receive_session_state().await.unwrap()
}

#[tokio::test]
async fn create_session_works() {
    let app = TestApp::spawn_app().await;

    let id = app.create_session(PROFILE).await;

    assert_eq!(id.len(), 5);
}

#[tokio::test]
async fn create_session_without_body_uses_the_default_profile() {
    let app = TestApp::spawn_app().await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/session", app.base_address))
        .send()
        .await
        .expect("Failed to execute CreateSession request.");

    assert!(response.status().is_success());
}

#[tokio::test]
async fn new_profile_waits_for_player_names() {
    let app = TestApp::spawn_app().await;
    let mut client = app.open_session(PROFILE).await;

    let state = client.receive_session_state().await.unwrap();

    assert!(state.awaiting_players);
    assert!(state.players.is_empty());
    assert!(state.round.is_none());
    assert!(!state.presentation.input_enabled);
}

#[tokio::test]
async fn registering_players_starts_a_one_word_round_with_hidden_letters() {
    let app = TestApp::spawn_app().await;
    let mut client = app.open_session(PROFILE).await;
    let _ = client.receive_session_state().await.unwrap();

    let state = client.register_players("Ana", Some("Rui")).await.unwrap();

    assert!(!state.awaiting_players);
    assert_eq!(state.players.len(), 2);
    assert!(state.players.iter().all(|player| player.chance == 3));
    assert_eq!(state.current_player, Some(0));
    let round = state.round.unwrap();
    assert_eq!(round.words.len(), 1);
    assert_eq!(round.words[0].letters.len(), 7);
    assert!(round.words[0]
        .letters
        .iter()
        .all(|letter| letter.letter.is_none() && letter.reveal == "hidden"));
    assert!(state.presentation.input_enabled);
}

#[tokio::test]
async fn empty_player_name_is_rejected() {
    let app = TestApp::spawn_app().await;
    let mut client = app.open_session(PROFILE).await;
    let _ = client.receive_session_state().await.unwrap();

    let result = client.register_players("  ", None).await;

    assert_eq!(result.unwrap_err(), "EMPTY_PLAYER_NAME");
    let state = client.receive_session_state().await.unwrap();
    assert!(state.awaiting_players);
}

#[tokio::test]
async fn guessing_the_word_wins_and_closes_the_round() {
    let app = TestApp::spawn_app().await;
    let mut client = registered_client(&app, None).await;

    let (outcome, state) = client.guess("ABACATE").await.unwrap();

    assert_eq!(outcome["outcome"], json!("adjudicated"));
    assert_eq!(outcome["isCorrect"], json!(true));
    assert_eq!(outcome["pointsAwarded"], json!(1));
    assert_eq!(state.players[0].score, 1);
    assert_eq!(state.presentation.tone, "correct");
    assert!(!state.presentation.input_enabled);

    let state = client.receive_session_state().await.unwrap();

    assert_eq!(state.state.as_deref(), Some("Setup"));
    assert!(state.presentation.new_game_prompt);
    let board = state.round.unwrap();
    assert_eq!(board.solved_words, 1);
    assert!(board.words[0].letters.iter().all(|letter| letter.letter.is_some()));
    assert!(app.wait_for_stored_scores("\"player1Score\": \"1\"").await);
}

#[tokio::test]
async fn first_miss_is_absorbed_and_the_next_costs_a_chance() {
    let app = TestApp::spawn_app().await;
    let mut client = registered_client(&app, None).await;

    let (outcome, state) = client.guess("xxxxxxx").await.unwrap();

    assert_eq!(outcome["isCorrect"], json!(false));
    assert_eq!(outcome["chanceChange"]["type"], json!("warmUpAbsorbed"));
    assert_eq!(state.players[0].chance, 3);

    let (outcome, state) = client.guess("yyyyyyy").await.unwrap();

    assert_eq!(
        outcome["chanceChange"],
        json!({"type": "spent", "player": 0, "remaining": 2, "tier": "warning"})
    );
    assert_eq!(state.players[0].chance, 2);
    assert_eq!(state.presentation.tone, "incorrect");
    assert_eq!(state.presentation.chance_tier.as_deref(), Some("warning"));
}

#[tokio::test]
async fn running_out_of_chances_loses_and_reveals_the_word() {
    let app = TestApp::spawn_app().await;
    let mut client = registered_client(&app, None).await;
    for guess in ["aaaaaaa", "bbbbbbb", "ccccccc"] {
        let _ = client.guess(guess).await.unwrap();
    }

    let (outcome, state) = client.guess("ddddddd").await.unwrap();

    assert_eq!(outcome["round"]["status"], json!("lost"));
    assert_eq!(outcome["round"]["revealed"].as_array().unwrap().len(), 7);
    assert_eq!(state.state.as_deref(), Some("Lost"));
    assert_eq!(state.presentation.chance_tier.as_deref(), Some("exhausted"));
    assert!(state.round.unwrap().words[0]
        .letters
        .iter()
        .all(|letter| letter.reveal == "onLoss"));
}

#[tokio::test]
async fn miss_hands_the_turn_to_the_second_player() {
    let app = TestApp::spawn_app().await;
    let mut client = registered_client(&app, Some("Rui")).await;

    let (outcome, state) = client.guess("z").await.unwrap();

    assert_eq!(outcome["nextPlayer"], json!(1));
    assert_eq!(state.current_player, Some(1));
}

#[tokio::test]
async fn repeated_letter_is_rejected() {
    let app = TestApp::spawn_app().await;
    let mut client = registered_client(&app, None).await;
    let (_, state) = client.guess("a").await.unwrap();
    assert_eq!(state.round.unwrap().revealed_letters, 3);

    let (outcome, state) = client.guess("A").await.unwrap();

    assert_eq!(
        outcome,
        json!({"outcome": "rejected", "guess": "a", "reason": "alreadyAttempted"})
    );
    assert_eq!(state.round.unwrap().revealed_letters, 3);
}

#[tokio::test]
async fn guess_before_registering_players_fails() {
    let app = TestApp::spawn_app().await;
    let mut client = app.open_session(PROFILE).await;
    let _ = client.receive_session_state().await.unwrap();

    let result = client.guess("a").await;

    assert_eq!(result.unwrap_err(), "PLAYERS_NOT_REGISTERED");
}

#[tokio::test]
async fn new_round_uses_the_requested_amount_of_words() {
    let app = TestApp::spawn_app().await;
    let mut client = registered_client(&app, None).await;

    let state = client.new_round(3).await.unwrap();

    let round = state.round.unwrap();
    assert_eq!(round.words.len(), 3);
    assert_eq!(round.revealed_letters, 0);
}

#[tokio::test]
async fn invalid_word_count_is_reported_without_closing_the_connection() {
    let app = TestApp::spawn_app().await;
    let mut client = registered_client(&app, None).await;

    let result = client.new_round(0).await;

    assert_eq!(result.unwrap_err(), "INVALID_WORD_COUNT");
    let state = client.receive_session_state().await.unwrap();
    assert_eq!(state.round.unwrap().words.len(), 1);
}

#[tokio::test]
async fn ending_the_round_offers_a_new_game() {
    let app = TestApp::spawn_app().await;
    let mut client = registered_client(&app, None).await;

    let state = client.end_round().await.unwrap();

    assert_eq!(state.state.as_deref(), Some("Setup"));
    assert!(state.presentation.new_game_prompt);
    assert!(app.wait_for_stored_scores("\"player1Name\": \"Ana\"").await);
}

#[tokio::test]
async fn stored_players_are_resumed_in_a_new_session() {
    let app = TestApp::spawn_app().await;
    let mut client = registered_client(&app, Some("Rui")).await;
    let _ = win_round(&mut client).await;

    let mut resumed = app.open_session(PROFILE).await;
    let state = resumed.receive_session_state().await.unwrap();

    assert!(!state.awaiting_players);
    assert_eq!(state.state.as_deref(), Some("InProgress"));
    assert_eq!(state.players[0].name, "Ana");
    assert_eq!(state.players[0].score, 1);
    assert_eq!(state.players[1].name, "Rui");
    assert_eq!(state.round.unwrap().words.len(), 1);
}

#[tokio::test]
async fn reset_clears_scores_and_next_session_asks_for_names() {
    let app = TestApp::spawn_app().await;
    let mut client = registered_client(&app, None).await;
    let _ = win_round(&mut client).await;

    let state = client.reset().await.unwrap();

    assert!(state.awaiting_players);
    let mut next = app.open_session(PROFILE).await;
    assert!(next.receive_session_state().await.unwrap().awaiting_players);
}

#[tokio::test]
async fn unknown_session_is_reported() {
    let app = TestApp::spawn_app().await;
    let mut client = app.connect("nope").await.unwrap();

    assert_eq!(client.receive_error().await, "SESSION_DOES_NOT_EXIST");
}

#[tokio::test]
async fn ping_is_answered_with_pong() {
    let app = TestApp::spawn_app().await;
    let mut client = app.open_session(PROFILE).await;
    let _ = client.receive_session_state().await.unwrap();

    client.send_message(Message::Text("ping".to_string())).await;

    let message = client.rx.next().await.unwrap().unwrap();
    assert_eq!(message.to_text().unwrap(), "pong");
}

#[tokio::test]
async fn malformed_message_is_reported() {
    let app = TestApp::spawn_app().await;
    let mut client = app.open_session(PROFILE).await;
    let _ = client.receive_session_state().await.unwrap();

    client
        .send_message(Message::Text("{\"kind\":\"jump\"}".to_string()))
        .await;

    assert_eq!(client.receive_error().await, "UNPROCESSABLE_WEBSOCKET_MESSAGE");
}

#[tokio::test]
async fn session_stops_once_idle_without_clients() {
    let app = TestApp::spawn_app().await;
    let session_id = app.create_session(PROFILE).await;

    tokio::time::sleep(app.inactivity_timeout * 2).await;
    let mut client = app.connect(&session_id).await.unwrap();

    assert_eq!(client.receive_error().await, "SESSION_DOES_NOT_EXIST");
}
