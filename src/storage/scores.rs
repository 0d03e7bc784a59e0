use crate::error::Error;
use crate::player::Player;
use crate::storage::{KeyValueStore, Values};

pub const PLAYER1_NAME: &str = "player1Name";
pub const PLAYER1_SCORE: &str = "player1Score";
pub const PLAYER2_NAME: &str = "player2Name";
pub const PLAYER2_SCORE: &str = "player2Score";

const KEYS: [(&str, &str); 2] = [(PLAYER1_NAME, PLAYER1_SCORE), (PLAYER2_NAME, PLAYER2_SCORE)];

/// Stores the players in a single write. Keys of a player who left the game are dropped.
pub fn save(store: &dyn KeyValueStore, profile: &str, players: &[Player]) -> Result<(), Error> {
    let values: Values = players
        .iter()
        .zip(KEYS)
        .flat_map(|(player, (name_key, score_key))| {
            [
                (name_key.to_string(), player.name.clone()),
                (score_key.to_string(), player.score.to_string()),
            ]
        })
        .collect();
    store.replace(profile, values)?;
    log::info!("Scores saved. Profile: '{profile}', Players: '{}'.", players.len());
    Ok(())
}

/// Returns the stored players, or `None` when the profile never finished a round.
pub fn load(store: &dyn KeyValueStore, profile: &str) -> Result<Option<Vec<Player>>, Error> {
    let mut players = Vec::new();
    for (name_key, score_key) in KEYS {
        let name = match store.get(profile, name_key)? {
            Some(name) if !name.trim().is_empty() => name,
            _ => break,
        };
        let score = store
            .get(profile, score_key)?
            .and_then(|score| score.trim().parse().ok())
            .unwrap_or(0);
        players.push(Player::with_score(&name, score));
    }

    Ok(if players.is_empty() { None } else { Some(players) })
}
