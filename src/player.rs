use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub name: String,
    pub score: u32,
    pub chance: u8,
}

impl Player {
    pub const STARTING_CHANCES: u8 = 3;

    pub fn new(name: &str) -> Self {
        Player::with_score(name, 0)
    }

    pub fn with_score(name: &str, score: u32) -> Self {
        Player {
            name: name.to_string(),
            score,
            chance: Player::STARTING_CHANCES,
        }
    }

    pub fn add_point(&mut self) {
        self.score += 1;
    }

    /// Spends one chance, never going below zero. Returns the remaining chances.
    pub fn lose_chance(&mut self) -> u8 {
        self.chance = self.chance.saturating_sub(1);
        self.chance
    }

    pub fn has_chances(&self) -> bool {
        self.chance > 0
    }

    pub fn reset_chances(&mut self) {
        self.chance = Player::STARTING_CHANCES;
    }
}

/// How close a player is to running out of chances, used by clients to colour the indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChanceTier {
    Safe,
    Warning,
    Danger,
    Exhausted,
}

impl From<u8> for ChanceTier {
    fn from(chance: u8) -> Self {
        match chance {
            0 => ChanceTier::Exhausted,
            1 => ChanceTier::Danger,
            2 => ChanceTier::Warning,
            _ => ChanceTier::Safe,
        }
    }
}
