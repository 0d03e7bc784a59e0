use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::player::ChanceTier;

/// Why a guess was refused without touching the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Rejection {
    WrongLength,
    AlreadyAttempted,
    AlreadySolved,
}

impl Display for Rejection {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Rejection::WrongLength => "the guess is neither a letter nor a word of the round",
                Rejection::AlreadyAttempted => "the letter was already attempted",
                Rejection::AlreadySolved => "the word was already solved",
            }
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealedLetter {
    pub word: usize,
    pub position: usize,
    pub letter: char,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum GuessKind {
    Letter { letter: char },
    Word { word: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum ChanceChange {
    /// The first miss of a round, while the indicator was still hidden, costs nothing.
    WarmUpAbsorbed,
    Spent {
        player: usize,
        remaining: u8,
        tier: ChanceTier,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost { revealed: Vec<RevealedLetter> },
}

/// Everything a guess changed, for the presentation layer to replay.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjudication {
    pub player: usize,
    pub guess: GuessKind,
    pub is_correct: bool,
    pub revealed: Vec<RevealedLetter>,
    pub solved_words: Vec<usize>,
    pub points_awarded: u32,
    pub chance_change: Option<ChanceChange>,
    pub next_player: Option<usize>,
    pub round: RoundStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum GuessOutcome {
    Rejected { guess: String, reason: Rejection },
    Adjudicated(Adjudication),
}

impl GuessOutcome {
    pub fn adjudication(&self) -> Option<&Adjudication> {
        match self {
            GuessOutcome::Adjudicated(adjudication) => Some(adjudication),
            GuessOutcome::Rejected { .. } => None,
        }
    }
}
