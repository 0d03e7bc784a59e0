use serde::{Deserialize, Serialize};

use crate::game::game_fsm::GameFsmState;
use crate::game::outcome::GuessOutcome;
use crate::player::{ChanceTier, Player};
use crate::round::{Letter, Reveal, Round, Word};
use crate::session::{Notice, Presentation, SessionView, Tone};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum WsMessageIn {
    #[serde(rename_all = "camelCase")]
    RegisterPlayers {
        player1: String,
        player2: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    NewRound { word_count: usize },
    Guess {
        text: String,
    },
    EndRound,
    Reset,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum WsMessageOut {
    Error {
        r#type: String,
        title: String,
        detail: String,
    },
    #[serde(rename_all = "camelCase")]
    SessionState {
        profile: String,
        awaiting_players: bool,
        state: Option<String>,
        players: Vec<PlayerDto>,
        current_player: Option<usize>,
        round: Option<RoundDto>,
        presentation: PresentationDto,
    },
    GuessOutcome {
        outcome: GuessOutcome,
    },
}

impl From<SessionView> for WsMessageOut {
    fn from(view: SessionView) -> Self {
        WsMessageOut::SessionState {
            profile: view.profile,
            awaiting_players: view.awaiting_players,
            state: view.state.map(state_to_string),
            players: view.players.into_iter().map(PlayerDto::from).collect(),
            current_player: view.current_player,
            round: view.round.map(RoundDto::from),
            presentation: view.presentation.into(),
        }
    }
}

pub fn state_to_string(state: GameFsmState) -> String {
    state.to_string()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    name: String,
    score: u32,
    chance: u8,
}

impl From<Player> for PlayerDto {
    fn from(player: Player) -> Self {
        PlayerDto {
            name: player.name,
            score: player.score,
            chance: player.chance,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundDto {
    words: Vec<WordDto>,
    revealed_letters: usize,
    hidden_letters: usize,
    solved_words: usize,
    attempted_letters: Vec<char>,
    forced_word_mode: bool,
    indicator_visible: bool,
}

impl From<Round> for RoundDto {
    fn from(round: Round) -> Self {
        RoundDto {
            words: round.words().iter().map(WordDto::from).collect(),
            revealed_letters: round.revealed_letters(),
            hidden_letters: round.hidden_letters(),
            solved_words: round.solved_words(),
            attempted_letters: round.attempted_letters().to_vec(),
            forced_word_mode: round.is_forced_word_mode(),
            indicator_visible: round.indicator_visible(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDto {
    is_solved: bool,
    letters: Vec<LetterDto>,
}

impl From<&Word> for WordDto {
    fn from(word: &Word) -> Self {
        WordDto {
            is_solved: word.is_solved,
            letters: word.letters().iter().map(LetterDto::from).collect(),
        }
    }
}

/// A hidden letter never leaves the server.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterDto {
    letter: Option<char>,
    reveal: Reveal,
}

impl From<&Letter> for LetterDto {
    fn from(letter: &Letter) -> Self {
        LetterDto {
            letter: if letter.is_hidden() {
                None
            } else {
                Some(letter.display)
            },
            reveal: letter.reveal,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationDto {
    tone: Tone,
    chance_tier: Option<ChanceTier>,
    image: Option<String>,
    input_enabled: bool,
    new_game_prompt: bool,
    notice: Option<Notice>,
}

impl From<Presentation> for PresentationDto {
    fn from(presentation: Presentation) -> Self {
        PresentationDto {
            tone: presentation.tone,
            chance_tier: presentation.chance_tier,
            image: presentation.image,
            input_enabled: presentation.input_enabled,
            new_game_prompt: presentation.new_game_prompt,
            notice: presentation.notice,
        }
    }
}
