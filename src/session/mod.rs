pub mod actor;
pub mod actor_client;
pub mod pacing;

use std::sync::Arc;

use rand::thread_rng;
use serde::Serialize;

use crate::config::GameSettings;
use crate::dictionary::{Dictionary, OutcomeImages};
use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::game::game_fsm::GameFsmState;
use crate::game::outcome::{GuessOutcome, RoundStatus};
use crate::game::Game;
use crate::player::{ChanceTier, Player};
use crate::round::Round;
use crate::session::pacing::Cue;
use crate::storage::{scores, KeyValueStore};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tone {
    #[default]
    Neutral,
    Correct,
    Incorrect,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum Notice {
    TurnChanged { player: usize, name: String },
}

/// How the client should render the session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Presentation {
    pub tone: Tone,
    /// Only set once the chance indicator is visible.
    pub chance_tier: Option<ChanceTier>,
    pub image: Option<String>,
    pub input_enabled: bool,
    pub new_game_prompt: bool,
    pub notice: Option<Notice>,
}

impl Presentation {
    fn playing() -> Self {
        Presentation {
            input_enabled: true,
            ..Presentation::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct SessionView {
    pub profile: String,
    pub awaiting_players: bool,
    pub state: Option<GameFsmState>,
    pub players: Vec<Player>,
    pub current_player: Option<usize>,
    /// The round being played, or the last finished board.
    pub round: Option<Round>,
    pub presentation: Presentation,
}

/// One client profile playing: the game, its stored scores and what the client should show.
pub struct Session {
    profile: String,
    game: Option<Game>,
    dictionary: Arc<Dictionary>,
    images: OutcomeImages,
    store: Arc<dyn KeyValueStore>,
    settings: GameSettings,
    presentation: Presentation,
    last_board: Option<Round>,
}

impl Session {
    pub const RESUMED_WORD_COUNT: usize = 1;

    /// Resumes the stored players with a fresh one-word round, or waits for player names.
    pub fn create(
        profile: &str,
        dictionary: Arc<Dictionary>,
        images: OutcomeImages,
        store: Arc<dyn KeyValueStore>,
        settings: GameSettings,
    ) -> Result<Self, Error> {
        let mut session = Session {
            profile: profile.to_string(),
            game: None,
            dictionary,
            images,
            store,
            settings,
            presentation: Presentation::default(),
            last_board: None,
        };

        match scores::load(session.store.as_ref(), profile)? {
            Some(players) => {
                log::info!(
                    "Resuming stored players. Profile: '{profile}', Players: '{}'.",
                    players.len()
                );
                session.game = Some(
                    Game::with_players(players)?.with_max_word_count(session.settings.max_word_count),
                );
                session.start_round(Session::RESUMED_WORD_COUNT)?;
            }
            None => log::info!("No stored players, waiting for names. Profile: '{profile}'."),
        }

        Ok(session)
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn awaiting_players(&self) -> bool {
        self.game.is_none()
    }

    pub fn register_players(&mut self, player1: &str, player2: Option<&str>) -> Result<(), Error> {
        let game = Game::new(player1, player2)?.with_max_word_count(self.settings.max_word_count);
        self.end()?;
        log::info!(
            "Players registered. Profile: '{}', Players: '{}'.",
            self.profile,
            game.players().len()
        );
        self.game = Some(game);
        self.start_round(Session::RESUMED_WORD_COUNT)
    }

    /// Ends the current round, keeping the scores, and starts another with `word_count` words.
    pub fn new_round(&mut self, word_count: usize) -> Result<(), Error> {
        if self.game.is_none() {
            return Err(Error::Domain(DomainError::PlayersNotRegistered));
        }
        if !(Game::MINIMUM_WORDS..=self.settings.max_word_count).contains(&word_count) {
            return Err(Error::Domain(DomainError::InvalidWordCount(
                word_count,
                Game::MINIMUM_WORDS,
                self.settings.max_word_count,
            )));
        }
        self.end()?;
        self.start_round(word_count)
    }

    /// Submits a guess and returns the cues to schedule for it.
    pub fn guess(&mut self, text: &str) -> Result<(GuessOutcome, Vec<Cue>), Error> {
        let game = self
            .game
            .as_mut()
            .ok_or(Error::Domain(DomainError::PlayersNotRegistered))?;
        let outcome = game.submit_guess(text)?;

        let adjudication = match outcome.adjudication() {
            Some(adjudication) => adjudication,
            None => return Ok((outcome, Vec::default())),
        };

        let mut cues = Vec::new();
        let presentation = &mut self.presentation;
        presentation.notice = adjudication.next_player.map(|player| Notice::TurnChanged {
            player,
            name: game.players()[player].name.clone(),
        });
        if game.round().is_some_and(Round::indicator_visible) {
            presentation.chance_tier = Some(ChanceTier::from(
                game.players()[adjudication.player].chance,
            ));
        }
        if adjudication.chance_change.is_some() {
            presentation.tone = Tone::Incorrect;
        }

        match &adjudication.round {
            RoundStatus::InProgress => {
                if adjudication.chance_change.is_some() {
                    cues.push(Cue::RestoreTone);
                }
            }
            RoundStatus::Won => {
                presentation.tone = Tone::Correct;
                presentation.image = self.images.random_correct(&mut thread_rng());
                presentation.input_enabled = false;
                cues.push(Cue::CloseRound);
            }
            RoundStatus::Lost { .. } => {
                presentation.chance_tier = Some(ChanceTier::Exhausted);
                presentation.image = self.images.random_incorrect(&mut thread_rng());
                presentation.input_enabled = false;
                cues.push(Cue::CloseRound);
            }
        }

        Ok((outcome, cues))
    }

    pub fn apply_cue(&mut self, cue: Cue) -> Result<(), Error> {
        match cue {
            Cue::RestoreTone => {
                if self.presentation.tone == Tone::Incorrect {
                    self.presentation.tone = Tone::Neutral;
                }
                Ok(())
            }
            Cue::CloseRound => self.close_round(),
        }
    }

    /// Ends the round and offers a new game.
    pub fn close_round(&mut self) -> Result<(), Error> {
        self.end()?;
        if self.game.is_some() {
            self.presentation.input_enabled = false;
            self.presentation.new_game_prompt = true;
        }
        Ok(())
    }

    /// Closes the round if there is one and stores names and scores.
    pub fn end(&mut self) -> Result<(), Error> {
        let game = match self.game.as_mut() {
            Some(game) => game,
            None => return Ok(()),
        };
        if let Some(round) = game.end()? {
            self.last_board = Some(round);
        }
        scores::save(self.store.as_ref(), &self.profile, game.players())
    }

    /// Forgets the stored scores and goes back to asking for player names.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.store.clear(&self.profile)?;
        self.game = None;
        self.last_board = None;
        self.presentation = Presentation::default();
        log::info!("Session reset. Profile: '{}'.", self.profile);
        Ok(())
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            profile: self.profile.clone(),
            awaiting_players: self.awaiting_players(),
            state: self.game.as_ref().map(|game| game.state().clone()),
            players: self
                .game
                .as_ref()
                .map(|game| game.players().to_vec())
                .unwrap_or_default(),
            current_player: self.game.as_ref().map(Game::current_player),
            round: self
                .game
                .as_ref()
                .and_then(Game::round)
                .or(self.last_board.as_ref())
                .cloned(),
            presentation: self.presentation.clone(),
        }
    }

    fn start_round(&mut self, word_count: usize) -> Result<(), Error> {
        let game = self
            .game
            .as_mut()
            .ok_or(Error::Domain(DomainError::PlayersNotRegistered))?;
        game.start(word_count, &self.dictionary)?;
        self.last_board = None;
        self.presentation = Presentation::playing();
        Ok(())
    }
}
