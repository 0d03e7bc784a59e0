pub mod game_fsm;
pub mod outcome;

use rand::thread_rng;
use rust_fsm::StateMachine;

use crate::dictionary::Dictionary;
use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::fold::fold;
use crate::game::game_fsm::{GameFsm, GameFsmInput, GameFsmState};
use crate::game::outcome::{
    Adjudication, ChanceChange, GuessKind, GuessOutcome, Rejection, RevealedLetter, RoundStatus,
};
use crate::player::{ChanceTier, Player};
use crate::round::Round;

/// What a guess did to the round, before the turn and the round status are settled.
struct Judgement {
    guess: GuessKind,
    is_correct: bool,
    revealed: Vec<RevealedLetter>,
    solved_words: Vec<usize>,
    points_awarded: u32,
    chance_change: Option<ChanceChange>,
}

pub struct Game {
    fsm: StateMachine<GameFsm>,
    players: Vec<Player>,
    current_player: usize,
    round: Option<Round>,
    max_word_count: usize,
}

impl Game {
    pub const MINIMUM_WORDS: usize = 1;
    pub const DEFAULT_MAXIMUM_WORDS: usize = 10;

    pub fn new(player1: &str, player2: Option<&str>) -> Result<Self, Error> {
        let player2 = player2.map(str::trim).filter(|name| !name.is_empty());
        let players = std::iter::once(player1.trim())
            .chain(player2)
            .map(Player::new)
            .collect();
        Game::with_players(players)
    }

    /// Builds a game for players restored from storage, keeping their scores.
    pub fn with_players(players: Vec<Player>) -> Result<Self, Error> {
        if players.is_empty() || players.len() > 2 {
            return Err(Error::log_and_create_internal(&format!(
                "A game needs one or two players. ActualPlayers: '{}'.",
                players.len()
            )));
        }
        if players.iter().any(|player| player.name.trim().is_empty()) {
            return Err(Error::Domain(DomainError::EmptyPlayerName));
        }

        Ok(Self {
            fsm: StateMachine::default(),
            players,
            current_player: 0,
            round: None,
            max_word_count: Game::DEFAULT_MAXIMUM_WORDS,
        })
    }

    pub fn with_max_word_count(mut self, max_word_count: usize) -> Self {
        self.max_word_count = max_word_count.max(Game::MINIMUM_WORDS);
        self
    }

    pub fn state(&self) -> &GameFsmState {
        self.fsm.state()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Starts a round of `word_count` random words. An unfinished round is ended first.
    pub fn start(&mut self, word_count: usize, dictionary: &Dictionary) -> Result<(), Error> {
        if !(Game::MINIMUM_WORDS..=self.max_word_count).contains(&word_count) {
            return Err(Error::Domain(DomainError::InvalidWordCount(
                word_count,
                Game::MINIMUM_WORDS,
                self.max_word_count,
            )));
        }
        self.end()?;

        let mut rng = thread_rng();
        let words = (0..word_count)
            .map(|_| {
                dictionary
                    .random_word(&mut rng)
                    .map(str::to_string)
                    .ok_or_else(|| Error::log_and_create_internal("The dictionary has no words."))
            })
            .collect::<Result<Vec<String>, Error>>()?;

        self.round = Some(Round::new(&words));
        for player in self.players.iter_mut() {
            player.reset_chances();
        }
        self.current_player = 0;
        log::info!(
            "Round started. Words: '{}', Players: '{}'.",
            word_count,
            self.players.len()
        );
        self.process_event(&GameFsmInput::StartRound)
    }

    pub fn submit_guess(&mut self, text: &str) -> Result<GuessOutcome, Error> {
        if self.state() != &GameFsmState::InProgress {
            return Err(Error::Domain(DomainError::RoundNotInProgress(
                self.state().to_owned(),
            )));
        }
        let guess = fold(text);
        let player_index = self.current_player;
        let round = self
            .round
            .as_mut()
            .ok_or_else(|| Error::log_and_create_internal("Missing round, there is a bug in the code."))?;

        let is_forced_word_mode = round.is_forced_word_mode();
        if is_forced_word_mode {
            round.show_indicator();
        }
        let length = guess.chars().count();
        let judgement = if length == 0 {
            Err(Rejection::WrongLength)
        } else if is_forced_word_mode || round.matches_unsolved_length(length) {
            // only a miss against the last word of the round is charged
            let is_charged = is_forced_word_mode || round.matches_last_word_length(length);
            Game::judge_word(
                round,
                &mut self.players[player_index],
                player_index,
                &guess,
                is_charged,
            )
        } else if length == 1 {
            Game::judge_letter(round, &guess)
        } else {
            Err(Rejection::WrongLength)
        };

        let judgement = match judgement {
            Ok(judgement) => judgement,
            Err(reason) => {
                log::warn!("Guess rejected. Guess: '{guess}', Reason: '{reason}'.");
                return Ok(GuessOutcome::Rejected { guess, reason });
            }
        };

        let (next_player, round_status) = self.settle(judgement.is_correct)?;
        Ok(GuessOutcome::Adjudicated(Adjudication {
            player: player_index,
            guess: judgement.guess,
            is_correct: judgement.is_correct,
            revealed: judgement.revealed,
            solved_words: judgement.solved_words,
            points_awarded: judgement.points_awarded,
            chance_change: judgement.chance_change,
            next_player,
            round: round_status,
        }))
    }

    /// Closes the round, whatever its state. Returns the closed round, or `None` when there was
    /// nothing to close.
    pub fn end(&mut self) -> Result<Option<Round>, Error> {
        if self.state() == &GameFsmState::Setup {
            return Ok(None);
        }
        self.process_event(&GameFsmInput::EndRound)?;
        for player in self.players.iter_mut() {
            player.reset_chances();
        }
        self.current_player = 0;
        Ok(self.round.take())
    }

    fn judge_word(
        round: &mut Round,
        player: &mut Player,
        player_index: usize,
        guess: &str,
        is_charged: bool,
    ) -> Result<Judgement, Rejection> {
        let word_guess = round.guess_word(guess)?;
        let guess = GuessKind::Word {
            word: guess.to_string(),
        };

        if word_guess.solved.is_empty() {
            let chance_change = if !is_charged {
                None
            } else if round.show_indicator() {
                Some(ChanceChange::WarmUpAbsorbed)
            } else {
                let remaining = player.lose_chance();
                Some(ChanceChange::Spent {
                    player: player_index,
                    remaining,
                    tier: ChanceTier::from(remaining),
                })
            };
            return Ok(Judgement {
                guess,
                is_correct: false,
                revealed: Vec::default(),
                solved_words: Vec::default(),
                points_awarded: 0,
                chance_change,
            });
        }

        let points_awarded = word_guess.solved.len() as u32;
        for _ in 0..points_awarded {
            player.add_point();
        }
        Ok(Judgement {
            guess,
            is_correct: true,
            revealed: word_guess.revealed,
            solved_words: word_guess.solved,
            points_awarded,
            chance_change: None,
        })
    }

    fn judge_letter(round: &mut Round, guess: &str) -> Result<Judgement, Rejection> {
        let letter = guess.chars().next().ok_or(Rejection::WrongLength)?;
        let letter_guess = round.guess_letter(letter)?;

        Ok(Judgement {
            guess: GuessKind::Letter { letter },
            is_correct: letter_guess.occurrences > 0,
            revealed: letter_guess.revealed,
            solved_words: Vec::default(),
            points_awarded: 0,
            chance_change: None,
        })
    }

    /// Decides between winning, losing, handing over the turn or keeping it.
    fn settle(&mut self, is_correct: bool) -> Result<(Option<usize>, RoundStatus), Error> {
        let other_player = self
            .other_player()
            .filter(|index| self.players[*index].has_chances());
        let round = self
            .round
            .as_mut()
            .ok_or_else(|| Error::log_and_create_internal("Missing round, there is a bug in the code."))?;

        if round.all_solved() {
            log::info!("Round won. Player: '{}'.", self.players[self.current_player].name);
            self.process_event(&GameFsmInput::AllWordsSolved)?;
            return Ok((None, RoundStatus::Won));
        }

        if !self.players[self.current_player].has_chances() && other_player.is_none() {
            let revealed = round.reveal_remaining();
            log::info!("Round lost. Revealed letters: '{}'.", revealed.len());
            self.process_event(&GameFsmInput::ChancesExhausted)?;
            return Ok((None, RoundStatus::Lost { revealed }));
        }

        match other_player {
            Some(next_player) if !is_correct => {
                self.current_player = next_player;
                Ok((Some(next_player), RoundStatus::InProgress))
            }
            _ => Ok((None, RoundStatus::InProgress)),
        }
    }

    fn other_player(&self) -> Option<usize> {
        if self.players.len() == 2 {
            Some(1 - self.current_player)
        } else {
            None
        }
    }

    fn process_event(&mut self, event: &GameFsmInput) -> Result<(), Error> {
        self.fsm.consume(event).map(|_| ()).map_err(|error| {
            Error::log_and_create_internal(&format!(
                "The fsm in state {:?} can't transition with an event {:?}. Error: '{error}'.",
                self.fsm.state(),
                event
            ))
        })
    }
}
