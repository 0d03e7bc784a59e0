use thiserror::Error;

use crate::game::game_fsm::GameFsmState;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("There is no round in progress. ActualState: '{0}'.")]
    RoundNotInProgress(GameFsmState),
    #[error("Invalid amount of words for a round. ActualWords: '{0}', MinimumWords: '{1}', MaximumWords: '{2}'.")]
    InvalidWordCount(usize, usize, usize),
    #[error("A player name cannot be empty.")]
    EmptyPlayerName,
    #[error("The players of the session are not registered yet.")]
    PlayersNotRegistered,
    #[error("The session does not exist. SessionId: '{0}'.")]
    SessionDoesNotExist(String),
}
