use std::fmt;

use rust_fsm::state_machine;

/*
 * Setup
 * InProgress
 *    Players take turns guessing letters or words
 *    Every word solved: Won
 *    Nobody left with chances: Lost
 * EndRound goes back to Setup, also from an unfinished round
 */
state_machine! {
    derive(Debug, Clone, PartialEq)
    pub GameFsm(Setup)

    Setup => {
        StartRound => InProgress
    },
    InProgress => {
        AllWordsSolved => Won,
        ChancesExhausted => Lost,
        EndRound => Setup,
    },
    Won => {
        EndRound => Setup
    },
    Lost => {
        EndRound => Setup
    }
}

impl fmt::Display for GameFsmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
