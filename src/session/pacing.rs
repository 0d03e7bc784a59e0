use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

use crate::config::GameSettings;
use crate::session::actor::SessionCommand;

/// Delayed presentation transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Brings the tone back to neutral after a miss.
    RestoreTone,
    /// Ends a won or lost round and shows the new game prompt.
    CloseRound,
}

impl Cue {
    pub fn delay(&self, settings: &GameSettings) -> Duration {
        match self {
            Cue::RestoreTone => settings.tone_revert_delay(),
            Cue::CloseRound => settings.round_close_delay(),
        }
    }
}

/// Owns the timers of the pending cues, at most one per kind of cue.
#[derive(Default)]
pub(crate) struct Pacing {
    next_ticket: u64,
    pending: HashMap<Cue, (u64, JoinHandle<()>)>,
}

impl Pacing {
    /// Starts the timer of `cue`, replacing a pending one of the same kind.
    pub fn schedule(&mut self, cue: Cue, delay: Duration, session_tx: Sender<SessionCommand>) {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(error) = session_tx
                .send(SessionCommand::CueElapsed { ticket, cue })
                .await
            {
                log::debug!("The session stopped before a cue elapsed. Cue: '{cue:?}', Error: '{error}'.");
            }
        });
        if let Some((_, replaced)) = self.pending.insert(cue, (ticket, handle)) {
            replaced.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, (_, handle)) in self.pending.drain() {
            handle.abort();
        }
    }

    /// Claims an elapsed cue. False when it was replaced or cancelled after its timer fired.
    pub fn take_elapsed(&mut self, cue: Cue, ticket: u64) -> bool {
        match self.pending.get(&cue) {
            Some((pending_ticket, _)) if *pending_ticket == ticket => {
                self.pending.remove(&cue);
                true
            }
            _ => false,
        }
    }
}

impl Drop for Pacing {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
