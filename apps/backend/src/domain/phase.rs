//! Game phase state machine.
//!
//! `Lobby -> Guessing -> Storytelling -> Rating -> (Guessing | Ended)`.
//! Every phase change in the service layer goes through [`Phase::apply`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::games::GamePhase;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Lobby,
    Guessing,
    Storytelling,
    Rating,
    Ended,
}

/// Something that happened to the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// Host started the game.
    Start,
    /// The current fact was guessed correctly or stumped everyone.
    FactResolved,
    /// The storyteller signalled they are done.
    StoryFinished,
    /// Ratings are in (or the storyteller left); move on.
    RoundClosed { pool_remaining: bool },
    /// The current fact disappeared from under a guessing round.
    CurrentFactDropped { pool_remaining: bool },
    /// Host forced the next fact.
    ForceNext { pool_remaining: bool },
    /// Host ended the game.
    EndEarly,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Lobby => "lobby",
            Phase::Guessing => "guessing",
            Phase::Storytelling => "storytelling",
            Phase::Rating => "rating",
            Phase::Ended => "ended",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Phase::Ended
    }

    /// Fails with `GameEnded` once the game is over.
    pub fn ensure_open(self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::validation(
                ValidationKind::GameEnded,
                "The game has ended",
            ));
        }
        Ok(())
    }

    /// Fails with `GameEnded` or `PhaseMismatch` unless the game is in `expected`.
    pub fn expect(self, expected: Phase) -> Result<(), DomainError> {
        self.ensure_open()?;
        if self != expected {
            return Err(DomainError::phase_mismatch(format!(
                "Expected phase {expected}, game is in {self}"
            )));
        }
        Ok(())
    }

    /// Compute the phase that follows `event`, or reject it.
    pub fn apply(self, event: PhaseEvent) -> Result<Phase, DomainError> {
        use Phase::*;
        use PhaseEvent::*;

        self.ensure_open()?;

        let next_or_end = |pool_remaining: bool| if pool_remaining { Guessing } else { Ended };

        match (self, event) {
            (_, EndEarly) => Ok(Ended),
            (Lobby, Start) => Ok(Guessing),
            (Guessing, FactResolved) => Ok(Storytelling),
            (Storytelling, StoryFinished) => Ok(Rating),
            (Storytelling | Rating, RoundClosed { pool_remaining }) => Ok(next_or_end(pool_remaining)),
            (Guessing, CurrentFactDropped { pool_remaining }) => Ok(next_or_end(pool_remaining)),
            (Guessing | Rating, ForceNext { pool_remaining }) => Ok(next_or_end(pool_remaining)),
            (phase, event) => Err(DomainError::phase_mismatch(format!(
                "{event:?} is not allowed during {phase}"
            ))),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<GamePhase> for Phase {
    fn from(value: GamePhase) -> Self {
        match value {
            GamePhase::Lobby => Phase::Lobby,
            GamePhase::Guessing => Phase::Guessing,
            GamePhase::Storytelling => Phase::Storytelling,
            GamePhase::Rating => Phase::Rating,
            GamePhase::Ended => Phase::Ended,
        }
    }
}

impl From<Phase> for GamePhase {
    fn from(value: Phase) -> Self {
        match value {
            Phase::Lobby => GamePhase::Lobby,
            Phase::Guessing => GamePhase::Guessing,
            Phase::Storytelling => GamePhase::Storytelling,
            Phase::Rating => GamePhase::Rating,
            Phase::Ended => GamePhase::Ended,
        }
    }
}
