//! Guess checking and round resolution for the current fact.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::model::{LiveGuess, PlayerId};
use crate::errors::domain::{DomainError, ValidationKind};

/// Where the guessing round stands after the latest guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RoundResolution {
    /// Still waiting on guesses.
    Open,
    /// Someone named the author.
    Correct {
        guesser_id: PlayerId,
        wrong_guesses: usize,
    },
    /// Every eligible guesser was wrong.
    Stumped { wrong_guesses: usize },
}

impl RoundResolution {
    pub fn is_resolved(self) -> bool {
        !matches!(self, RoundResolution::Open)
    }
}

/// Reject illegal guesses and report whether the guess names the author.
pub fn check_guess(
    author_id: PlayerId,
    guesser_id: PlayerId,
    guessed_player_id: PlayerId,
) -> Result<bool, DomainError> {
    if guesser_id == author_id {
        return Err(DomainError::validation(
            ValidationKind::CannotGuessOwnFact,
            "You cannot guess your own fact",
        ));
    }
    if guessed_player_id == guesser_id {
        return Err(DomainError::validation(
            ValidationKind::CannotGuessSelf,
            "You cannot name yourself as the author",
        ));
    }
    Ok(guessed_player_id == author_id)
}

pub fn wrong_guess_count(guesses: &[LiveGuess]) -> usize {
    guesses.iter().filter(|g| !g.is_correct).count()
}

/// Resolve the round from the guesses on the current fact.
///
/// `active_players` is the current roster; the author is excluded from the
/// eligible guessers. A round with nobody left to guess counts as stumped.
pub fn resolve_round(
    author_id: PlayerId,
    active_players: &[PlayerId],
    guesses: &[LiveGuess],
) -> RoundResolution {
    let wrong_guesses = wrong_guess_count(guesses);

    if let Some(first_correct) = guesses
        .iter()
        .filter(|g| g.is_correct)
        .min_by_key(|g| (g.created_at, g.id))
    {
        return RoundResolution::Correct {
            guesser_id: first_correct.guesser_id,
            wrong_guesses,
        };
    }

    let guessed: HashSet<PlayerId> = guesses.iter().map(|g| g.guesser_id).collect();
    let everyone_guessed = active_players
        .iter()
        .filter(|&&p| p != author_id)
        .all(|p| guessed.contains(p));

    if everyone_guessed {
        RoundResolution::Stumped { wrong_guesses }
    } else {
        RoundResolution::Open
    }
}
