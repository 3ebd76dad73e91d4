// Proptest generators and fixtures for domain types.

use proptest::prelude::*;
use time::OffsetDateTime;

use crate::domain::model::{LiveGuess, Player, PlayerId, ScoreEntry};
use crate::domain::phase::{Phase, PhaseEvent};
use crate::domain::scoring::ScoreReason;

pub fn player(id: PlayerId) -> Player {
    Player {
        id,
        game_id: 1,
        name: format!("p{id}"),
        emoji: "🦊".to_string(),
        is_host: id == 1,
        kicked_at: None,
        created_at: OffsetDateTime::UNIX_EPOCH,
    }
}

pub fn phase() -> impl Strategy<Value = Phase> {
    prop_oneof![
        Just(Phase::Lobby),
        Just(Phase::Guessing),
        Just(Phase::Storytelling),
        Just(Phase::Rating),
        Just(Phase::Ended),
    ]
}

pub fn phase_event() -> impl Strategy<Value = PhaseEvent> {
    prop_oneof![
        Just(PhaseEvent::Start),
        Just(PhaseEvent::FactResolved),
        Just(PhaseEvent::StoryFinished),
        any::<bool>().prop_map(|pool_remaining| PhaseEvent::RoundClosed { pool_remaining }),
        any::<bool>().prop_map(|pool_remaining| PhaseEvent::CurrentFactDropped { pool_remaining }),
        any::<bool>().prop_map(|pool_remaining| PhaseEvent::ForceNext { pool_remaining }),
        Just(PhaseEvent::EndEarly),
    ]
}

pub fn score_reason() -> impl Strategy<Value = ScoreReason> {
    prop_oneof![
        Just(ScoreReason::CorrectGuess),
        Just(ScoreReason::FooledGuessers),
        Just(ScoreReason::StumpedEveryone),
    ]
}

/// Score log over players `1..=players`.
pub fn score_log(players: i64) -> impl Strategy<Value = Vec<ScoreEntry>> {
    prop::collection::vec((1..=players, 1..=12i32, score_reason()), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (player_id, points, reason))| ScoreEntry {
                id: i as i64 + 1,
                player_id,
                fact_id: None,
                points,
                reason,
                description: String::new(),
                created_at: OffsetDateTime::UNIX_EPOCH,
            })
            .collect()
    })
}

/// Guesses on one fact by distinct guessers from a roster of `1..=roster`,
/// naming arbitrary other players.
pub fn guesses_on_fact(
    author: PlayerId,
    roster: i64,
) -> impl Strategy<Value = Vec<LiveGuess>> {
    prop::collection::vec(1..=roster, 0..=roster as usize).prop_map(move |named| {
        named
            .into_iter()
            .enumerate()
            .filter_map(|(i, guessed_player_id)| {
                let guesser_id = i as i64 + 1;
                (guesser_id != author && guessed_player_id != guesser_id).then(|| LiveGuess {
                    id: i as i64 + 1,
                    fact_id: 1,
                    guesser_id,
                    guessed_player_id,
                    is_correct: guessed_player_id == author,
                    created_at: OffsetDateTime::UNIX_EPOCH,
                })
            })
            .collect()
    })
}
