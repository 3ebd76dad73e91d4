//! Scoring policy and the scoreboard fold over the score log.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::model::{Player, PlayerId, ScoreEntry};

/// Awarded to the player who names the author.
pub const CORRECT_GUESS_POINTS: i32 = 3;
/// Awarded to the author per wrong guess on their fact.
pub const POINTS_PER_WRONG_GUESS: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreReason {
    CorrectGuess,
    FooledGuessers,
    StumpedEveryone,
}

impl ScoreReason {
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreReason::CorrectGuess => "CORRECT_GUESS",
            ScoreReason::FooledGuessers => "FOOLED_GUESSERS",
            ScoreReason::StumpedEveryone => "STUMPED_EVERYONE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CORRECT_GUESS" => Some(ScoreReason::CorrectGuess),
            "FOOLED_GUESSERS" => Some(ScoreReason::FooledGuessers),
            "STUMPED_EVERYONE" => Some(ScoreReason::StumpedEveryone),
            _ => None,
        }
    }

    /// Points earned through the player's own fact.
    pub fn is_author_award(self) -> bool {
        matches!(
            self,
            ScoreReason::FooledGuessers | ScoreReason::StumpedEveryone
        )
    }
}

/// A score log entry about to be appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreAward {
    pub player_id: PlayerId,
    pub points: i32,
    pub reason: ScoreReason,
    pub description: String,
}

fn author_points(wrong_guesses: usize) -> i32 {
    i32::try_from(wrong_guesses)
        .unwrap_or(i32::MAX)
        .saturating_mul(POINTS_PER_WRONG_GUESS)
}

/// Awards for a fact resolved by a correct guess. Zero-point awards are omitted.
pub fn awards_for_correct_guess(
    guesser: &Player,
    author: &Player,
    wrong_guesses: usize,
) -> Vec<ScoreAward> {
    let mut awards = vec![ScoreAward {
        player_id: guesser.id,
        points: CORRECT_GUESS_POINTS,
        reason: ScoreReason::CorrectGuess,
        description: format!("{} guessed {}'s fact", guesser.name, author.name),
    }];

    let points = author_points(wrong_guesses);
    if points > 0 {
        awards.push(ScoreAward {
            player_id: author.id,
            points,
            reason: ScoreReason::FooledGuessers,
            description: format!("{} fooled {wrong_guesses} guesser(s)", author.name),
        });
    }
    awards
}

/// Awards for a fact nobody guessed.
pub fn awards_for_stumped(author: &Player, wrong_guesses: usize) -> Vec<ScoreAward> {
    let points = author_points(wrong_guesses);
    if points == 0 {
        return Vec::new();
    }
    vec![ScoreAward {
        player_id: author.id,
        points,
        reason: ScoreReason::StumpedEveryone,
        description: format!(
            "{} stumped everyone ({wrong_guesses} wrong guess(es))",
            author.name
        ),
    }]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreboardRow {
    pub player_id: PlayerId,
    pub name: String,
    pub emoji: String,
    pub points: i32,
    pub active: bool,
}

/// Sum the log per player.
///
/// Every active player gets a row; kicked players appear only if they hold
/// log entries. Ordered by points descending, then player id.
pub fn tally(players: &[Player], entries: &[ScoreEntry]) -> Vec<ScoreboardRow> {
    let mut totals: HashMap<PlayerId, i32> = HashMap::new();
    for entry in entries {
        *totals.entry(entry.player_id).or_default() += entry.points;
    }

    let mut rows: Vec<ScoreboardRow> = players
        .iter()
        .filter(|p| p.is_active() || totals.contains_key(&p.id))
        .map(|p| ScoreboardRow {
            player_id: p.id,
            name: p.name.clone(),
            emoji: p.emoji.clone(),
            points: totals.get(&p.id).copied().unwrap_or(0),
            active: p.is_active(),
        })
        .collect();

    rows.sort_by(|a, b| b.points.cmp(&a.points).then(a.player_id.cmp(&b.player_id)));
    rows
}
