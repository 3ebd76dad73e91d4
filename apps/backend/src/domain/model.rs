//! Domain models loaded through the repos layer.
//!
//! Plain data with no persistence concerns; repos convert from the SeaORM
//! entities into these.

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::phase::Phase;
use crate::domain::scoring::ScoreReason;

pub type GameId = i64;
pub type PlayerId = i64;
pub type FactId = i64;

#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: GameId,
    pub token: String,
    pub phase: Phase,
    pub current_fact_id: Option<FactId>,
    pub story_teller_id: Option<PlayerId>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub started_at: Option<OffsetDateTime>,
    pub ended_at: Option<OffsetDateTime>,
    pub last_fact_added: Option<OffsetDateTime>,
    pub version: i32,
}

impl Game {
    pub fn started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn ended(&self) -> bool {
        self.phase == Phase::Ended
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub game_id: GameId,
    pub name: String,
    pub emoji: String,
    pub is_host: bool,
    pub kicked_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

impl Player {
    pub fn is_active(&self) -> bool {
        self.kicked_at.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fact {
    pub id: FactId,
    pub game_id: GameId,
    pub author_id: PlayerId,
    pub text: String,
    pub guessed: bool,
    pub story_revealed: bool,
    pub story: Option<String>,
    pub story_rating_average: Option<f64>,
    pub story_rating_count: i32,
    pub created_at: OffsetDateTime,
    pub resolved_at: Option<OffsetDateTime>,
}

impl Fact {
    /// Neither guessed nor revealed: still a candidate for a round.
    pub fn in_pool(&self) -> bool {
        !self.guessed && !self.story_revealed
    }

    /// Whether the author may be shown to everyone.
    pub fn author_visible(&self) -> bool {
        self.guessed || self.story_revealed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveGuess {
    pub id: i64,
    pub fact_id: FactId,
    pub guesser_id: PlayerId,
    pub guessed_player_id: PlayerId,
    pub is_correct: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRating {
    pub id: i64,
    pub fact_id: FactId,
    pub rater_id: PlayerId,
    pub rating: u8,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub id: i64,
    pub player_id: PlayerId,
    pub fact_id: Option<FactId>,
    pub points: i32,
    pub reason: ScoreReason,
    pub description: String,
    pub created_at: OffsetDateTime,
}
