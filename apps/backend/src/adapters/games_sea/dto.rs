//! DTOs for games_sea adapter.

use time::OffsetDateTime;

use crate::entities::games::GamePhase;

/// DTO for creating a new game.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub token: String,
}

impl GameCreate {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// DTO for moving a game between rounds/phases.
///
/// `expected_version` must match the version taken by `lock_game` in the
/// same transaction. Unset fields are left untouched.
#[derive(Debug, Clone)]
pub struct GameUpdate {
    pub id: i64,
    pub expected_version: i32,
    pub phase: Option<GamePhase>,
    /// Three-state: None = no change, Some(None) = clear.
    pub current_fact_id: Option<Option<i64>>,
    pub story_teller_id: Option<Option<i64>>,
    pub started_at: Option<OffsetDateTime>,
    pub ended_at: Option<OffsetDateTime>,
    pub last_fact_added: Option<OffsetDateTime>,
}

impl GameUpdate {
    pub fn new(id: i64, expected_version: i32) -> Self {
        Self {
            id,
            expected_version,
            phase: None,
            current_fact_id: None,
            story_teller_id: None,
            started_at: None,
            ended_at: None,
            last_fact_added: None,
        }
    }

    pub fn with_phase(mut self, phase: GamePhase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn with_current_fact(mut self, fact_id: Option<i64>) -> Self {
        self.current_fact_id = Some(fact_id);
        self
    }

    pub fn with_story_teller(mut self, player_id: Option<i64>) -> Self {
        self.story_teller_id = Some(player_id);
        self
    }

    pub fn with_started_at(mut self, at: OffsetDateTime) -> Self {
        self.started_at = Some(at);
        self
    }

    pub fn with_ended_at(mut self, at: OffsetDateTime) -> Self {
        self.ended_at = Some(at);
        self
    }

    pub fn with_last_fact_added(mut self, at: OffsetDateTime) -> Self {
        self.last_fact_added = Some(at);
        self
    }
}
