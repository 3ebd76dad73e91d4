//! DTOs for score_log_sea adapter.

#[derive(Debug, Clone)]
pub struct ScoreLogCreate {
    pub game_id: i64,
    pub player_id: i64,
    pub fact_id: Option<i64>,
    pub points: i32,
    pub reason: String,
    pub description: String,
}
