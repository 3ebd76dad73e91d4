//! DTOs for ratings_sea adapter.

#[derive(Debug, Clone)]
pub struct RatingCreate {
    pub game_id: i64,
    pub fact_id: i64,
    pub rater_id: i64,
    pub rating: u8,
}
