//! DTOs for facts_sea adapter.

#[derive(Debug, Clone)]
pub struct FactCreate {
    pub game_id: i64,
    pub author_id: i64,
    pub text: String,
}

/// Rating aggregate written when a rating round closes.
#[derive(Debug, Clone, Copy)]
pub struct FactRatingSummary {
    pub fact_id: i64,
    pub average: Option<f64>,
    pub count: i32,
}
