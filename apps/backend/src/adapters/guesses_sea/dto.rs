//! DTOs for guesses_sea adapter.

#[derive(Debug, Clone)]
pub struct GuessCreate {
    pub game_id: i64,
    pub fact_id: i64,
    pub guesser_id: i64,
    pub guessed_player_id: i64,
    pub is_correct: bool,
}
