//! Live guess repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::guesses_sea as guesses_adapter;
pub use crate::adapters::guesses_sea::GuessCreate;
pub use crate::domain::model::LiveGuess;
use crate::entities::live_guesses;
use crate::errors::domain::DomainError;

impl From<live_guesses::Model> for LiveGuess {
    fn from(model: live_guesses::Model) -> Self {
        Self {
            id: model.id,
            fact_id: model.fact_id,
            guesser_id: model.guesser_id,
            guessed_player_id: model.guessed_player_id,
            is_correct: model.is_correct,
            created_at: model.created_at,
        }
    }
}

pub async fn create_guess<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GuessCreate,
) -> Result<LiveGuess, DomainError> {
    Ok(LiveGuess::from(guesses_adapter::create_guess(conn, dto).await?))
}

pub async fn find_by_fact_and_guesser<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
    guesser_id: i64,
) -> Result<Option<LiveGuess>, DomainError> {
    let guess = guesses_adapter::find_by_fact_and_guesser(conn, fact_id, guesser_id).await?;
    Ok(guess.map(LiveGuess::from))
}

pub async fn list_for_fact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
) -> Result<Vec<LiveGuess>, DomainError> {
    let rows = guesses_adapter::list_for_fact(conn, fact_id).await?;
    Ok(rows.into_iter().map(LiveGuess::from).collect())
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<LiveGuess>, DomainError> {
    let rows = guesses_adapter::list_by_game(conn, game_id).await?;
    Ok(rows.into_iter().map(LiveGuess::from).collect())
}

pub async fn delete_for_facts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_ids: &[i64],
) -> Result<u64, DomainError> {
    Ok(guesses_adapter::delete_for_facts(conn, fact_ids).await?)
}
