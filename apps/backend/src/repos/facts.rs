//! Fact repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::facts_sea as facts_adapter;
pub use crate::adapters::facts_sea::{FactCreate, FactRatingSummary};
pub use crate::domain::model::Fact;
use crate::entities::facts;
use crate::errors::domain::{DomainError, NotFoundKind};

impl From<facts::Model> for Fact {
    fn from(model: facts::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            author_id: model.author_id,
            text: model.text,
            guessed: model.guessed,
            story_revealed: model.story_revealed,
            story: model.story,
            story_rating_average: model.story_rating_average,
            story_rating_count: model.story_rating_count,
            created_at: model.created_at,
            resolved_at: model.resolved_at,
        }
    }
}

pub async fn create_fact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: FactCreate,
) -> Result<Fact, DomainError> {
    Ok(Fact::from(facts_adapter::create_fact(conn, dto).await?))
}

/// A fact that belongs to `game_id`.
pub async fn require_in_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    fact_id: i64,
) -> Result<Fact, DomainError> {
    match facts_adapter::find_by_id(conn, fact_id).await? {
        Some(f) if f.game_id == game_id => Ok(Fact::from(f)),
        _ => Err(DomainError::not_found(
            NotFoundKind::Fact,
            format!("Fact {fact_id} is not in this game"),
        )),
    }
}

pub async fn require_fact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
) -> Result<Fact, DomainError> {
    Ok(Fact::from(facts_adapter::require_fact(conn, fact_id).await?))
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<Fact>, DomainError> {
    let rows = facts_adapter::list_by_game(conn, game_id).await?;
    Ok(rows.into_iter().map(Fact::from).collect())
}

pub async fn pool_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<i64>, DomainError> {
    Ok(facts_adapter::pool_ids(conn, game_id).await?)
}

pub async fn count_by_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
) -> Result<usize, DomainError> {
    let n = facts_adapter::count_by_author(conn, author_id).await?;
    Ok(usize::try_from(n).unwrap_or(usize::MAX))
}

pub async fn mark_guessed_if_unresolved<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
) -> Result<bool, DomainError> {
    Ok(facts_adapter::mark_guessed_if_unresolved(conn, fact_id).await?)
}

pub async fn mark_stumped<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
) -> Result<bool, DomainError> {
    Ok(facts_adapter::mark_stumped(conn, fact_id).await?)
}

pub async fn reveal_story<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
    story: Option<String>,
) -> Result<(), DomainError> {
    Ok(facts_adapter::reveal_story(conn, fact_id, story).await?)
}

pub async fn store_rating_summary<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    summary: FactRatingSummary,
) -> Result<(), DomainError> {
    Ok(facts_adapter::store_rating_summary(conn, summary).await?)
}

pub async fn pool_ids_by_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
) -> Result<Vec<i64>, DomainError> {
    Ok(facts_adapter::pool_ids_by_author(conn, author_id).await?)
}

pub async fn delete_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_ids: &[i64],
) -> Result<u64, DomainError> {
    Ok(facts_adapter::delete_by_ids(conn, fact_ids).await?)
}
