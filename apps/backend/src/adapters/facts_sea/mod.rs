//! SeaORM adapter for facts.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::facts;

pub mod dto;

pub use dto::{FactCreate, FactRatingSummary};

fn in_pool() -> sea_orm::Condition {
    sea_orm::Condition::all()
        .add(facts::Column::Guessed.eq(false))
        .add(facts::Column::StoryRevealed.eq(false))
}

pub async fn create_fact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: FactCreate,
) -> Result<facts::Model, sea_orm::DbErr> {
    let fact = facts::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        author_id: Set(dto.author_id),
        text: Set(dto.text),
        guessed: Set(false),
        story_revealed: Set(false),
        story: Set(None),
        story_rating_average: Set(None),
        story_rating_count: Set(0),
        created_at: Set(time::OffsetDateTime::now_utc()),
        resolved_at: Set(None),
    };
    fact.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
) -> Result<Option<facts::Model>, sea_orm::DbErr> {
    facts::Entity::find_by_id(fact_id).one(conn).await
}

pub async fn require_fact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
) -> Result<facts::Model, sea_orm::DbErr> {
    find_by_id(conn, fact_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Fact not found".to_string()))
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<facts::Model>, sea_orm::DbErr> {
    facts::Entity::find()
        .filter(facts::Column::GameId.eq(game_id))
        .order_by_asc(facts::Column::Id)
        .all(conn)
        .await
}

/// Ids of facts still in the pool.
pub async fn pool_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    facts::Entity::find()
        .select_only()
        .column(facts::Column::Id)
        .filter(facts::Column::GameId.eq(game_id))
        .filter(in_pool())
        .order_by_asc(facts::Column::Id)
        .into_tuple::<i64>()
        .all(conn)
        .await
}

pub async fn count_by_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    facts::Entity::find()
        .filter(facts::Column::AuthorId.eq(author_id))
        .count(conn)
        .await
}

/// Flip `guessed` only if the fact is still unresolved.
///
/// Returns true for the single caller that performed the flip.
pub async fn mark_guessed_if_unresolved<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = facts::Entity::update_many()
        .col_expr(facts::Column::Guessed, Expr::value(true))
        .col_expr(facts::Column::ResolvedAt, Expr::value(Some(now)))
        .filter(facts::Column::Id.eq(fact_id))
        .filter(in_pool())
        .exec(conn)
        .await?;
    Ok(result.rows_affected == 1)
}

/// Reveal the author without marking the fact guessed.
pub async fn mark_stumped<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = facts::Entity::update_many()
        .col_expr(facts::Column::StoryRevealed, Expr::value(true))
        .col_expr(facts::Column::ResolvedAt, Expr::value(Some(now)))
        .filter(facts::Column::Id.eq(fact_id))
        .filter(in_pool())
        .exec(conn)
        .await?;
    Ok(result.rows_affected == 1)
}

pub async fn reveal_story<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
    story: Option<String>,
) -> Result<(), sea_orm::DbErr> {
    facts::Entity::update_many()
        .col_expr(facts::Column::StoryRevealed, Expr::value(true))
        .col_expr(facts::Column::Story, Expr::value(story))
        .filter(facts::Column::Id.eq(fact_id))
        .exec(conn)
        .await?;
    Ok(())
}

pub async fn store_rating_summary<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    summary: FactRatingSummary,
) -> Result<(), sea_orm::DbErr> {
    facts::Entity::update_many()
        .col_expr(facts::Column::StoryRatingAverage, Expr::value(summary.average))
        .col_expr(facts::Column::StoryRatingCount, Expr::value(summary.count))
        .filter(facts::Column::Id.eq(summary.fact_id))
        .exec(conn)
        .await?;
    Ok(())
}

/// Ids of an author's facts still in the pool.
pub async fn pool_ids_by_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    facts::Entity::find()
        .select_only()
        .column(facts::Column::Id)
        .filter(facts::Column::AuthorId.eq(author_id))
        .filter(in_pool())
        .order_by_asc(facts::Column::Id)
        .into_tuple::<i64>()
        .all(conn)
        .await
}

pub async fn delete_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_ids: &[i64],
) -> Result<u64, sea_orm::DbErr> {
    if fact_ids.is_empty() {
        return Ok(0);
    }
    let result = facts::Entity::delete_many()
        .filter(facts::Column::Id.is_in(fact_ids.iter().copied()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
