//! SeaORM adapter for story ratings.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::story_ratings;

pub mod dto;

pub use dto::RatingCreate;

pub async fn create_rating<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RatingCreate,
) -> Result<story_ratings::Model, sea_orm::DbErr> {
    let rating = story_ratings::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        fact_id: Set(dto.fact_id),
        rater_id: Set(dto.rater_id),
        rating: Set(i16::from(dto.rating)),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };
    rating.insert(conn).await
}

pub async fn find_by_fact_and_rater<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
    rater_id: i64,
) -> Result<Option<story_ratings::Model>, sea_orm::DbErr> {
    story_ratings::Entity::find()
        .filter(story_ratings::Column::FactId.eq(fact_id))
        .filter(story_ratings::Column::RaterId.eq(rater_id))
        .one(conn)
        .await
}

pub async fn list_for_fact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
) -> Result<Vec<story_ratings::Model>, sea_orm::DbErr> {
    story_ratings::Entity::find()
        .filter(story_ratings::Column::FactId.eq(fact_id))
        .order_by_asc(story_ratings::Column::Id)
        .all(conn)
        .await
}

pub async fn count_for_fact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    story_ratings::Entity::find()
        .filter(story_ratings::Column::FactId.eq(fact_id))
        .count(conn)
        .await
}

pub async fn delete_for_facts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_ids: &[i64],
) -> Result<u64, sea_orm::DbErr> {
    if fact_ids.is_empty() {
        return Ok(0);
    }
    let result = story_ratings::Entity::delete_many()
        .filter(story_ratings::Column::FactId.is_in(fact_ids.iter().copied()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
