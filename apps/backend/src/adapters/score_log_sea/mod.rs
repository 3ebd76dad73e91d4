//! SeaORM adapter for the score log. Insert and read only.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::score_log;

pub mod dto;

pub use dto::ScoreLogCreate;

pub async fn append<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ScoreLogCreate,
) -> Result<score_log::Model, sea_orm::DbErr> {
    let entry = score_log::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        player_id: Set(dto.player_id),
        fact_id: Set(dto.fact_id),
        points: Set(dto.points),
        reason: Set(dto.reason),
        description: Set(dto.description),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };
    entry.insert(conn).await
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<score_log::Model>, sea_orm::DbErr> {
    score_log::Entity::find()
        .filter(score_log::Column::GameId.eq(game_id))
        .order_by_asc(score_log::Column::Id)
        .all(conn)
        .await
}
