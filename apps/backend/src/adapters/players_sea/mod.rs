//! SeaORM adapter for players.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::players;

pub mod dto;

pub use dto::PlayerCreate;

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerCreate,
) -> Result<players::Model, sea_orm::DbErr> {
    let player = players::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        name: Set(dto.name),
        emoji: Set(dto.emoji),
        is_host: Set(dto.is_host),
        kicked_at: Set(None),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };
    player.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id).one(conn).await
}

/// All players of a game, kicked ones included, in join order.
pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::GameId.eq(game_id))
        .order_by_asc(players::Column::Id)
        .all(conn)
        .await
}

/// Soft-remove a player. Returns false if the player was already kicked.
pub async fn mark_kicked<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = players::Entity::update_many()
        .col_expr(players::Column::KickedAt, Expr::value(Some(now)))
        .filter(players::Column::Id.eq(player_id))
        .filter(players::Column::KickedAt.is_null())
        .exec(conn)
        .await?;
    Ok(result.rows_affected == 1)
}
