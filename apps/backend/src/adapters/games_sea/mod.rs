//! SeaORM adapter for games - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::games;

pub mod dto;

pub use dto::{GameCreate, GameUpdate};

// Adapter functions return DbErr; repos map to DomainError via From<DbErr>.

fn game_not_found() -> sea_orm::DbErr {
    sea_orm::DbErr::RecordNotFound("Game not found".to_string())
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, sea_orm::DbErr> {
    find_by_id(conn, game_id).await?.ok_or_else(game_not_found)
}

pub async fn find_by_token<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::Token.eq(token))
        .one(conn)
        .await
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game = games::ActiveModel {
        id: NotSet,
        token: Set(dto.token),
        phase: Set(games::GamePhase::Lobby),
        current_fact_id: Set(None),
        story_teller_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        started_at: Set(None),
        ended_at: Set(None),
        last_fact_added: Set(None),
        version: Set(1),
    };
    game.insert(conn).await
}

/// Bump the version of a game and return the locked row.
///
/// The row-level UPDATE serializes concurrent mutations of the same game on
/// Postgres; SQLite serializes writers on its own.
pub async fn lock_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = games::Entity::update_many()
        .col_expr(games::Column::Version, Expr::col(games::Column::Version).add(1))
        .col_expr(games::Column::UpdatedAt, Expr::value(now))
        .filter(games::Column::Id.eq(game_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(game_not_found());
    }
    require_game(conn, game_id).await
}

/// Apply a [`GameUpdate`] guarded by the expected version, then refetch.
pub async fn update_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpdate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let mut update = games::Entity::update_many()
        .col_expr(games::Column::UpdatedAt, Expr::value(now))
        .filter(games::Column::Id.eq(dto.id))
        .filter(games::Column::Version.eq(dto.expected_version));

    if let Some(phase) = dto.phase {
        update = update.col_expr(games::Column::Phase, Expr::value(phase));
    }
    if let Some(fact) = dto.current_fact_id {
        update = update.col_expr(games::Column::CurrentFactId, Expr::value(fact));
    }
    if let Some(teller) = dto.story_teller_id {
        update = update.col_expr(games::Column::StoryTellerId, Expr::value(teller));
    }
    if let Some(at) = dto.started_at {
        update = update.col_expr(games::Column::StartedAt, Expr::value(Some(at)));
    }
    if let Some(at) = dto.ended_at {
        update = update.col_expr(games::Column::EndedAt, Expr::value(Some(at)));
    }
    if let Some(at) = dto.last_fact_added {
        update = update.col_expr(games::Column::LastFactAdded, Expr::value(Some(at)));
    }

    let result = update.exec(conn).await?;

    if result.rows_affected == 0 {
        let game = find_by_id(conn, dto.id).await?.ok_or_else(game_not_found)?;
        let payload = format!(
            "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
            dto.expected_version, game.version
        );
        return Err(sea_orm::DbErr::Custom(payload));
    }

    require_game(conn, dto.id).await
}
