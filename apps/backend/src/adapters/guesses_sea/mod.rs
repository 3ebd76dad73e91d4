//! SeaORM adapter for live guesses.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::live_guesses;

pub mod dto;

pub use dto::GuessCreate;

/// Insert a guess; a second guess by the same player on the same fact fails
/// on `ux_live_guesses_fact_guesser`.
pub async fn create_guess<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GuessCreate,
) -> Result<live_guesses::Model, sea_orm::DbErr> {
    let guess = live_guesses::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        fact_id: Set(dto.fact_id),
        guesser_id: Set(dto.guesser_id),
        guessed_player_id: Set(dto.guessed_player_id),
        is_correct: Set(dto.is_correct),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };
    guess.insert(conn).await
}

pub async fn find_by_fact_and_guesser<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
    guesser_id: i64,
) -> Result<Option<live_guesses::Model>, sea_orm::DbErr> {
    live_guesses::Entity::find()
        .filter(live_guesses::Column::FactId.eq(fact_id))
        .filter(live_guesses::Column::GuesserId.eq(guesser_id))
        .one(conn)
        .await
}

pub async fn list_for_fact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
) -> Result<Vec<live_guesses::Model>, sea_orm::DbErr> {
    live_guesses::Entity::find()
        .filter(live_guesses::Column::FactId.eq(fact_id))
        .order_by_asc(live_guesses::Column::Id)
        .all(conn)
        .await
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<live_guesses::Model>, sea_orm::DbErr> {
    live_guesses::Entity::find()
        .filter(live_guesses::Column::GameId.eq(game_id))
        .order_by_asc(live_guesses::Column::Id)
        .all(conn)
        .await
}

pub async fn delete_for_facts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_ids: &[i64],
) -> Result<u64, sea_orm::DbErr> {
    if fact_ids.is_empty() {
        return Ok(0);
    }
    let result = live_guesses::Entity::delete_many()
        .filter(live_guesses::Column::FactId.is_in(fact_ids.iter().copied()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
