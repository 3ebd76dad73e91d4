//! Game repository functions for the domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::games_sea as games_adapter;
pub use crate::adapters::games_sea::GameUpdate;
pub use crate::domain::model::Game;
use crate::entities::games;
use crate::errors::domain::DomainError;

impl From<games::Model> for Game {
    fn from(model: games::Model) -> Self {
        Self {
            id: model.id,
            token: model.token,
            phase: model.phase.into(),
            current_fact_id: model.current_fact_id,
            story_teller_id: model.story_teller_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            started_at: model.started_at,
            ended_at: model.ended_at,
            last_fact_added: model.last_fact_added,
            version: model.version,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_by_id(conn, game_id).await?;
    Ok(game.map(Game::from))
}

pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    Ok(Game::from(games_adapter::require_game(conn, game_id).await?))
}

pub async fn find_by_token<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_by_token(conn, token).await?;
    Ok(game.map(Game::from))
}

/// Resolve a room token or fail with `GameNotFound`.
pub async fn require_by_token<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
) -> Result<Game, DomainError> {
    find_by_token(conn, token)
        .await?
        .ok_or_else(|| DomainError::from(sea_orm::DbErr::RecordNotFound("Game not found".into())))
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
) -> Result<Game, DomainError> {
    let game = games_adapter::create_game(conn, games_adapter::GameCreate::new(token)).await?;
    Ok(Game::from(game))
}

/// Take the per-game mutation lock (bumps `version`).
pub async fn lock_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    Ok(Game::from(games_adapter::lock_game(conn, game_id).await?))
}

pub async fn update_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpdate,
) -> Result<Game, DomainError> {
    Ok(Game::from(games_adapter::update_game(conn, dto).await?))
}
