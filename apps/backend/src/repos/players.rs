//! Player repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::players_sea as players_adapter;
pub use crate::adapters::players_sea::PlayerCreate;
pub use crate::domain::model::Player;
use crate::entities::players;
use crate::errors::domain::{DomainError, NotFoundKind};

impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            name: model.name,
            emoji: model.emoji,
            is_host: model.is_host,
            kicked_at: model.kicked_at,
            created_at: model.created_at,
        }
    }
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerCreate,
) -> Result<Player, DomainError> {
    Ok(Player::from(players_adapter::create_player(conn, dto).await?))
}

/// A player that belongs to `game_id`, kicked or not.
pub async fn require_in_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    player_id: i64,
) -> Result<Player, DomainError> {
    match players_adapter::find_by_id(conn, player_id).await? {
        Some(p) if p.game_id == game_id => Ok(Player::from(p)),
        _ => Err(DomainError::not_found(
            NotFoundKind::Player,
            format!("Player {player_id} is not in this game"),
        )),
    }
}

/// Like [`require_in_game`] but the player must not have been kicked.
pub async fn require_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    player_id: i64,
) -> Result<Player, DomainError> {
    let player = require_in_game(conn, game_id, player_id).await?;
    if !player.is_active() {
        return Err(DomainError::not_found(
            NotFoundKind::Player,
            format!("Player {player_id} is no longer in this game"),
        ));
    }
    Ok(player)
}

/// Every player row of the game, including kicked players.
pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<Player>, DomainError> {
    let rows = players_adapter::list_by_game(conn, game_id).await?;
    Ok(rows.into_iter().map(Player::from).collect())
}

/// The current roster.
pub async fn list_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<Player>, DomainError> {
    let mut players = list_all(conn, game_id).await?;
    players.retain(Player::is_active);
    Ok(players)
}

pub async fn mark_kicked<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<bool, DomainError> {
    Ok(players_adapter::mark_kicked(conn, player_id).await?)
}
