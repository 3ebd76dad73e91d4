use sea_orm::ConnectionTrait;

use crate::domain::model::{Game, Player};
use crate::errors::domain::{DomainError, ForbiddenKind, NotFoundKind};
use crate::extractors::session::SessionPlayer;
use crate::repos::players;

/// Resolves a verified session into a player of a specific game.
#[derive(Default)]
pub struct MembershipService;

impl MembershipService {
    pub fn new() -> Self {
        Self
    }

    /// The session's player, provided they belong to `game` and were not kicked.
    ///
    /// Host status is read from the row, never from the token.
    pub async fn require_member<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game: &Game,
        session: SessionPlayer,
    ) -> Result<Player, DomainError> {
        if session.game_id != game.id {
            return Err(DomainError::forbidden(
                ForbiddenKind::NotAPlayer,
                "Session does not belong to this game",
            ));
        }

        let player = match players::require_in_game(conn, game.id, session.player_id).await {
            Ok(player) => player,
            Err(DomainError::NotFound(NotFoundKind::Player, _)) => {
                return Err(DomainError::forbidden(
                    ForbiddenKind::NotAPlayer,
                    "You are not a player in this game",
                ))
            }
            Err(e) => return Err(e),
        };

        if !player.is_active() {
            return Err(DomainError::forbidden(
                ForbiddenKind::PlayerKicked,
                "You were removed from this game",
            ));
        }
        Ok(player)
    }

    pub async fn require_host<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game: &Game,
        session: SessionPlayer,
    ) -> Result<Player, DomainError> {
        let player = self.require_member(conn, game, session).await?;
        if !player.is_host {
            return Err(DomainError::forbidden(
                ForbiddenKind::NotHost,
                "Only the host can do that",
            ));
        }
        Ok(player)
    }
}
