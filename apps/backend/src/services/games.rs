//! Game creation, joining and the polled snapshot.

use sea_orm::DatabaseTransaction;
use tracing::{debug, info};

use crate::domain::model::{Game, Player};
use crate::domain::rules::{validate_player_name, DEFAULT_HOST_NAME};
use crate::domain::snapshot::{build_snapshot, GameSnapshot, SnapshotInput};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::players::{self, PlayerCreate};
use crate::repos::{facts, games, guesses, ratings};
use crate::services::game_flow::{GameFlowMutationResult, GameFlowService};
use crate::utils::emoji::next_free_emoji;
use crate::utils::room_token::{generate_room_token, MAX_TOKEN_ATTEMPTS};

/// Game domain service.
#[derive(Default)]
pub struct GameService;

impl GameService {
    pub fn new() -> Self {
        Self
    }

    /// Open a new room with its host. A missing or blank name becomes "Host".
    pub async fn create_game(
        &self,
        txn: &DatabaseTransaction,
        host_name: Option<String>,
    ) -> Result<(Game, Player), AppError> {
        let name = match host_name.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => validate_player_name(raw)?,
            _ => DEFAULT_HOST_NAME.to_string(),
        };

        let token = self.unused_room_token(txn).await?;
        let game = games::create_game(txn, &token).await?;
        let host = players::create_player(
            txn,
            PlayerCreate::new(game.id, name, next_free_emoji(Vec::<&str>::new())).host(),
        )
        .await?;

        info!(game_id = game.id, token = %game.token, host_id = host.id, "Game created");
        Ok((game, host))
    }

    async fn unused_room_token(&self, txn: &DatabaseTransaction) -> Result<String, AppError> {
        for attempt in 1..=MAX_TOKEN_ATTEMPTS {
            let token = {
                let mut rng = rand::rng();
                generate_room_token(&mut rng)
            };
            if games::find_by_token(txn, &token).await?.is_none() {
                return Ok(token);
            }
            debug!(attempt, "Room token collision, retrying");
        }
        Err(DomainError::conflict(
            ConflictKind::TokenConflict,
            "Could not allocate a free room token",
        )
        .into())
    }

    /// Add a player to a room that has not ended. Joining mid-game is allowed.
    pub async fn join_game(
        &self,
        txn: &DatabaseTransaction,
        token: &str,
        name: String,
    ) -> Result<GameFlowMutationResult<Player>, AppError> {
        let game_id = games::require_by_token(txn, token).await?.id;

        GameFlowService
            .run_mutation(txn, game_id, move |_, txn, game| {
                Box::pin(async move {
                    game.phase.ensure_open()?;
                    let name = validate_player_name(&name)?;

                    let roster = players::list_active(txn, game.id).await?;
                    if roster.iter().any(|p| p.name.to_lowercase() == name.to_lowercase()) {
                        return Err(DomainError::validation(
                            ValidationKind::InvalidPlayerName,
                            format!("The name '{name}' is already taken"),
                        )
                        .into());
                    }

                    let emoji = next_free_emoji(roster.iter().map(|p| p.emoji.as_str()));
                    let player =
                        players::create_player(txn, PlayerCreate::new(game.id, name, emoji)).await?;
                    info!(game_id = game.id, player_id = player.id, "Player joined");
                    Ok(player)
                })
            })
            .await
    }

    pub async fn load_game(&self, txn: &DatabaseTransaction, token: &str) -> Result<Game, AppError> {
        Ok(games::require_by_token(txn, token).await?)
    }

    /// Everything a polling client needs to render the room.
    pub async fn snapshot(
        &self,
        txn: &DatabaseTransaction,
        game: &Game,
    ) -> Result<GameSnapshot, AppError> {
        let roster = players::list_all(txn, game.id).await?;
        let all_facts = facts::list_by_game(txn, game.id).await?;

        let (current_guesses, current_rating_count) = match game.current_fact_id {
            Some(fact_id) => (
                guesses::list_for_fact(txn, fact_id).await?,
                ratings::count_for_fact(txn, fact_id).await?,
            ),
            None => (Vec::new(), 0),
        };

        Ok(build_snapshot(SnapshotInput {
            game,
            players: &roster,
            facts: &all_facts,
            current_guesses: &current_guesses,
            current_rating_count,
        }))
    }
}
