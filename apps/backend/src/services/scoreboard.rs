//! Read models over the score log.

use std::collections::HashMap;

use sea_orm::DatabaseTransaction;
use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::model::{FactId, Game, PlayerId};
use crate::domain::scoring::{tally, ScoreReason, ScoreboardRow};
use crate::error::AppError;
use crate::repos::{players, score_log};

/// One ledger entry with the player's display name attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreLogView {
    pub id: i64,
    pub player_id: PlayerId,
    pub player_name: String,
    pub fact_id: Option<FactId>,
    pub points: i32,
    pub reason: ScoreReason,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Default)]
pub struct ScoreboardService;

impl ScoreboardService {
    /// Totals per player, recomputed from the ledger on every call.
    pub async fn scoreboard(
        &self,
        txn: &DatabaseTransaction,
        game: &Game,
    ) -> Result<Vec<ScoreboardRow>, AppError> {
        let roster = players::list_all(txn, game.id).await?;
        let entries = score_log::list_by_game(txn, game.id).await?;
        Ok(tally(&roster, &entries))
    }

    /// The ledger in insertion order.
    pub async fn score_log(
        &self,
        txn: &DatabaseTransaction,
        game: &Game,
    ) -> Result<Vec<ScoreLogView>, AppError> {
        let names: HashMap<PlayerId, String> = players::list_all(txn, game.id)
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        let entries = score_log::list_by_game(txn, game.id).await?;
        Ok(entries
            .into_iter()
            .map(|e| ScoreLogView {
                id: e.id,
                player_name: names.get(&e.player_id).cloned().unwrap_or_default(),
                player_id: e.player_id,
                fact_id: e.fact_id,
                points: e.points,
                reason: e.reason,
                description: e.description,
                created_at: e.created_at,
            })
            .collect())
    }
}
