use sea_orm::DatabaseTransaction;

use crate::domain::model::Game;
use crate::domain::stats::{compute_stats, GameStats, StatsInput};
use crate::error::AppError;
use crate::repos::{facts, guesses, players, score_log};

#[derive(Default)]
pub struct StatsService;

impl StatsService {
    /// End-of-game awards. Available at any phase; early calls see partial data.
    pub async fn stats(&self, txn: &DatabaseTransaction, game: &Game) -> Result<GameStats, AppError> {
        let roster = players::list_all(txn, game.id).await?;
        let all_facts = facts::list_by_game(txn, game.id).await?;
        let all_guesses = guesses::list_by_game(txn, game.id).await?;
        let log = score_log::list_by_game(txn, game.id).await?;

        Ok(compute_stats(StatsInput {
            players: &roster,
            facts: &all_facts,
            guesses: &all_guesses,
            log: &log,
        }))
    }
}
