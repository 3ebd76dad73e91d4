//! Round plumbing shared by the player and host operations.

use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;
use tracing::debug;

use super::GameFlowService;
use crate::domain::model::{Fact, FactId, PlayerId};
use crate::domain::ordering::pick_next_fact;
use crate::domain::phase::{Phase, PhaseEvent};
use crate::domain::rating::{all_voters_rated, summarize};
use crate::domain::round::{resolve_round, RoundResolution};
use crate::domain::scoring::{awards_for_correct_guess, awards_for_stumped};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};
use crate::repos::facts::FactRatingSummary;
use crate::repos::games::{Game, GameUpdate};
use crate::repos::{facts, games, guesses, players, ratings, score_log};

/// Builds the event that closes a round, given whether facts remain.
pub(super) type CloseEvent = fn(bool) -> PhaseEvent;

pub(super) fn current_fact_id(game: &Game) -> Result<FactId, DomainError> {
    game.current_fact_id.ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("Game {} is in {} without a current fact", game.id, game.phase),
        )
    })
}

async fn active_ids(txn: &DatabaseTransaction, game_id: i64) -> Result<Vec<PlayerId>, DomainError> {
    Ok(players::list_active(txn, game_id)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect())
}

impl GameFlowService {
    /// Make `next_fact` current, or end the game when it is `None`.
    ///
    /// A new guessing round nobody is eligible to answer is stumped at once.
    pub(super) async fn move_to_fact(
        &self,
        txn: &DatabaseTransaction,
        game: Game,
        next_fact: Option<FactId>,
        event: CloseEvent,
    ) -> Result<Game, AppError> {
        let next = game.phase.apply(event(next_fact.is_some()))?;
        let mut update = GameUpdate::new(game.id, game.version)
            .with_phase(next.into())
            .with_story_teller(None);

        if next == Phase::Ended {
            update = update
                .with_current_fact(None)
                .with_ended_at(OffsetDateTime::now_utc());
        } else {
            update = update.with_current_fact(next_fact);
        }

        debug!(game_id = game.id, next_fact, phase = %next, "Moving to next fact");
        let game = games::update_game(txn, update).await?;
        if game.phase != Phase::Guessing {
            return Ok(game);
        }

        let (game, _) = self.check_guessing_round(txn, game).await?;
        Ok(game)
    }

    /// Draw a random pool fact (other than `avoid` when possible) and move to it.
    pub(super) async fn advance(
        &self,
        txn: &DatabaseTransaction,
        game: Game,
        avoid: Option<FactId>,
        event: CloseEvent,
    ) -> Result<Game, AppError> {
        let pool = facts::pool_ids(txn, game.id).await?;
        let next_fact = {
            let mut rng = rand::rng();
            pick_next_fact(&pool, avoid, &mut rng)
        };
        self.move_to_fact(txn, game, next_fact, event).await
    }

    /// Mark the fact resolved, append its awards and hand over to the author.
    async fn settle_round(
        &self,
        txn: &DatabaseTransaction,
        game: Game,
        fact: &Fact,
        resolution: RoundResolution,
    ) -> Result<Game, AppError> {
        let author = players::require_in_game(txn, game.id, fact.author_id).await?;

        let awards = match resolution {
            RoundResolution::Open => return Ok(game),
            RoundResolution::Correct {
                guesser_id,
                wrong_guesses,
            } => {
                if !facts::mark_guessed_if_unresolved(txn, fact.id).await? {
                    return Err(already_resolved(fact.id).into());
                }
                let guesser = players::require_in_game(txn, game.id, guesser_id).await?;
                awards_for_correct_guess(&guesser, &author, wrong_guesses)
            }
            RoundResolution::Stumped { wrong_guesses } => {
                if !facts::mark_stumped(txn, fact.id).await? {
                    return Err(already_resolved(fact.id).into());
                }
                awards_for_stumped(&author, wrong_guesses)
            }
        };

        let entries = score_log::append_awards(txn, game.id, fact.id, awards).await?;
        debug!(
            game_id = game.id,
            fact_id = fact.id,
            awards = entries.len(),
            resolution = ?resolution,
            "Round settled"
        );

        let next = game.phase.apply(PhaseEvent::FactResolved)?;
        let update = GameUpdate::new(game.id, game.version)
            .with_phase(next.into())
            .with_story_teller(Some(author.id));
        Ok(games::update_game(txn, update).await?)
    }

    /// Resolve the guessing round if the guesses on the current fact settle it.
    pub(super) async fn check_guessing_round(
        &self,
        txn: &DatabaseTransaction,
        game: Game,
    ) -> Result<(Game, RoundResolution), AppError> {
        let fact_id = current_fact_id(&game)?;
        let fact = facts::require_fact(txn, fact_id).await?;
        let roster = active_ids(txn, game.id).await?;
        let fact_guesses = guesses::list_for_fact(txn, fact_id).await?;

        let resolution = resolve_round(fact.author_id, &roster, &fact_guesses);
        let game = self.settle_round(txn, game, &fact, resolution).await?;
        Ok((game, resolution))
    }

    /// Store the rating summary of `fact_id` from the ratings recorded so far.
    pub(super) async fn finalize_ratings(
        &self,
        txn: &DatabaseTransaction,
        fact_id: FactId,
    ) -> Result<(), AppError> {
        let values: Vec<u8> = ratings::list_for_fact(txn, fact_id)
            .await?
            .iter()
            .map(|r| r.rating)
            .collect();
        let summary = summarize(&values);
        facts::store_rating_summary(
            txn,
            FactRatingSummary {
                fact_id,
                average: summary.average,
                count: summary.count,
            },
        )
        .await?;
        Ok(())
    }

    /// Close the rating round once every active non-author has rated.
    pub(super) async fn check_rating_round(
        &self,
        txn: &DatabaseTransaction,
        game: Game,
    ) -> Result<Game, AppError> {
        let fact_id = current_fact_id(&game)?;
        let fact = facts::require_fact(txn, fact_id).await?;
        let roster = active_ids(txn, game.id).await?;
        let raters: Vec<PlayerId> = ratings::list_for_fact(txn, fact_id)
            .await?
            .iter()
            .map(|r| r.rater_id)
            .collect();

        if !all_voters_rated(fact.author_id, &roster, &raters) {
            return Ok(game);
        }

        self.finalize_ratings(txn, fact_id).await?;
        self.advance(txn, game, Some(fact_id), |pool_remaining| {
            PhaseEvent::RoundClosed { pool_remaining }
        })
        .await
    }
}

fn already_resolved(fact_id: FactId) -> DomainError {
    DomainError::conflict(
        ConflictKind::FactAlreadyResolved,
        format!("Fact {fact_id} was already resolved"),
    )
}
