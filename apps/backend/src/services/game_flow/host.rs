//! Host-only operations: start, end, kick and fact control.

use std::collections::HashMap;

use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;
use tracing::{debug, info};

use super::rounds::current_fact_id;
use super::{GameFlowMutationResult, GameFlowService};
use crate::domain::model::{FactId, PlayerId};
use crate::domain::ordering::pick_next_fact;
use crate::domain::phase::{Phase, PhaseEvent};
use crate::domain::rules::check_can_start;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::extractors::session::SessionPlayer;
use crate::repos::games::{self, Game, GameUpdate};
use crate::repos::{facts, guesses, players, ratings};
use crate::services::memberships::MembershipService;

fn force_next(pool_remaining: bool) -> PhaseEvent {
    PhaseEvent::ForceNext { pool_remaining }
}

impl GameFlowService {
    /// Leave the lobby once every active player has written their facts.
    pub async fn start_game(
        &self,
        txn: &DatabaseTransaction,
        token: &str,
        session: SessionPlayer,
    ) -> Result<GameFlowMutationResult<()>, AppError> {
        let game_id = games::require_by_token(txn, token).await?.id;

        self.run_mutation(txn, game_id, move |_, txn, game| {
            Box::pin(async move {
                MembershipService.require_host(txn, &game, session).await?;

                let roster = players::list_active(txn, game.id).await?;
                let mut written: HashMap<PlayerId, usize> = HashMap::new();
                for fact in facts::list_by_game(txn, game.id).await? {
                    *written.entry(fact.author_id).or_default() += 1;
                }
                let counts: Vec<usize> = roster
                    .iter()
                    .map(|p| written.get(&p.id).copied().unwrap_or(0))
                    .collect();
                check_can_start(game.phase, &counts)?;

                let pool = facts::pool_ids(txn, game.id).await?;
                let first = {
                    let mut rng = rand::rng();
                    pick_next_fact(&pool, None, &mut rng)
                }
                .ok_or_else(|| {
                    DomainError::validation(ValidationKind::FactsIncomplete, "There are no facts to play")
                })?;

                let next = game.phase.apply(PhaseEvent::Start)?;
                games::update_game(
                    txn,
                    GameUpdate::new(game.id, game.version)
                        .with_phase(next.into())
                        .with_current_fact(Some(first))
                        .with_started_at(OffsetDateTime::now_utc()),
                )
                .await?;
                info!(game_id = game.id, players = roster.len(), facts = pool.len(), "Game started");
                Ok(())
            })
        })
        .await
    }

    /// End the game now. A rating round in progress keeps the ratings it has.
    pub async fn end_game(
        &self,
        txn: &DatabaseTransaction,
        token: &str,
        session: SessionPlayer,
    ) -> Result<GameFlowMutationResult<()>, AppError> {
        let game_id = games::require_by_token(txn, token).await?.id;

        self.run_mutation(txn, game_id, move |svc, txn, game| {
            Box::pin(async move {
                MembershipService.require_host(txn, &game, session).await?;
                game.phase.ensure_open()?;

                if game.phase == Phase::Rating {
                    svc.finalize_ratings(txn, current_fact_id(&game)?).await?;
                }

                let next = game.phase.apply(PhaseEvent::EndEarly)?;
                games::update_game(
                    txn,
                    GameUpdate::new(game.id, game.version)
                        .with_phase(next.into())
                        .with_current_fact(None)
                        .with_story_teller(None)
                        .with_ended_at(OffsetDateTime::now_utc()),
                )
                .await?;
                info!(game_id = game.id, "Game ended by host");
                Ok(())
            })
        })
        .await
    }

    /// Remove a player. Their score entries stay; their unplayed facts go.
    pub async fn kick_player(
        &self,
        txn: &DatabaseTransaction,
        token: &str,
        session: SessionPlayer,
        target_id: PlayerId,
    ) -> Result<GameFlowMutationResult<()>, AppError> {
        let game_id = games::require_by_token(txn, token).await?.id;

        self.run_mutation(txn, game_id, move |svc, txn, game| {
            Box::pin(async move {
                MembershipService.require_host(txn, &game, session).await?;
                game.phase.ensure_open()?;

                let target = players::require_active(txn, game.id, target_id).await?;
                if target.is_host {
                    return Err(DomainError::validation(
                        ValidationKind::CannotKickHost,
                        "The host cannot be removed",
                    )
                    .into());
                }

                players::mark_kicked(txn, target.id).await?;

                let dropped = facts::pool_ids_by_author(txn, target.id).await?;
                guesses::delete_for_facts(txn, &dropped).await?;
                ratings::delete_for_facts(txn, &dropped).await?;
                facts::delete_by_ids(txn, &dropped).await?;
                info!(
                    game_id = game.id,
                    player_id = target.id,
                    dropped_facts = dropped.len(),
                    "Player kicked"
                );

                svc.reconcile_after_kick(txn, game, target.id, &dropped).await?;
                Ok(())
            })
        })
        .await
    }

    /// Re-check the running round after the roster shrank.
    async fn reconcile_after_kick(
        &self,
        txn: &DatabaseTransaction,
        game: Game,
        kicked_id: PlayerId,
        dropped: &[FactId],
    ) -> Result<Game, AppError> {
        match game.phase {
            Phase::Guessing => {
                if game.current_fact_id.is_some_and(|id| dropped.contains(&id)) {
                    return self
                        .advance(txn, game, None, |pool_remaining| {
                            PhaseEvent::CurrentFactDropped { pool_remaining }
                        })
                        .await;
                }
                let (game, _) = self.check_guessing_round(txn, game).await?;
                Ok(game)
            }
            Phase::Storytelling if game.story_teller_id == Some(kicked_id) => {
                let fact_id = current_fact_id(&game)?;
                facts::reveal_story(txn, fact_id, None).await?;
                self.advance(txn, game, Some(fact_id), |pool_remaining| {
                    PhaseEvent::RoundClosed { pool_remaining }
                })
                .await
            }
            Phase::Rating if game.story_teller_id == Some(kicked_id) => {
                let fact_id = current_fact_id(&game)?;
                self.finalize_ratings(txn, fact_id).await?;
                self.advance(txn, game, Some(fact_id), |pool_remaining| {
                    PhaseEvent::RoundClosed { pool_remaining }
                })
                .await
            }
            Phase::Rating => self.check_rating_round(txn, game).await,
            Phase::Lobby | Phase::Storytelling | Phase::Ended => Ok(game),
        }
    }

    /// Skip to `fact_id`, or to a random pool fact when `None`.
    ///
    /// Guesses on a skipped fact are discarded; a skipped rating round keeps
    /// the ratings it collected.
    pub async fn set_current_fact(
        &self,
        txn: &DatabaseTransaction,
        token: &str,
        session: SessionPlayer,
        fact_id: Option<FactId>,
    ) -> Result<GameFlowMutationResult<()>, AppError> {
        let game_id = games::require_by_token(txn, token).await?.id;

        self.run_mutation(txn, game_id, move |svc, txn, game| {
            Box::pin(async move {
                MembershipService.require_host(txn, &game, session).await?;
                game.phase.ensure_open()?;

                let current = match game.phase {
                    Phase::Guessing => current_fact_id(&game)?,
                    Phase::Rating => {
                        let current = current_fact_id(&game)?;
                        svc.finalize_ratings(txn, current).await?;
                        current
                    }
                    phase => {
                        return Err(DomainError::phase_mismatch(format!(
                            "Cannot change the current fact during {phase}"
                        ))
                        .into())
                    }
                };

                let target = match fact_id {
                    Some(id) => {
                        let fact = facts::require_in_game(txn, game.id, id).await?;
                        if !fact.in_pool() {
                            return Err(DomainError::validation(
                                ValidationKind::FactNotInPool,
                                format!("Fact {id} has already been played"),
                            )
                            .into());
                        }
                        Some(id)
                    }
                    None => {
                        let pool = facts::pool_ids(txn, game.id).await?;
                        let mut rng = rand::rng();
                        pick_next_fact(&pool, Some(current), &mut rng)
                    }
                };

                if game.phase == Phase::Guessing && target != Some(current) {
                    guesses::delete_for_facts(txn, &[current]).await?;
                }

                debug!(game_id = game.id, from = current, to = target, "Host changed the current fact");
                svc.move_to_fact(txn, game, target, force_next).await?;
                Ok(())
            })
        })
        .await
    }
}
