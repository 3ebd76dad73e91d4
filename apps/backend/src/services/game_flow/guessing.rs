use sea_orm::DatabaseTransaction;
use serde::Serialize;
use tracing::debug;

use super::{GameFlowMutationResult, GameFlowService};
use crate::domain::model::{FactId, PlayerId};
use crate::domain::phase::Phase;
use crate::domain::round::{check_guess, RoundResolution};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::extractors::session::SessionPlayer;
use crate::repos::guesses::{self, GuessCreate};
use crate::repos::{facts, games, players};
use crate::services::memberships::MembershipService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuessOutcome {
    pub is_correct: bool,
    pub resolution: RoundResolution,
}

impl GameFlowService {
    /// Record a guess on the current fact and resolve the round when it settles.
    pub async fn submit_guess(
        &self,
        txn: &DatabaseTransaction,
        token: &str,
        session: SessionPlayer,
        fact_id: FactId,
        guessed_player_id: PlayerId,
    ) -> Result<GameFlowMutationResult<GuessOutcome>, AppError> {
        let game_id = games::require_by_token(txn, token).await?.id;

        self.run_mutation(txn, game_id, move |svc, txn, game| {
            Box::pin(async move {
                let guesser = MembershipService.require_member(txn, &game, session).await?;
                game.phase.expect(Phase::Guessing)?;

                if game.current_fact_id != Some(fact_id) {
                    return Err(DomainError::validation(
                        ValidationKind::NotCurrentFact,
                        format!("Fact {fact_id} is not being guessed right now"),
                    )
                    .into());
                }

                let fact = facts::require_in_game(txn, game.id, fact_id).await?;
                let is_correct = check_guess(fact.author_id, guesser.id, guessed_player_id)?;
                players::require_active(txn, game.id, guessed_player_id).await?;

                if guesses::find_by_fact_and_guesser(txn, fact_id, guesser.id)
                    .await?
                    .is_some()
                {
                    return Err(DomainError::conflict(
                        ConflictKind::AlreadyGuessed,
                        "You already guessed this fact",
                    )
                    .into());
                }

                guesses::create_guess(
                    txn,
                    GuessCreate {
                        game_id: game.id,
                        fact_id,
                        guesser_id: guesser.id,
                        guessed_player_id,
                        is_correct,
                    },
                )
                .await?;
                debug!(game_id = game.id, fact_id, guesser_id = guesser.id, is_correct, "Guess recorded");

                let (_, resolution) = svc.check_guessing_round(txn, game).await?;
                Ok(GuessOutcome {
                    is_correct,
                    resolution,
                })
            })
        })
        .await
    }
}
