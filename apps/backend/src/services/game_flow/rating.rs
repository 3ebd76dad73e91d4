use sea_orm::DatabaseTransaction;
use tracing::debug;

use super::{GameFlowMutationResult, GameFlowService};
use crate::domain::model::FactId;
use crate::domain::phase::Phase;
use crate::domain::rules::validate_rating;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::extractors::session::SessionPlayer;
use crate::repos::ratings::{self, RatingCreate};
use crate::repos::{facts, games};
use crate::services::memberships::MembershipService;

impl GameFlowService {
    /// Rate the story of the current fact; the last missing rating closes the round.
    pub async fn submit_rating(
        &self,
        txn: &DatabaseTransaction,
        token: &str,
        session: SessionPlayer,
        fact_id: FactId,
        rating: i64,
    ) -> Result<GameFlowMutationResult<()>, AppError> {
        let game_id = games::require_by_token(txn, token).await?.id;

        self.run_mutation(txn, game_id, move |svc, txn, game| {
            Box::pin(async move {
                let rater = MembershipService.require_member(txn, &game, session).await?;
                game.phase.expect(Phase::Rating)?;
                let rating = validate_rating(rating)?;

                if game.current_fact_id != Some(fact_id) {
                    return Err(DomainError::validation(
                        ValidationKind::NotCurrentFact,
                        format!("Fact {fact_id} is not being rated right now"),
                    )
                    .into());
                }

                let fact = facts::require_in_game(txn, game.id, fact_id).await?;
                if fact.author_id == rater.id {
                    return Err(DomainError::validation(
                        ValidationKind::CannotRateOwnStory,
                        "You cannot rate your own story",
                    )
                    .into());
                }

                if ratings::find_by_fact_and_rater(txn, fact_id, rater.id)
                    .await?
                    .is_some()
                {
                    return Err(DomainError::conflict(
                        ConflictKind::AlreadyRated,
                        "You already rated this story",
                    )
                    .into());
                }

                ratings::create_rating(
                    txn,
                    RatingCreate {
                        game_id: game.id,
                        fact_id,
                        rater_id: rater.id,
                        rating,
                    },
                )
                .await?;
                debug!(game_id = game.id, fact_id, rater_id = rater.id, rating, "Rating recorded");

                svc.check_rating_round(txn, game).await?;
                Ok(())
            })
        })
        .await
    }
}
