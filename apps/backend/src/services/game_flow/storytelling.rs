use sea_orm::DatabaseTransaction;
use tracing::debug;

use super::rounds::current_fact_id;
use super::{GameFlowMutationResult, GameFlowService};
use crate::domain::phase::{Phase, PhaseEvent};
use crate::domain::rules::validate_story;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ForbiddenKind};
use crate::extractors::session::SessionPlayer;
use crate::repos::games::{self, GameUpdate};
use crate::repos::facts;
use crate::services::memberships::MembershipService;

impl GameFlowService {
    /// The storyteller is done: reveal the fact (with an optional story) and open rating.
    ///
    /// With nobody left to rate, the rating round closes on the spot.
    pub async fn finish_story(
        &self,
        txn: &DatabaseTransaction,
        token: &str,
        session: SessionPlayer,
        story: Option<String>,
    ) -> Result<GameFlowMutationResult<()>, AppError> {
        let game_id = games::require_by_token(txn, token).await?.id;

        self.run_mutation(txn, game_id, move |svc, txn, game| {
            Box::pin(async move {
                let teller = MembershipService.require_member(txn, &game, session).await?;
                game.phase.expect(Phase::Storytelling)?;
                if game.story_teller_id != Some(teller.id) {
                    return Err(DomainError::forbidden(
                        ForbiddenKind::NotStoryteller,
                        "Only the storyteller can finish the story",
                    )
                    .into());
                }

                let story = validate_story(story.as_deref())?;
                let fact_id = current_fact_id(&game)?;
                facts::reveal_story(txn, fact_id, story).await?;

                let next = game.phase.apply(PhaseEvent::StoryFinished)?;
                let game = games::update_game(
                    txn,
                    GameUpdate::new(game.id, game.version).with_phase(next.into()),
                )
                .await?;
                debug!(game_id = game.id, fact_id, "Story finished");

                svc.check_rating_round(txn, game).await?;
                Ok(())
            })
        })
        .await
    }
}
