use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;
use tracing::debug;

use super::{GameFlowMutationResult, GameFlowService};
use crate::domain::model::Fact;
use crate::domain::rules::{check_can_add_fact, validate_fact_text};
use crate::error::AppError;
use crate::extractors::session::SessionPlayer;
use crate::repos::facts::{self, FactCreate};
use crate::repos::games::{self, GameUpdate};
use crate::services::memberships::MembershipService;

impl GameFlowService {
    /// Add a fact written by the session's player.
    ///
    /// Lobby submissions are capped per player; once the game runs, late
    /// facts go straight into the pool.
    pub async fn submit_fact(
        &self,
        txn: &DatabaseTransaction,
        token: &str,
        session: SessionPlayer,
        text: String,
    ) -> Result<GameFlowMutationResult<Fact>, AppError> {
        let game_id = games::require_by_token(txn, token).await?.id;

        self.run_mutation(txn, game_id, move |_, txn, game| {
            Box::pin(async move {
                let author = MembershipService.require_member(txn, &game, session).await?;
                let text = validate_fact_text(&text)?;

                let written = facts::count_by_author(txn, author.id).await?;
                check_can_add_fact(game.phase, written)?;

                let fact = facts::create_fact(
                    txn,
                    FactCreate {
                        game_id: game.id,
                        author_id: author.id,
                        text,
                    },
                )
                .await?;

                let update = GameUpdate::new(game.id, game.version)
                    .with_last_fact_added(OffsetDateTime::now_utc());
                games::update_game(txn, update).await?;

                debug!(game_id = game.id, fact_id = fact.id, author_id = author.id, "Fact submitted");
                Ok(fact)
            })
        })
        .await
    }
}
