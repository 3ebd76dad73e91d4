use futures_util::future::BoxFuture;
use sea_orm::DatabaseTransaction;
use tracing::info;

use crate::domain::game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
use crate::repos::games::{self, Game};
use crate::services::game_flow::GameFlowService;
use crate::AppError;

#[derive(Debug)]
pub struct GameFlowMutationResult<T> {
    pub final_game: Game,
    pub transitions: Vec<GameTransition>,
    pub output: T,
}

impl<T> GameFlowMutationResult<T> {
    pub fn final_version(&self) -> i32 {
        self.final_game.version
    }
}

pub(super) fn lifecycle_view(game: &Game) -> GameLifecycleView {
    GameLifecycleView {
        version: game.version,
        phase: game.phase,
        current_fact_id: game.current_fact_id,
        story_teller_id: game.story_teller_id,
    }
}

impl GameFlowService {
    /// Run `mutation` under the game's row lock.
    ///
    /// The lock bumps `version` once, so every accepted mutation changes the
    /// ETag. The closure gets the locked game and must pass its version to any
    /// `GameUpdate` it issues.
    pub async fn run_mutation<'a, T, F>(
        &'a self,
        txn: &'a DatabaseTransaction,
        game_id: i64,
        mutation: F,
    ) -> Result<GameFlowMutationResult<T>, AppError>
    where
        T: Send + 'a,
        F: FnOnce(&'a GameFlowService, &'a DatabaseTransaction, Game) -> BoxFuture<'a, Result<T, AppError>>
            + Send
            + 'a,
    {
        let locked = games::lock_game(txn, game_id).await?;
        let before = lifecycle_view(&locked);

        let output = mutation(self, txn, locked).await?;

        let final_game = games::require_game(txn, game_id).await?;
        let transitions = derive_game_transitions(&before, &lifecycle_view(&final_game));
        for transition in &transitions {
            info!(game_id, version = final_game.version, transition = ?transition, "game_transition");
        }

        Ok(GameFlowMutationResult {
            final_game,
            transitions,
            output,
        })
    }
}
