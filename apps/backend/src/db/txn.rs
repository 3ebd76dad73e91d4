use actix_web::HttpRequest;
use futures_util::future::BoxFuture;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::warn;

use crate::db::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::trace_ctx;

/// Execute a closure within a database transaction.
///
/// Commits when the closure returns Ok, rolls back on Err. Every game
/// mutation runs inside exactly one of these, so a rejected action leaves no
/// partial writes behind.
///
/// ```ignore
/// let out = with_txn(Some(&req), &state, move |txn| {
///     Box::pin(async move { games::require_game(txn, id).await.map_err(AppError::from) })
/// })
/// .await?;
/// ```
pub async fn with_txn<R, F>(
    req: Option<&HttpRequest>,
    state: &AppState,
    f: F,
) -> Result<R, AppError>
where
    R: Send,
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<R, AppError>>,
{
    let db = require_db(state)?;
    let txn = db.begin().await?;

    match f(&txn).await {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            if let Err(rollback_err) = txn.rollback().await {
                let path = req.map(|r| r.path().to_string()).unwrap_or_default();
                warn!(
                    trace_id = %trace_ctx::trace_id(),
                    path = %path,
                    error = %rollback_err,
                    "rollback failed"
                );
            }
            Err(err)
        }
    }
}
