//! SeaORM -> DomainError translation.
//!
//! Adapters return `sea_orm::DbErr`; repos and services convert with `?`
//! through `From<DbErr> for DomainError`, which lands here.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Known unique indexes, by Postgres index name and SQLite `table.column` list.
const UNIQUE_CONFLICTS: &[(&str, &str, ConflictSpec)] = &[
    (
        "ux_live_guesses_fact_guesser",
        "live_guesses.fact_id, live_guesses.guesser_id",
        ConflictSpec::AlreadyGuessed,
    ),
    (
        "ux_story_ratings_fact_rater",
        "story_ratings.fact_id, story_ratings.rater_id",
        ConflictSpec::AlreadyRated,
    ),
    ("ux_games_token", "games.token", ConflictSpec::TokenConflict),
];

#[derive(Clone, Copy)]
enum ConflictSpec {
    AlreadyGuessed,
    AlreadyRated,
    TokenConflict,
}

impl ConflictSpec {
    fn into_error(self) -> DomainError {
        match self {
            ConflictSpec::AlreadyGuessed => DomainError::conflict(
                ConflictKind::AlreadyGuessed,
                "You already guessed this fact",
            ),
            ConflictSpec::AlreadyRated => {
                DomainError::conflict(ConflictKind::AlreadyRated, "You already rated this story")
            }
            ConflictSpec::TokenConflict => {
                DomainError::conflict(ConflictKind::TokenConflict, "Room token already exists")
            }
        }
    }
}

fn map_unique_violation(error_msg: &str) -> DomainError {
    let sqlite_cols = error_msg
        .split_once("UNIQUE constraint failed: ")
        .map(|(_, rest)| rest.trim());

    for (pg_name, sqlite_name, spec) in UNIQUE_CONFLICTS {
        let sqlite_hit = sqlite_cols.is_some_and(|cols| cols.starts_with(sqlite_name));
        if sqlite_hit || error_msg.contains(pg_name) {
            return spec.into_error();
        }
    }

    DomainError::conflict(
        ConflictKind::Other("Unique".into()),
        "Unique constraint violation",
    )
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            let kind = match what.as_str() {
                "Game not found" => NotFoundKind::Game,
                "Player not found" => NotFoundKind::Player,
                "Fact not found" => NotFoundKind::Fact,
                _ => NotFoundKind::Other("Record".into()),
            };
            return DomainError::not_found(kind, what.clone());
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("OPTIMISTIC_LOCK:") => {
            if let Some(json_str) = msg.strip_prefix("OPTIMISTIC_LOCK:") {
                #[derive(serde::Deserialize)]
                struct LockInfo {
                    expected: i32,
                    actual: i32,
                }

                if let Ok(info) = serde_json::from_str::<LockInfo>(json_str) {
                    warn!(
                        trace_id = %trace_id,
                        expected = info.expected,
                        actual = info.actual,
                        "Optimistic lock conflict detected"
                    );
                    return DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Game was modified concurrently (expected version {}, actual version {}). Please refresh and retry.",
                            info.expected, info.actual
                        ),
                    );
                }
            }

            warn!(trace_id = %trace_id, "Optimistic lock conflict detected (version info unavailable)");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Game was modified by another request; please retry",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");
        return map_unique_violation(&error_msg);
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if mentions_sqlstate(&error_msg, "23514") || error_msg.contains("CHECK constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Check constraint violation");
        return DomainError::validation_other("Check constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
