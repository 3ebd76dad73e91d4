//! Score log repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::score_log_sea as score_log_adapter;
use crate::adapters::score_log_sea::ScoreLogCreate;
pub use crate::domain::model::ScoreEntry;
use crate::domain::scoring::{ScoreAward, ScoreReason};
use crate::entities::score_log;
use crate::errors::domain::{DomainError, InfraErrorKind};

impl TryFrom<score_log::Model> for ScoreEntry {
    type Error = DomainError;

    fn try_from(model: score_log::Model) -> Result<Self, Self::Error> {
        let reason = ScoreReason::parse(&model.reason).ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Unknown score reason '{}'", model.reason),
            )
        })?;
        Ok(Self {
            id: model.id,
            player_id: model.player_id,
            fact_id: model.fact_id,
            points: model.points,
            reason,
            description: model.description,
            created_at: model.created_at,
        })
    }
}

/// Append awards for a fact to the ledger.
pub async fn append_awards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    fact_id: i64,
    awards: Vec<ScoreAward>,
) -> Result<Vec<ScoreEntry>, DomainError> {
    let mut entries = Vec::with_capacity(awards.len());
    for award in awards {
        let row = score_log_adapter::append(
            conn,
            ScoreLogCreate {
                game_id,
                player_id: award.player_id,
                fact_id: Some(fact_id),
                points: award.points,
                reason: award.reason.as_str().to_string(),
                description: award.description,
            },
        )
        .await?;
        entries.push(ScoreEntry::try_from(row)?);
    }
    Ok(entries)
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<ScoreEntry>, DomainError> {
    score_log_adapter::list_by_game(conn, game_id)
        .await?
        .into_iter()
        .map(ScoreEntry::try_from)
        .collect()
}
