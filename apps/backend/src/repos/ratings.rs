//! Story rating repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::ratings_sea as ratings_adapter;
pub use crate::adapters::ratings_sea::RatingCreate;
pub use crate::domain::model::StoryRating;
use crate::entities::story_ratings;
use crate::errors::domain::{DomainError, InfraErrorKind};

impl TryFrom<story_ratings::Model> for StoryRating {
    type Error = DomainError;

    fn try_from(model: story_ratings::Model) -> Result<Self, Self::Error> {
        let rating = u8::try_from(model.rating).map_err(|_| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Stored rating {} out of range", model.rating),
            )
        })?;
        Ok(Self {
            id: model.id,
            fact_id: model.fact_id,
            rater_id: model.rater_id,
            rating,
            created_at: model.created_at,
        })
    }
}

pub async fn create_rating<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RatingCreate,
) -> Result<StoryRating, DomainError> {
    StoryRating::try_from(ratings_adapter::create_rating(conn, dto).await?)
}

pub async fn find_by_fact_and_rater<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
    rater_id: i64,
) -> Result<Option<StoryRating>, DomainError> {
    ratings_adapter::find_by_fact_and_rater(conn, fact_id, rater_id)
        .await?
        .map(StoryRating::try_from)
        .transpose()
}

pub async fn list_for_fact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
) -> Result<Vec<StoryRating>, DomainError> {
    ratings_adapter::list_for_fact(conn, fact_id)
        .await?
        .into_iter()
        .map(StoryRating::try_from)
        .collect()
}

pub async fn count_for_fact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_id: i64,
) -> Result<usize, DomainError> {
    let n = ratings_adapter::count_for_fact(conn, fact_id).await?;
    Ok(usize::try_from(n).unwrap_or(usize::MAX))
}

pub async fn delete_for_facts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fact_ids: &[i64],
) -> Result<u64, DomainError> {
    Ok(ratings_adapter::delete_for_facts(conn, fact_ids).await?)
}
