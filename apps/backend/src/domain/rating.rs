//! Story rating aggregation.

use std::collections::HashSet;

use crate::domain::model::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub average: Option<f64>,
    pub count: i32,
}

pub fn summarize(ratings: &[u8]) -> RatingSummary {
    if ratings.is_empty() {
        return RatingSummary {
            average: None,
            count: 0,
        };
    }
    let sum: u32 = ratings.iter().map(|&r| u32::from(r)).sum();
    let count = ratings.len();
    RatingSummary {
        average: Some(f64::from(sum) / count as f64),
        count: i32::try_from(count).unwrap_or(i32::MAX),
    }
}

/// True once every active player other than the author has rated.
pub fn all_voters_rated(
    author_id: PlayerId,
    active_players: &[PlayerId],
    raters: &[PlayerId],
) -> bool {
    let rated: HashSet<PlayerId> = raters.iter().copied().collect();
    active_players
        .iter()
        .filter(|&&p| p != author_id)
        .all(|p| rated.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_over_collected_ratings() {
        let s = summarize(&[3, 2, 2]);
        assert_eq!(s.count, 3);
        assert!((s.average.unwrap() - 7.0 / 3.0).abs() < 1e-9);
        assert_eq!(summarize(&[]).average, None);
    }

    #[test]
    fn waits_for_every_voter() {
        assert!(!all_voters_rated(1, &[1, 2, 3], &[2]));
        assert!(all_voters_rated(1, &[1, 2, 3], &[2, 3]));
        // a kicked rater's vote does not block anyone
        assert!(all_voters_rated(1, &[1, 2], &[2, 5]));
    }
}
