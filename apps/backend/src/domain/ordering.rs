//! Fact ordering: the stable per-game display order and next-fact selection.

use rand::seq::IndexedRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::model::{FactId, GameId};

/// Deterministic sort key for a fact within a game.
///
/// Each fact gets its own key, so adding a fact never reshuffles the ones
/// already shown.
pub fn display_key(game_id: GameId, fact_id: FactId) -> u64 {
    let seed = (game_id as u64).rotate_left(32) ^ (fact_id as u64);
    ChaCha8Rng::seed_from_u64(seed).next_u64()
}

/// Shuffled display order, stable across polls.
pub fn display_order(game_id: GameId, fact_ids: &[FactId]) -> Vec<FactId> {
    let mut ids = fact_ids.to_vec();
    ids.sort_by_key(|&id| (display_key(game_id, id), id));
    ids
}

/// Pick a random fact from the pool, avoiding `avoid` when another fact exists.
pub fn pick_next_fact<R: Rng + ?Sized>(
    pool: &[FactId],
    avoid: Option<FactId>,
    rng: &mut R,
) -> Option<FactId> {
    let preferred: Vec<FactId> = pool
        .iter()
        .copied()
        .filter(|id| Some(*id) != avoid)
        .collect();
    if preferred.is_empty() {
        pool.choose(rng).copied()
    } else {
        preferred.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_order_is_stable_when_facts_are_added() {
        let before = display_order(7, &[1, 2, 3, 4]);
        let after = display_order(7, &[1, 2, 3, 4, 5]);
        let without_new: Vec<_> = after.into_iter().filter(|&id| id != 5).collect();
        assert_eq!(before, without_new);
    }

    #[test]
    fn display_order_differs_between_games() {
        let ids: Vec<i64> = (1..=9).collect();
        assert_ne!(display_order(1, &ids), display_order(2, &ids));
    }

    #[test]
    fn next_fact_avoids_current_when_possible() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(pick_next_fact(&[10, 11], Some(10), &mut rng), Some(11));
        }
        assert_eq!(pick_next_fact(&[10], Some(10), &mut rng), Some(10));
        assert_eq!(pick_next_fact(&[], None, &mut rng), None);
    }
}
