//! End-of-game awards.
//!
//! Each award is computed independently; an award with no qualifying player
//! is `None`. Ties go to the lowest player id.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::domain::model::{Fact, FactId, LiveGuess, Player, PlayerId, ScoreEntry};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerAward {
    pub player_id: PlayerId,
    pub name: String,
    pub emoji: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactAward {
    pub fact_id: FactId,
    pub text: String,
    pub author_id: PlayerId,
    pub author_name: String,
    pub wrong_guesses: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameStats {
    /// Most correct guesses.
    pub best_guesser: Option<PlayerAward>,
    /// Resolved fact with the most wrong guesses, even when that is zero.
    pub hardest_fact: Option<FactAward>,
    /// Most incorrect guesses.
    pub most_wrong: Option<PlayerAward>,
    /// Most points earned from their own facts.
    pub most_mysterious: Option<PlayerAward>,
    /// Lowest average wrong guesses per resolved fact they wrote.
    pub laziest: Option<PlayerAward>,
    /// Highest average story rating.
    pub best_storyteller: Option<PlayerAward>,
}

pub struct StatsInput<'a> {
    pub players: &'a [Player],
    pub facts: &'a [Fact],
    pub guesses: &'a [LiveGuess],
    pub log: &'a [ScoreEntry],
}

fn award(players: &HashMap<PlayerId, &Player>, player_id: PlayerId, value: f64) -> Option<PlayerAward> {
    let p = players.get(&player_id)?;
    Some(PlayerAward {
        player_id,
        name: p.name.clone(),
        emoji: p.emoji.clone(),
        value,
    })
}

/// Highest value wins; BTreeMap iteration makes the lowest id win ties.
fn max_by_value(values: &BTreeMap<PlayerId, f64>) -> Option<(PlayerId, f64)> {
    values.iter().fold(None, |best, (&id, &v)| match best {
        Some((_, bv)) if bv >= v => best,
        _ => Some((id, v)),
    })
}

fn min_by_value(values: &BTreeMap<PlayerId, f64>) -> Option<(PlayerId, f64)> {
    values.iter().fold(None, |best, (&id, &v)| match best {
        Some((_, bv)) if bv <= v => best,
        _ => Some((id, v)),
    })
}

fn count_guesses(guesses: &[&LiveGuess], correct: bool) -> BTreeMap<PlayerId, f64> {
    let mut counts = BTreeMap::new();
    for g in guesses.iter().filter(|g| g.is_correct == correct) {
        *counts.entry(g.guesser_id).or_insert(0.0) += 1.0;
    }
    counts
}

pub fn compute_stats(input: StatsInput<'_>) -> GameStats {
    let players: HashMap<PlayerId, &Player> = input.players.iter().map(|p| (p.id, p)).collect();

    // Guesses on the fact still being played do not count yet.
    let resolved: HashSet<FactId> = input
        .facts
        .iter()
        .filter(|f| f.author_visible())
        .map(|f| f.id)
        .collect();
    let settled: Vec<&LiveGuess> = input
        .guesses
        .iter()
        .filter(|g| resolved.contains(&g.fact_id))
        .collect();

    let mut wrong_by_fact: HashMap<FactId, usize> = HashMap::new();
    for g in settled.iter().filter(|g| !g.is_correct) {
        *wrong_by_fact.entry(g.fact_id).or_default() += 1;
    }

    let best_guesser = max_by_value(&count_guesses(&settled, true))
        .and_then(|(id, v)| award(&players, id, v));
    let most_wrong = max_by_value(&count_guesses(&settled, false))
        .and_then(|(id, v)| award(&players, id, v));

    let hardest_fact = input
        .facts
        .iter()
        .filter(|f| f.author_visible())
        .map(|f| (f, wrong_by_fact.get(&f.id).copied().unwrap_or(0)))
        .fold(None::<(&Fact, usize)>, |best, (f, wrong)| match best {
            Some((bf, bw)) if bw > wrong || (bw == wrong && bf.id < f.id) => best,
            _ => Some((f, wrong)),
        })
        .and_then(|(f, wrong)| {
            let author = players.get(&f.author_id)?;
            Some(FactAward {
                fact_id: f.id,
                text: f.text.clone(),
                author_id: f.author_id,
                author_name: author.name.clone(),
                wrong_guesses: wrong,
            })
        });

    let mut own_fact_points: BTreeMap<PlayerId, f64> = BTreeMap::new();
    for entry in input.log.iter().filter(|e| e.reason.is_author_award()) {
        *own_fact_points.entry(entry.player_id).or_insert(0.0) += f64::from(entry.points);
    }
    own_fact_points.retain(|_, v| *v > 0.0);
    let most_mysterious =
        max_by_value(&own_fact_points).and_then(|(id, v)| award(&players, id, v));

    let mut resolved_per_author: BTreeMap<PlayerId, (usize, usize)> = BTreeMap::new();
    for f in input.facts.iter().filter(|f| f.author_visible()) {
        let slot = resolved_per_author.entry(f.author_id).or_default();
        slot.0 += 1;
        slot.1 += wrong_by_fact.get(&f.id).copied().unwrap_or(0);
    }
    let lazy_scores: BTreeMap<PlayerId, f64> = resolved_per_author
        .into_iter()
        .map(|(id, (facts, wrong))| (id, wrong as f64 / facts as f64))
        .collect();
    let laziest = min_by_value(&lazy_scores).and_then(|(id, v)| award(&players, id, v));

    // weighted by rating count
    let mut rating_sums: BTreeMap<PlayerId, (f64, i32)> = BTreeMap::new();
    for f in input.facts.iter().filter(|f| f.story_rating_count > 0) {
        if let Some(avg) = f.story_rating_average {
            let slot = rating_sums.entry(f.author_id).or_insert((0.0, 0));
            slot.0 += avg * f64::from(f.story_rating_count);
            slot.1 += f.story_rating_count;
        }
    }
    let storyteller_scores: BTreeMap<PlayerId, f64> = rating_sums
        .into_iter()
        .map(|(id, (sum, n))| (id, sum / f64::from(n)))
        .collect();
    let best_storyteller =
        max_by_value(&storyteller_scores).and_then(|(id, v)| award(&players, id, v));

    GameStats {
        best_guesser,
        hardest_fact,
        most_wrong,
        most_mysterious,
        laziest,
        best_storyteller,
    }
}
