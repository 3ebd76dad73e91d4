//! Polled game snapshot.
//!
//! The snapshot is a pure projection of stored state; clients derive their
//! whole UI from it. Authors stay hidden until a fact is guessed or revealed.

use std::collections::HashMap;

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::model::{Fact, FactId, Game, LiveGuess, Player, PlayerId};
use crate::domain::ordering::display_order;
use crate::domain::phase::Phase;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentFactView {
    pub id: FactId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameHeader {
    pub token: String,
    pub phase: Phase,
    pub started: bool,
    pub ended: bool,
    pub version: i32,
    pub current_fact: Option<CurrentFactView>,
    pub story_teller_id: Option<PlayerId>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_fact_added: Option<OffsetDateTime>,
    pub pool_remaining: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub emoji: String,
    pub is_host: bool,
    pub fact_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactView {
    pub id: FactId,
    pub text: String,
    /// `None` while the author is still secret.
    pub author_id: Option<PlayerId>,
    pub guessed: bool,
    pub story_revealed: bool,
    pub story: Option<String>,
    pub story_rating_average: Option<f64>,
    pub story_rating_count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessView {
    pub guesser_id: PlayerId,
    pub guessed_player_id: PlayerId,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub game: GameHeader,
    pub players: Vec<PlayerView>,
    pub facts: Vec<FactView>,
    pub current_guesses: Vec<GuessView>,
    pub current_rating_count: usize,
}

pub struct SnapshotInput<'a> {
    pub game: &'a Game,
    pub players: &'a [Player],
    pub facts: &'a [Fact],
    /// Guesses on the current fact only.
    pub current_guesses: &'a [LiveGuess],
    pub current_rating_count: usize,
}

pub fn build_snapshot(input: SnapshotInput<'_>) -> GameSnapshot {
    let game = input.game;

    let mut fact_counts: HashMap<PlayerId, usize> = HashMap::new();
    for f in input.facts {
        *fact_counts.entry(f.author_id).or_default() += 1;
    }

    let players = input
        .players
        .iter()
        .filter(|p| p.is_active())
        .map(|p| PlayerView {
            id: p.id,
            name: p.name.clone(),
            emoji: p.emoji.clone(),
            is_host: p.is_host,
            fact_count: fact_counts.get(&p.id).copied().unwrap_or(0),
        })
        .collect();

    let by_id: HashMap<FactId, &Fact> = input.facts.iter().map(|f| (f.id, f)).collect();
    let ids: Vec<FactId> = input.facts.iter().map(|f| f.id).collect();
    let facts = display_order(game.id, &ids)
        .into_iter()
        .filter_map(|id| by_id.get(&id).copied())
        .map(|f| FactView {
            id: f.id,
            text: f.text.clone(),
            author_id: f.author_visible().then_some(f.author_id),
            guessed: f.guessed,
            story_revealed: f.story_revealed,
            story: f.story.clone(),
            story_rating_average: f.story_rating_average,
            story_rating_count: f.story_rating_count,
        })
        .collect();

    let current_fact = game
        .current_fact_id
        .and_then(|id| by_id.get(&id))
        .map(|f| CurrentFactView {
            id: f.id,
            text: f.text.clone(),
        });

    let current_guesses = input
        .current_guesses
        .iter()
        .map(|g| GuessView {
            guesser_id: g.guesser_id,
            guessed_player_id: g.guessed_player_id,
            is_correct: g.is_correct,
        })
        .collect();

    GameSnapshot {
        game: GameHeader {
            token: game.token.clone(),
            phase: game.phase,
            started: game.started(),
            ended: game.ended(),
            version: game.version,
            current_fact,
            story_teller_id: game.story_teller_id,
            last_fact_added: game.last_fact_added,
            pool_remaining: input.facts.iter().filter(|f| f.in_pool()).count(),
        },
        players,
        facts,
        current_guesses,
        current_rating_count: input.current_rating_count,
    }
}
