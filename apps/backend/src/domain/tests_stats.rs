use time::OffsetDateTime;

use crate::domain::model::{Fact, LiveGuess, ScoreEntry};
use crate::domain::scoring::ScoreReason;
use crate::domain::stats::{compute_stats, StatsInput};
use crate::domain::test_gens::player;

fn fact(id: i64, author_id: i64, resolved: bool, ratings: Option<(f64, i32)>) -> Fact {
    Fact {
        id,
        game_id: 1,
        author_id,
        text: format!("fact {id}"),
        guessed: resolved,
        story_revealed: resolved,
        story: None,
        story_rating_average: ratings.map(|(avg, _)| avg),
        story_rating_count: ratings.map(|(_, n)| n).unwrap_or(0),
        created_at: OffsetDateTime::UNIX_EPOCH,
        resolved_at: None,
    }
}

fn guess(id: i64, fact_id: i64, guesser_id: i64, is_correct: bool) -> LiveGuess {
    LiveGuess {
        id,
        fact_id,
        guesser_id,
        guessed_player_id: 0,
        is_correct,
        created_at: OffsetDateTime::UNIX_EPOCH,
    }
}

fn entry(player_id: i64, points: i32, reason: ScoreReason) -> ScoreEntry {
    ScoreEntry {
        id: 0,
        player_id,
        fact_id: None,
        points,
        reason,
        description: String::new(),
        created_at: OffsetDateTime::UNIX_EPOCH,
    }
}

#[test]
fn empty_game_has_no_awards() {
    let players = vec![player(1), player(2)];
    let stats = compute_stats(StatsInput {
        players: &players,
        facts: &[],
        guesses: &[],
        log: &[],
    });
    assert!(stats.best_guesser.is_none());
    assert!(stats.hardest_fact.is_none());
    assert!(stats.most_wrong.is_none());
    assert!(stats.most_mysterious.is_none());
    assert!(stats.laziest.is_none());
    assert!(stats.best_storyteller.is_none());
}

#[test]
fn awards_pick_expected_players() {
    let players = vec![player(1), player(2), player(3)];
    let facts = vec![
        fact(10, 1, true, Some((3.0, 2))),
        fact(11, 2, true, Some((2.0, 2))),
        fact(12, 3, true, None),
        fact(13, 3, false, None),
    ];
    let guesses = vec![
        // fact 10 by 1: two wrong then 3 right
        guess(1, 10, 2, false),
        guess(2, 10, 3, false),
        // fact 11 by 2: 3 right first try
        guess(3, 11, 3, false),
        // fact 12 by 3: 1 wrong, 2 right
        guess(4, 12, 1, false),
        guess(5, 12, 2, true),
    ];
    let log = vec![
        entry(3, 3, ScoreReason::CorrectGuess),
        entry(1, 2, ScoreReason::StumpedEveryone),
        entry(3, 3, ScoreReason::CorrectGuess),
        entry(2, 3, ScoreReason::CorrectGuess),
        entry(3, 1, ScoreReason::FooledGuessers),
    ];

    let stats = compute_stats(StatsInput {
        players: &players,
        facts: &facts,
        guesses: &guesses,
        log: &log,
    });

    // 2 and 3 each have one correct guess; lowest id wins
    assert_eq!(stats.best_guesser.unwrap().player_id, 2);

    let hardest = stats.hardest_fact.unwrap();
    assert_eq!(hardest.fact_id, 10);
    assert_eq!(hardest.wrong_guesses, 2);
    assert_eq!(hardest.author_name, "p1");

    // 1, 2 and 3 each made one wrong guess
    assert_eq!(stats.most_wrong.unwrap().player_id, 1);

    let mysterious = stats.most_mysterious.unwrap();
    assert_eq!(mysterious.player_id, 1);
    assert_eq!(mysterious.value, 2.0);

    // player 2's only resolved fact drew no wrong guesses
    let laziest = stats.laziest.unwrap();
    assert_eq!(laziest.player_id, 2);
    assert_eq!(laziest.value, 0.0);

    assert_eq!(stats.best_storyteller.unwrap().player_id, 1);
}

#[test]
fn unresolved_facts_never_count_as_hardest() {
    let players = vec![player(1), player(2)];
    let facts = vec![fact(10, 1, false, None)];
    let guesses = vec![guess(1, 10, 2, false)];
    let stats = compute_stats(StatsInput {
        players: &players,
        facts: &facts,
        guesses: &guesses,
        log: &[],
    });
    assert!(stats.hardest_fact.is_none());
    assert!(stats.laziest.is_none());
    assert!(stats.most_wrong.is_none());
}

#[test]
fn guesses_on_the_open_fact_wait_for_it_to_resolve() {
    let players = vec![player(1), player(2), player(3)];
    let facts = vec![fact(10, 1, true, None), fact(11, 2, false, None)];
    let guesses = vec![
        guess(1, 10, 3, true),
        guess(2, 11, 1, false),
        guess(3, 11, 3, false),
    ];
    let stats = compute_stats(StatsInput {
        players: &players,
        facts: &facts,
        guesses: &guesses,
        log: &[],
    });

    let best = stats.best_guesser.unwrap();
    assert_eq!(best.player_id, 3);
    assert_eq!(best.value, 1.0);
    assert!(stats.most_wrong.is_none());
}

#[test]
fn a_clean_game_still_names_a_hardest_fact() {
    let players = vec![player(1), player(2)];
    let facts = vec![fact(11, 2, true, None), fact(10, 1, true, None)];
    let guesses = vec![guess(1, 10, 2, true), guess(2, 11, 1, true)];
    let stats = compute_stats(StatsInput {
        players: &players,
        facts: &facts,
        guesses: &guesses,
        log: &[],
    });

    let hardest = stats.hardest_fact.unwrap();
    assert_eq!(hardest.fact_id, 10);
    assert_eq!(hardest.wrong_guesses, 0);
}
