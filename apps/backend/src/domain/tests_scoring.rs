//! Scoring and scoreboard tests.

use std::collections::HashMap;

use proptest::prelude::*;
use time::OffsetDateTime;

use crate::domain::model::{LiveGuess, PlayerId};
use crate::domain::round::{resolve_round, RoundResolution};
use crate::domain::scoring::{
    awards_for_correct_guess, awards_for_stumped, tally, ScoreReason, CORRECT_GUESS_POINTS,
};
use crate::domain::test_gens::{self, player};
use crate::domain::test_prelude;

#[test]
fn correct_guess_awards_guesser_and_author() {
    let awards = awards_for_correct_guess(&player(2), &player(1), 2);
    assert_eq!(awards.len(), 2);
    assert_eq!(awards[0].player_id, 2);
    assert_eq!(awards[0].points, CORRECT_GUESS_POINTS);
    assert_eq!(awards[0].reason, ScoreReason::CorrectGuess);
    assert_eq!(awards[1].player_id, 1);
    assert_eq!(awards[1].points, 2);
    assert_eq!(awards[1].reason, ScoreReason::FooledGuessers);
}

#[test]
fn zero_point_awards_are_skipped() {
    let awards = awards_for_correct_guess(&player(2), &player(1), 0);
    assert_eq!(awards.len(), 1);
    assert!(awards_for_stumped(&player(1), 0).is_empty());
    let stumped = awards_for_stumped(&player(1), 3);
    assert_eq!(stumped[0].points, 3);
    assert_eq!(stumped[0].reason, ScoreReason::StumpedEveryone);
}

#[test]
fn reason_codes_round_trip() {
    for reason in [
        ScoreReason::CorrectGuess,
        ScoreReason::FooledGuessers,
        ScoreReason::StumpedEveryone,
    ] {
        assert_eq!(ScoreReason::parse(reason.as_str()), Some(reason));
    }
    assert_eq!(ScoreReason::parse("BONUS"), None);
}

#[test]
fn tally_keeps_kicked_players_with_history_only() {
    let mut kicked_scorer = player(3);
    kicked_scorer.kicked_at = Some(OffsetDateTime::UNIX_EPOCH);
    let mut kicked_idle = player(4);
    kicked_idle.kicked_at = Some(OffsetDateTime::UNIX_EPOCH);
    let players = vec![player(1), player(2), kicked_scorer, kicked_idle];

    let log = awards_for_correct_guess(&players[2], &players[0], 1)
        .into_iter()
        .enumerate()
        .map(|(i, a)| crate::domain::model::ScoreEntry {
            id: i as i64,
            player_id: a.player_id,
            fact_id: Some(9),
            points: a.points,
            reason: a.reason,
            description: a.description,
            created_at: OffsetDateTime::UNIX_EPOCH,
        })
        .collect::<Vec<_>>();

    let rows = tally(&players, &log);
    let ids: Vec<_> = rows.iter().map(|r| r.player_id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert!(!rows[0].active);
    assert_eq!(rows[0].points, 3);
    assert_eq!(rows[1].points, 1);
    assert_eq!(rows[2].points, 0);
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Scoreboard totals equal the per-player sum of the log, and the fold is
    /// order independent.
    #[test]
    fn prop_tally_matches_log_sum(log in test_gens::score_log(5)) {
        let players: Vec<_> = (1..=5).map(player).collect();
        let rows = tally(&players, &log);

        let mut expected: HashMap<PlayerId, i32> = HashMap::new();
        for e in &log {
            *expected.entry(e.player_id).or_default() += e.points;
        }
        for row in &rows {
            prop_assert_eq!(row.points, expected.get(&row.player_id).copied().unwrap_or(0));
        }

        let mut reversed = log.clone();
        reversed.reverse();
        prop_assert_eq!(tally(&players, &reversed), rows.clone());

        for pair in rows.windows(2) {
            prop_assert!(pair[0].points >= pair[1].points);
        }
    }

    /// Awards for a resolved round: the guesser gets the fixed bonus and the
    /// author exactly one point per wrong guess.
    #[test]
    fn prop_round_awards(guesses in test_gens::guesses_on_fact(1, 6)) {
        let roster: Vec<PlayerId> = (1..=6).collect();
        let wrong = guesses.iter().filter(|g| !g.is_correct).count();
        match resolve_round(1, &roster, &guesses) {
            RoundResolution::Correct { guesser_id, wrong_guesses } => {
                prop_assert_eq!(wrong_guesses, wrong);
                let awards = awards_for_correct_guess(&player(guesser_id), &player(1), wrong_guesses);
                let total: i32 = awards.iter().map(|a| a.points).sum();
                prop_assert_eq!(total, CORRECT_GUESS_POINTS + wrong as i32);
            }
            RoundResolution::Stumped { wrong_guesses } => {
                prop_assert!(guesses.iter().all(|g: &LiveGuess| !g.is_correct));
                prop_assert_eq!(wrong_guesses, 5);
                let total: i32 = awards_for_stumped(&player(1), wrong_guesses).iter().map(|a| a.points).sum();
                prop_assert_eq!(total, 5);
            }
            RoundResolution::Open => {
                prop_assert!(guesses.iter().all(|g| !g.is_correct));
                prop_assert!(guesses.len() < 5);
            }
        }
    }
}
