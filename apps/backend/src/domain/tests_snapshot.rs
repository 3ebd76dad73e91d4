use time::OffsetDateTime;

use crate::domain::model::{Fact, Game, LiveGuess};
use crate::domain::phase::Phase;
use crate::domain::snapshot::{build_snapshot, SnapshotInput};
use crate::domain::test_gens::player;

fn game(phase: Phase, current_fact_id: Option<i64>) -> Game {
    Game {
        id: 5,
        token: "otter42".to_string(),
        phase,
        current_fact_id,
        story_teller_id: None,
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
        started_at: (phase != Phase::Lobby).then_some(OffsetDateTime::UNIX_EPOCH),
        ended_at: None,
        last_fact_added: None,
        version: 7,
    }
}

fn fact(id: i64, author_id: i64, guessed: bool) -> Fact {
    Fact {
        id,
        game_id: 5,
        author_id,
        text: format!("fact {id}"),
        guessed,
        story_revealed: false,
        story: None,
        story_rating_average: None,
        story_rating_count: 0,
        created_at: OffsetDateTime::UNIX_EPOCH,
        resolved_at: None,
    }
}

#[test]
fn authors_hidden_until_resolved() {
    let g = game(Phase::Guessing, Some(2));
    let players = vec![player(1), player(2)];
    let facts = vec![fact(1, 1, true), fact(2, 2, false), fact(3, 1, false)];
    let snap = build_snapshot(SnapshotInput {
        game: &g,
        players: &players,
        facts: &facts,
        current_guesses: &[],
        current_rating_count: 0,
    });

    for f in &snap.facts {
        match f.id {
            1 => assert_eq!(f.author_id, Some(1)),
            _ => assert_eq!(f.author_id, None),
        }
    }
    assert_eq!(snap.game.pool_remaining, 2);
    assert_eq!(snap.game.current_fact.as_ref().unwrap().id, 2);
    assert!(snap.game.started);
    assert!(!snap.game.ended);
    assert_eq!(snap.game.version, 7);
}

#[test]
fn kicked_players_leave_the_roster() {
    let g = game(Phase::Lobby, None);
    let mut gone = player(2);
    gone.kicked_at = Some(OffsetDateTime::UNIX_EPOCH);
    let players = vec![player(1), gone];
    let facts = vec![fact(1, 1, false)];
    let snap = build_snapshot(SnapshotInput {
        game: &g,
        players: &players,
        facts: &facts,
        current_guesses: &[],
        current_rating_count: 0,
    });
    assert_eq!(snap.players.len(), 1);
    assert_eq!(snap.players[0].fact_count, 1);
    assert!(snap.game.current_fact.is_none());
}

#[test]
fn snapshot_json_shape() {
    let g = game(Phase::Guessing, Some(1));
    let players = vec![player(1), player(2)];
    let facts = vec![fact(1, 1, false)];
    let guesses = vec![LiveGuess {
        id: 1,
        fact_id: 1,
        guesser_id: 2,
        guessed_player_id: 1,
        is_correct: true,
        created_at: OffsetDateTime::UNIX_EPOCH,
    }];
    let snap = build_snapshot(SnapshotInput {
        game: &g,
        players: &players,
        facts: &facts,
        current_guesses: &guesses,
        current_rating_count: 0,
    });
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["game"]["phase"], "guessing");
    assert_eq!(json["game"]["token"], "otter42");
    assert_eq!(json["current_guesses"][0]["is_correct"], true);
    assert!(json["facts"][0]["author_id"].is_null());
}
