use crate::domain::game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
use crate::domain::phase::Phase;

fn view(phase: Phase, current_fact_id: Option<i64>, story_teller_id: Option<i64>) -> GameLifecycleView {
    GameLifecycleView {
        version: 1,
        phase,
        current_fact_id,
        story_teller_id,
    }
}

#[test]
fn start_selects_a_fact() {
    let t = derive_game_transitions(
        &view(Phase::Lobby, None, None),
        &view(Phase::Guessing, Some(4), None),
    );
    assert_eq!(
        t,
        vec![
            GameTransition::GameStarted,
            GameTransition::FactSelected { fact_id: 4 }
        ]
    );
}

#[test]
fn resolution_names_storyteller() {
    let t = derive_game_transitions(
        &view(Phase::Guessing, Some(4), None),
        &view(Phase::Storytelling, Some(4), Some(2)),
    );
    assert_eq!(t, vec![GameTransition::StorytellerBecame { player_id: 2 }]);
}

#[test]
fn rating_then_next_round() {
    let t = derive_game_transitions(
        &view(Phase::Storytelling, Some(4), Some(2)),
        &view(Phase::Rating, Some(4), Some(2)),
    );
    assert_eq!(t, vec![GameTransition::RatingOpened]);

    let t = derive_game_transitions(
        &view(Phase::Rating, Some(4), Some(2)),
        &view(Phase::Guessing, Some(5), None),
    );
    assert_eq!(t, vec![GameTransition::FactSelected { fact_id: 5 }]);
}

#[test]
fn skipping_a_fact_is_a_selection() {
    let t = derive_game_transitions(
        &view(Phase::Guessing, Some(4), None),
        &view(Phase::Guessing, Some(6), None),
    );
    assert_eq!(t, vec![GameTransition::FactSelected { fact_id: 6 }]);
}

#[test]
fn lobby_straight_to_ended_is_not_a_start() {
    let t = derive_game_transitions(&view(Phase::Lobby, None, None), &view(Phase::Ended, None, None));
    assert_eq!(t, vec![GameTransition::GameEnded]);
}

#[test]
fn no_change_no_transitions() {
    let v = view(Phase::Rating, Some(1), Some(1));
    assert!(derive_game_transitions(&v, &v).is_empty());
}
