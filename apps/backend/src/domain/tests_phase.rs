//! Phase machine tests.

use proptest::prelude::*;

use crate::domain::phase::{Phase, PhaseEvent};
use crate::domain::{test_gens, test_prelude};
use crate::errors::domain::{DomainError, ValidationKind};

#[test]
fn full_round_walk() {
    let mut phase = Phase::Lobby;
    for event in [
        PhaseEvent::Start,
        PhaseEvent::FactResolved,
        PhaseEvent::StoryFinished,
        PhaseEvent::RoundClosed {
            pool_remaining: true,
        },
    ] {
        phase = phase.apply(event).unwrap();
    }
    assert_eq!(phase, Phase::Guessing);

    let phase = phase
        .apply(PhaseEvent::FactResolved)
        .and_then(|p| p.apply(PhaseEvent::StoryFinished))
        .and_then(|p| {
            p.apply(PhaseEvent::RoundClosed {
                pool_remaining: false,
            })
        })
        .unwrap();
    assert_eq!(phase, Phase::Ended);
}

#[test]
fn storyteller_leaving_closes_round_from_storytelling() {
    assert_eq!(
        Phase::Storytelling
            .apply(PhaseEvent::RoundClosed {
                pool_remaining: true
            })
            .unwrap(),
        Phase::Guessing
    );
}

#[test]
fn out_of_order_events_are_phase_mismatches() {
    assert!(matches!(
        Phase::Lobby.apply(PhaseEvent::StoryFinished),
        Err(DomainError::Validation(ValidationKind::PhaseMismatch, _))
    ));
    assert!(matches!(
        Phase::Storytelling.apply(PhaseEvent::ForceNext {
            pool_remaining: true
        }),
        Err(DomainError::Validation(ValidationKind::PhaseMismatch, _))
    ));
    assert!(matches!(
        Phase::Guessing.apply(PhaseEvent::Start),
        Err(DomainError::Validation(ValidationKind::PhaseMismatch, _))
    ));
}

#[test]
fn end_early_from_anywhere_but_ended() {
    for phase in [
        Phase::Lobby,
        Phase::Guessing,
        Phase::Storytelling,
        Phase::Rating,
    ] {
        assert_eq!(phase.apply(PhaseEvent::EndEarly).unwrap(), Phase::Ended);
    }
}

#[test]
fn phase_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&Phase::Storytelling).unwrap(),
        "\"storytelling\""
    );
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Ended is absorbing: every event is rejected with GameEnded.
    #[test]
    fn prop_ended_rejects_everything(event in test_gens::phase_event()) {
        let res = Phase::Ended.apply(event);
        prop_assert!(matches!(res, Err(DomainError::Validation(ValidationKind::GameEnded, _))));
    }

    /// No event leads back into the lobby.
    #[test]
    fn prop_never_returns_to_lobby(phase in test_gens::phase(), event in test_gens::phase_event()) {
        if let Ok(next) = phase.apply(event) {
            prop_assert!(next != Phase::Lobby);
        }
    }

    /// An empty pool can only ever lead to Ended, never to another guessing round.
    #[test]
    fn prop_empty_pool_ends(phase in test_gens::phase()) {
        for event in [
            PhaseEvent::RoundClosed { pool_remaining: false },
            PhaseEvent::CurrentFactDropped { pool_remaining: false },
            PhaseEvent::ForceNext { pool_remaining: false },
        ] {
            if let Ok(next) = phase.apply(event) {
                prop_assert_eq!(next, Phase::Ended);
            }
        }
    }

    /// Arbitrary event sequences never leave the state machine in an
    /// undefined place and stay terminal once ended.
    #[test]
    fn prop_event_sequences(events in prop::collection::vec(test_gens::phase_event(), 0..30)) {
        let mut phase = Phase::Lobby;
        let mut ended = false;
        for event in events {
            if let Ok(next) = phase.apply(event) {
                prop_assert!(!ended, "transition out of Ended");
                phase = next;
                ended = phase == Phase::Ended;
            }
        }
    }
}
