use crate::domain::model::{FactId, PlayerId};
use crate::domain::phase::Phase;

/// The slice of game state used to detect lifecycle edges around a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub version: i32,
    pub phase: Phase,
    pub current_fact_id: Option<FactId>,
    pub story_teller_id: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    /// Lobby -> running
    GameStarted,
    /// A new fact became current.
    FactSelected { fact_id: FactId },
    /// The round resolved and this player now tells the story.
    StorytellerBecame { player_id: PlayerId },
    /// Storytelling finished; rating is open.
    RatingOpened,
    /// Game reached the terminal phase.
    GameEnded,
}

/// Derive transitions from before/after lifecycle state.
pub fn derive_game_transitions(
    before: &GameLifecycleView,
    after: &GameLifecycleView,
) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    if before.phase == Phase::Lobby && !matches!(after.phase, Phase::Lobby | Phase::Ended) {
        transitions.push(GameTransition::GameStarted);
    }

    if let Some(fact_id) = after.current_fact_id {
        if after.phase == Phase::Guessing
            && (before.current_fact_id != Some(fact_id) || before.phase != Phase::Guessing)
        {
            transitions.push(GameTransition::FactSelected { fact_id });
        }
    }

    if let Some(player_id) = after.story_teller_id {
        if after.phase == Phase::Storytelling && before.phase != Phase::Storytelling {
            transitions.push(GameTransition::StorytellerBecame { player_id });
        }
    }

    if before.phase != Phase::Rating && after.phase == Phase::Rating {
        transitions.push(GameTransition::RatingOpened);
    }

    if before.phase != Phase::Ended && after.phase == Phase::Ended {
        transitions.push(GameTransition::GameEnded);
    }

    transitions
}
