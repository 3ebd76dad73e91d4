//! Domain layer: pure game rules, no I/O.

pub mod game_transition;
pub mod model;
pub mod ordering;
pub mod phase;
pub mod rating;
pub mod round;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod stats;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_game_transition;
#[cfg(test)]
mod tests_phase;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_snapshot;
#[cfg(test)]
mod tests_stats;

pub use model::{Fact, FactId, Game, GameId, LiveGuess, Player, PlayerId, ScoreEntry, StoryRating};
pub use phase::{Phase, PhaseEvent};
pub use round::RoundResolution;
pub use scoring::ScoreReason;
