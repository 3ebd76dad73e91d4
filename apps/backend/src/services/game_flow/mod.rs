//! Game flow service: every state-changing game operation.
//!
//! Each public method takes the per-game lock through [`GameFlowService::run_mutation`],
//! re-validates against freshly loaded rows and moves the phase machine forward.

mod facts;
mod guessing;
mod host;
mod mutation;
mod rating;
mod rounds;
mod storytelling;

pub use guessing::GuessOutcome;
pub use mutation::GameFlowMutationResult;

#[derive(Default)]
pub struct GameFlowService;
