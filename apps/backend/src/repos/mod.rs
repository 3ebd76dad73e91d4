//! Repository functions: domain models in, domain models out.

pub mod facts;
pub mod games;
pub mod guesses;
pub mod players;
pub mod ratings;
pub mod score_log;
