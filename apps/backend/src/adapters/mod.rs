//! SeaORM adapters. Functions return `DbErr`; the repos layer converts.

pub mod facts_sea;
pub mod games_sea;
pub mod guesses_sea;
pub mod players_sea;
pub mod ratings_sea;
pub mod score_log_sea;
