pub mod game_flow;
pub mod games;
pub mod memberships;
pub mod scoreboard;
pub mod stats;
