pub mod config;
pub mod error;
pub mod event;
pub mod pipeline;

pub mod event_store;
pub mod goal_extractor;
pub mod lineup;
pub mod match_stats;
pub mod opponents;
pub mod player_stats;
pub mod recorder;
pub mod resolver;
pub mod roster;
pub mod season;
