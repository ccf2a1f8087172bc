pub mod prelude;

pub mod club_season_statistics;
pub mod common;
pub mod goals;
pub mod lineup_entries;
pub mod match_events;
pub mod match_statistics;
pub mod matches;
pub mod opponent_players;
pub mod player_match_statistics;
pub mod player_season_statistics;
pub mod roster_players;
pub mod teams;
