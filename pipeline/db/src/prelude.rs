pub use super::club_season_statistics::Entity as ClubSeasonStatistics;
pub use super::goals::Entity as Goals;
pub use super::lineup_entries::Entity as LineupEntries;
pub use super::match_events::Entity as MatchEvents;
pub use super::match_statistics::Entity as MatchStatistics;
pub use super::matches::Entity as Matches;
pub use super::opponent_players::Entity as OpponentPlayers;
pub use super::player_match_statistics::Entity as PlayerMatchStatistics;
pub use super::player_season_statistics::Entity as PlayerSeasonStatistics;
pub use super::roster_players::Entity as RosterPlayers;
pub use super::teams::Entity as Teams;
