//! Maps the two squad announcements in the event stream onto "our
//! club" and "the opponent".
//!
//! Once the club's external id is known the mapping is a plain id
//! comparison, immune to renames. On the very first match the club
//! has no stored id yet and we fall back to progressively fuzzier
//! name matching against the two announced team names.

use strsim::jaro_winkler;

use crate::error::IngestError;
use crate::event::{Event, EventKind, SquadPlayer};

pub const NAME_SIMILARITY_THRESHOLD: f64 = 0.8;
pub const STARTERS_PER_SIDE: usize = 11;

#[derive(Debug, Clone)]
pub struct SquadAnnouncement {
    pub team_external_id: i64,
    pub team_name: String,
    pub players: Vec<SquadPlayer>,
}

#[derive(Debug)]
pub struct TeamResolution {
    pub own: SquadAnnouncement,
    pub opponent: SquadAnnouncement,
    /// Set when the club's external id was discovered by name
    /// matching and should be written back (first match only).
    pub persist_external_id: bool,
}

/// Pulls the two squad announcements out of the stream. Anything
/// other than exactly two announcements of exactly 11 players each is
/// a malformed upload.
pub fn collect_squads(
    events: &[Event],
) -> Result<(SquadAnnouncement, SquadAnnouncement), IngestError> {
    let mut squads = Vec::new();
    for e in events {
        if e.kind() != Some(EventKind::Lineup) {
            continue;
        }
        let Some(team_external_id) = e.team_id() else {
            return Err(IngestError::MalformedLineup(
                "squad announcement without a team id".to_owned(),
            ));
        };
        let team_name = e.team_name().unwrap_or_default().to_owned();
        if team_name.is_empty() {
            return Err(IngestError::MalformedLineup(format!(
                "squad announcement for team {team_external_id} has no team name"
            )));
        }
        let players = e.lineup_players();
        if players.len() != STARTERS_PER_SIDE {
            return Err(IngestError::MalformedLineup(format!(
                "team {team_external_id} announced {} players, expected {STARTERS_PER_SIDE}",
                players.len()
            )));
        }
        squads.push(SquadAnnouncement {
            team_external_id,
            team_name,
            players,
        });
    }
    match squads.len() {
        2 => {
            let mut it = squads.into_iter();
            Ok((it.next().unwrap(), it.next().unwrap()))
        }
        n => Err(IngestError::MalformedLineup(format!(
            "found {n} squad announcements, expected 2"
        ))),
    }
}

pub fn resolve(
    club_external_id: Option<i64>,
    club_name: &str,
    squads: (SquadAnnouncement, SquadAnnouncement),
) -> Result<TeamResolution, IngestError> {
    let (a, b) = squads;
    if let Some(id) = club_external_id {
        // Fast path: a stored id never falls back to name matching.
        return if a.team_external_id == id {
            Ok(TeamResolution {
                own: a,
                opponent: b,
                persist_external_id: false,
            })
        } else if b.team_external_id == id {
            Ok(TeamResolution {
                own: b,
                opponent: a,
                persist_external_id: false,
            })
        } else {
            Err(IngestError::TeamNotIdentified {
                club_name: club_name.to_owned(),
            })
        };
    }
    log::info!("No stored external id for {club_name:?}, matching by name");
    match pick_by_name(club_name, &a.team_name, &b.team_name) {
        Some(0) => Ok(TeamResolution {
            own: a,
            opponent: b,
            persist_external_id: true,
        }),
        Some(_) => Ok(TeamResolution {
            own: b,
            opponent: a,
            persist_external_id: true,
        }),
        None => Err(IngestError::TeamNotIdentified {
            club_name: club_name.to_owned(),
        }),
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Progressive matching: exact, then substring containment, then
/// jaro-winkler similarity above the threshold. A tie at any tier is
/// unresolvable and yields None.
fn pick_by_name(club_name: &str, first: &str, second: &str) -> Option<usize> {
    let target = normalize(club_name);
    let candidates = [normalize(first), normalize(second)];

    let exact: Vec<usize> = (0..2).filter(|&i| candidates[i] == target).collect();
    if let [only] = exact[..] {
        return Some(only);
    }
    if exact.len() == 2 {
        return None;
    }

    let contains: Vec<usize> = (0..2)
        .filter(|&i| candidates[i].contains(&target) || target.contains(&candidates[i]))
        .collect();
    if let [only] = contains[..] {
        return Some(only);
    }
    if contains.len() == 2 {
        return None;
    }

    let scores = [
        jaro_winkler(&target, &candidates[0]),
        jaro_winkler(&target, &candidates[1]),
    ];
    if scores[0].max(scores[1]) < NAME_SIMILARITY_THRESHOLD || scores[0] == scores[1] {
        return None;
    }
    Some(if scores[0] > scores[1] { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lineup_event(team_id: i64, team_name: &str, players: usize) -> Event {
        let lineup: Vec<_> = (1..=players)
            .map(|i| {
                json!({
                    "id": team_id * 100 + i as i64,
                    "name": format!("Player {i}"),
                    "number": i,
                    "position": "CM"
                })
            })
            .collect();
        Event::new(json!({
            "type": "lineup",
            "team": {"id": team_id, "name": team_name},
            "lineup": lineup
        }))
    }

    fn two_squads(a: &str, b: &str) -> (SquadAnnouncement, SquadAnnouncement) {
        collect_squads(&[lineup_event(10, a, 11), lineup_event(20, b, 11)]).unwrap()
    }

    #[test]
    fn rejects_wrong_player_count() {
        let err = collect_squads(&[lineup_event(10, "Falcons", 10), lineup_event(20, "Hawks", 11)])
            .unwrap_err();
        assert!(matches!(err, IngestError::MalformedLineup(_)));
    }

    #[test]
    fn rejects_wrong_announcement_count() {
        let err = collect_squads(&[lineup_event(10, "Falcons", 11)]).unwrap_err();
        assert!(matches!(err, IngestError::MalformedLineup(_)));
        let err = collect_squads(&[
            lineup_event(10, "Falcons", 11),
            lineup_event(20, "Hawks", 11),
            lineup_event(30, "Owls", 11),
        ])
        .unwrap_err();
        assert!(matches!(err, IngestError::MalformedLineup(_)));
    }

    #[test]
    fn stored_id_wins_even_when_names_differ() {
        let squads = two_squads("Completely Renamed FC", "Falcons");
        let r = resolve(Some(10), "Falcons", squads).unwrap();
        assert_eq!(r.own.team_external_id, 10);
        assert_eq!(r.opponent.team_external_id, 20);
        assert!(!r.persist_external_id);
    }

    #[test]
    fn stored_id_matching_neither_side_fails() {
        let squads = two_squads("Falcons", "Hawks");
        let err = resolve(Some(99), "Falcons", squads).unwrap_err();
        assert!(matches!(err, IngestError::TeamNotIdentified { .. }));
    }

    #[test]
    fn first_match_resolves_exact_name_and_flags_persist() {
        let squads = two_squads("Hawks", "Falcons");
        let r = resolve(None, "Falcons", squads).unwrap();
        assert_eq!(r.own.team_external_id, 20);
        assert!(r.persist_external_id);
    }

    #[test]
    fn substring_containment_matches() {
        let squads = two_squads("Riverside Falcons FC", "Hawks United");
        let r = resolve(None, "falcons", squads).unwrap();
        assert_eq!(r.own.team_external_id, 10);
    }

    #[test]
    fn similarity_tier_matches_typos() {
        let squads = two_squads("Falconss", "Hawks");
        let r = resolve(None, "Falcons", squads).unwrap();
        assert_eq!(r.own.team_external_id, 10);
    }

    #[test]
    fn dissimilar_names_fail() {
        let squads = two_squads("Red Dragons", "Blue Knights");
        let err = resolve(None, "Falcons", squads).unwrap_err();
        assert!(matches!(err, IngestError::TeamNotIdentified { .. }));
    }

    #[test]
    fn exact_tie_fails() {
        let squads = two_squads("Falcons", "Falcons");
        let err = resolve(None, "Falcons", squads).unwrap_err();
        assert!(matches!(err, IngestError::TeamNotIdentified { .. }));
    }
}
