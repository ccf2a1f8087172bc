//! Per-player aggregates, restricted to the own starting lineup.
//! Events by substitutes or unlisted players are ignored.

use std::collections::HashMap;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use pitchside_db as db;

use crate::error::IngestError;
use crate::event::Event;
use crate::match_stats::{pct, ActionTotals};
use crate::resolver::SquadAnnouncement;

pub fn player_totals(events: &[Event], player_external_id: i64) -> ActionTotals {
    let mut totals = ActionTotals::default();
    for e in events {
        if e.is_shootout() {
            continue;
        }
        if e.player_id() == Some(player_external_id) {
            totals.note(e);
        }
    }
    totals
}

/// One row per starter, using the same classification rules as the
/// team-level calculator plus goals and assists.
pub async fn store_player_statistics<C: ConnectionTrait>(
    conn: &C,
    match_id: i64,
    events: &[Event],
    own_squad: &SquadAnnouncement,
    own_ids: &HashMap<i64, i64>,
) -> Result<(), IngestError> {
    let existing = db::player_match_statistics::Entity::find()
        .filter(db::player_match_statistics::Column::MatchId.eq(match_id))
        .count(conn)
        .await?;
    if existing > 0 {
        return Err(IngestError::StatisticsAlreadyExist {
            stage: "player statistics",
            match_id,
        });
    }
    let mut rows = Vec::with_capacity(own_squad.players.len());
    for p in &own_squad.players {
        let roster_player_id = *own_ids
            .get(&p.external_id)
            .ok_or(IngestError::PlayerNotResolved {
                external_id: p.external_id,
            })?;
        let t = player_totals(events, p.external_id);
        rows.push(db::player_match_statistics::ActiveModel {
            match_id: Set(match_id),
            roster_player_id: Set(roster_player_id),
            goals: Set(t.goals),
            assists: Set(t.assists),
            shots: Set(t.shots),
            shots_on_target: Set(t.shots_on_target),
            xg: Set(t.xg),
            passes: Set(t.passes),
            passes_completed: Set(t.passes_completed),
            pass_completion_pct: Set(pct(t.passes_completed, t.passes)),
            final_third_passes: Set(t.final_third_passes),
            long_passes: Set(t.long_passes),
            crosses: Set(t.crosses),
            dribbles_attempted: Set(t.dribbles_attempted),
            dribbles_completed: Set(t.dribbles_completed),
            tackles: Set(t.tackles),
            tackles_won: Set(t.tackles_won),
            interceptions: Set(t.interceptions),
            recoveries: Set(t.recoveries),
            ..Default::default()
        });
    }
    if !rows.is_empty() {
        db::player_match_statistics::Entity::insert_many(rows)
            .exec(conn)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn totals_are_scoped_to_the_player_and_skip_shootout() {
        let events: Vec<Event> = vec![
            json!({"type": "shot", "team": {"id": 10}, "player": {"id": 7},
                   "shot": {"outcome": "goal", "xg": 0.4}}),
            json!({"type": "shot", "team": {"id": 10}, "player": {"id": 8},
                   "shot": {"outcome": "saved"}}),
            json!({"type": "pass", "team": {"id": 10}, "player": {"id": 7},
                   "pass": {"assist": true}}),
            json!({"type": "shot", "team": {"id": 10}, "player": {"id": 7}, "period": 5,
                   "shot": {"outcome": "goal"}}),
        ]
        .into_iter()
        .map(Event::new)
        .collect();
        let t = player_totals(&events, 7);
        assert_eq!(t.goals, 1);
        assert_eq!(t.shots, 1);
        assert_eq!(t.assists, 1);
        assert!((t.xg - 0.4).abs() < 1e-9);
        let other = player_totals(&events, 8);
        assert_eq!(other.goals, 0);
        assert_eq!(other.shots, 1);
    }
}
