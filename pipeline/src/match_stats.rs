//! Per-side aggregate statistics for one match.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use pitchside_db as db;
use pitchside_db::common::Side;

use crate::error::IngestError;
use crate::event::{Event, EventKind};

pub fn pct(numerator: i32, denominator: i32) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64 * 100.0)
}

pub fn avg(sum: f64, count: i32) -> Option<f64> {
    (count > 0).then(|| sum / count as f64)
}

/// Event counters shared between the team and player calculators.
/// The caller decides which events belong to the entity being
/// counted; `note` only classifies.
#[derive(Debug, Default, Clone)]
pub struct ActionTotals {
    pub goals: i32,
    pub assists: i32,
    pub shots: i32,
    pub shots_on_target: i32,
    pub shots_off_target: i32,
    pub xg: f64,
    pub passes: i32,
    pub passes_completed: i32,
    pub pass_length_sum: f64,
    pub pass_length_count: i32,
    pub final_third_passes: i32,
    pub long_passes: i32,
    pub crosses: i32,
    pub dribbles_attempted: i32,
    pub dribbles_completed: i32,
    pub tackles: i32,
    pub tackles_won: i32,
    pub interceptions: i32,
    pub interceptions_won: i32,
    pub recoveries: i32,
}

impl ActionTotals {
    pub fn note(&mut self, e: &Event) {
        match e.kind() {
            Some(EventKind::Shot) => {
                self.shots += 1;
                if e.is_shot_on_target() {
                    self.shots_on_target += 1;
                } else {
                    self.shots_off_target += 1;
                }
                self.xg += e.shot_xg().unwrap_or(0.0);
                if e.shot_outcome() == Some("goal") {
                    self.goals += 1;
                }
            }
            Some(EventKind::Pass) => {
                if e.is_assist() {
                    self.assists += 1;
                }
                // Set-piece restarts still hold possession but say
                // nothing about passing quality.
                if e.is_set_piece_pass() {
                    return;
                }
                self.passes += 1;
                if e.is_completed_pass() {
                    self.passes_completed += 1;
                }
                if let Some(length) = e.pass_length() {
                    self.pass_length_sum += length;
                    self.pass_length_count += 1;
                }
                if e.is_final_third_pass() {
                    self.final_third_passes += 1;
                }
                if e.is_long_pass() {
                    self.long_passes += 1;
                }
                if e.is_cross() {
                    self.crosses += 1;
                }
            }
            Some(EventKind::Dribble) => {
                self.dribbles_attempted += 1;
                if e.is_completed_dribble() {
                    self.dribbles_completed += 1;
                }
            }
            Some(EventKind::Duel) => {
                if e.is_tackle() {
                    self.tackles += 1;
                    if e.is_won_tackle() {
                        self.tackles_won += 1;
                    }
                }
            }
            Some(EventKind::Interception) => {
                self.interceptions += 1;
                if e.is_won_interception() {
                    self.interceptions_won += 1;
                }
            }
            Some(EventKind::Recovery) => {
                if e.is_counted_recovery() {
                    self.recoveries += 1;
                }
            }
            _ => {}
        }
    }
}

fn side_row(
    match_id: i64,
    side: Side,
    events: &[&Event],
    side_external_id: i64,
    opponent_external_id: i64,
) -> db::match_statistics::ActiveModel {
    let mut totals = ActionTotals::default();
    let mut possession_secs = 0.0;
    let mut total_secs = 0.0;
    let mut saves = 0;
    for e in events {
        if let Some(d) = e.duration() {
            total_secs += d;
            if e.possession_team_id() == Some(side_external_id) {
                possession_secs += d;
            }
        }
        if e.kind() == Some(EventKind::Shot)
            && e.team_id() == Some(opponent_external_id)
            && e.is_saved_shot()
        {
            saves += 1;
        }
        if e.team_id() == Some(side_external_id) {
            totals.note(e);
        }
    }
    let possession_pct = (total_secs > 0.0).then(|| possession_secs / total_secs * 100.0);
    db::match_statistics::ActiveModel {
        match_id: Set(match_id),
        side: Set(side),
        possession_pct: Set(possession_pct),
        shots: Set(totals.shots),
        shots_on_target: Set(totals.shots_on_target),
        shots_off_target: Set(totals.shots_off_target),
        xg: Set(totals.xg),
        goalkeeper_saves: Set(saves),
        passes: Set(totals.passes),
        passes_completed: Set(totals.passes_completed),
        pass_completion_pct: Set(pct(totals.passes_completed, totals.passes)),
        pass_length_avg: Set(avg(totals.pass_length_sum, totals.pass_length_count)),
        final_third_passes: Set(totals.final_third_passes),
        long_passes: Set(totals.long_passes),
        crosses: Set(totals.crosses),
        dribbles_attempted: Set(totals.dribbles_attempted),
        dribbles_completed: Set(totals.dribbles_completed),
        tackles: Set(totals.tackles),
        tackles_won: Set(totals.tackles_won),
        tackle_success_pct: Set(pct(totals.tackles_won, totals.tackles)),
        interceptions: Set(totals.interceptions),
        interceptions_won: Set(totals.interceptions_won),
        recoveries: Set(totals.recoveries),
        ..Default::default()
    }
}

/// Computes and persists the two per-side rows. Open-play statistics
/// only: shootout-period events are left out.
pub async fn store_match_statistics<C: ConnectionTrait>(
    conn: &C,
    match_id: i64,
    events: &[Event],
    own_external_id: i64,
    opponent_external_id: i64,
) -> Result<(), IngestError> {
    let existing = db::match_statistics::Entity::find()
        .filter(db::match_statistics::Column::MatchId.eq(match_id))
        .count(conn)
        .await?;
    if existing > 0 {
        return Err(IngestError::StatisticsAlreadyExist {
            stage: "match statistics",
            match_id,
        });
    }
    let open_play: Vec<&Event> = crate::event_store::relevant(events)
        .into_iter()
        .filter(|e| !e.is_shootout())
        .collect();
    let rows = vec![
        side_row(match_id, Side::Own, &open_play, own_external_id, opponent_external_id),
        side_row(match_id, Side::Opponent, &open_play, opponent_external_id, own_external_id),
    ];
    db::match_statistics::Entity::insert_many(rows)
        .exec(conn)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collect(events: &[Event], team: i64) -> ActionTotals {
        let mut t = ActionTotals::default();
        for e in events {
            if e.team_id() == Some(team) {
                t.note(e);
            }
        }
        t
    }

    #[test]
    fn percentage_is_null_when_denominator_is_zero() {
        assert_eq!(pct(0, 0), None);
        assert_eq!(pct(3, 4), Some(75.0));
        assert_eq!(avg(0.0, 0), None);
    }

    #[test]
    fn set_piece_passes_do_not_enter_pass_statistics() {
        let events = vec![
            Event::new(json!({
                "type": "pass", "team": {"id": 10},
                "pass": {"length": 12.0}
            })),
            Event::new(json!({
                "type": "pass", "team": {"id": 10},
                "pass": {"kind": "throw_in", "length": 25.0}
            })),
            Event::new(json!({
                "type": "pass", "team": {"id": 10},
                "pass": {"kind": "corner", "outcome": "incomplete"}
            })),
        ];
        let t = collect(&events, 10);
        assert_eq!(t.passes, 1);
        assert_eq!(t.passes_completed, 1);
        assert_eq!(t.pass_length_count, 1);
    }

    #[test]
    fn possession_uses_durations_not_counts() {
        let events: Vec<Event> = vec![
            json!({"type": "pass", "team": {"id": 10}, "possession_team": {"id": 10}, "duration": 3.0}),
            json!({"type": "pass", "team": {"id": 10}, "possession_team": {"id": 10}, "duration": 3.0}),
            json!({"type": "pass", "team": {"id": 20}, "possession_team": {"id": 20}, "duration": 9.0}),
            // Missing duration degrades to "does not count".
            json!({"type": "pass", "team": {"id": 20}, "possession_team": {"id": 20}}),
        ]
        .into_iter()
        .map(Event::new)
        .collect();
        let refs: Vec<&Event> = events.iter().collect();
        let row = side_row(1, Side::Own, &refs, 10, 20);
        // 6 of 15 seconds despite 2 of 4 events.
        let possession = row.possession_pct.clone().unwrap().unwrap();
        assert!((possession - 40.0).abs() < 1e-9);
    }

    #[test]
    fn goalkeeper_saves_count_opposing_saved_shots() {
        let events: Vec<Event> = vec![
            json!({"type": "shot", "team": {"id": 20}, "shot": {"outcome": "saved"}}),
            json!({"type": "shot", "team": {"id": 20}, "shot": {"outcome": "goal"}}),
            json!({"type": "shot", "team": {"id": 10}, "shot": {"outcome": "saved"}}),
        ]
        .into_iter()
        .map(Event::new)
        .collect();
        let refs: Vec<&Event> = events.iter().collect();
        let own = side_row(1, Side::Own, &refs, 10, 20);
        assert_eq!(own.goalkeeper_saves.clone().unwrap(), 1);
        let opp = side_row(1, Side::Opponent, &refs, 20, 10);
        assert_eq!(opp.goalkeeper_saves.clone().unwrap(), 1);
        assert_eq!(opp.shots.clone().unwrap(), 2);
    }

    #[test]
    fn tackle_success_uses_allow_list() {
        let events: Vec<Event> = vec![
            json!({"type": "duel", "team": {"id": 10}, "duel": {"kind": "tackle", "outcome": "success_in_play"}}),
            json!({"type": "duel", "team": {"id": 10}, "duel": {"kind": "tackle", "outcome": "lost"}}),
            json!({"type": "duel", "team": {"id": 10}, "duel": {"kind": "aerial", "outcome": "won"}}),
            json!({"type": "interception", "team": {"id": 10}, "interception": {"outcome": "won"}}),
            json!({"type": "recovery", "team": {"id": 10}, "recovery": {"outcome": "failure"}}),
            json!({"type": "recovery", "team": {"id": 10}}),
        ]
        .into_iter()
        .map(Event::new)
        .collect();
        let t = collect(&events, 10);
        assert_eq!(t.tackles, 2);
        assert_eq!(t.tackles_won, 1);
        assert_eq!(t.interceptions, 1);
        assert_eq!(t.interceptions_won, 1);
        assert_eq!(t.recoveries, 1);
    }
}
