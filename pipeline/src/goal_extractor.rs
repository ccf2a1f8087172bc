//! Derives one goal row per scoring shot.

use sea_orm::{ConnectionTrait, EntityTrait, Set};

use pitchside_db as db;
use pitchside_db::common::Side;

use crate::error::IngestError;
use crate::event::Event;

/// Placeholder scorer for goals without an attributed player, such as
/// own goals credited to the benefiting side.
pub const UNKNOWN_SCORER: &str = "Unknown";

pub fn extract_goals(
    events: &[Event],
    match_id: i64,
    own_external_id: i64,
    opponent_external_id: i64,
) -> Vec<db::goals::ActiveModel> {
    events
        .iter()
        .filter(|e| e.is_goal())
        .filter_map(|e| {
            let side = match e.team_id() {
                Some(id) if id == own_external_id => Side::Own,
                Some(id) if id == opponent_external_id => Side::Opponent,
                _ => return None,
            };
            Some(db::goals::ActiveModel {
                match_id: Set(match_id),
                scorer: Set(e.player_name().unwrap_or(UNKNOWN_SCORER).to_owned()),
                minute: Set(e.minute()),
                second: Set(e.second()),
                side: Set(side),
                ..Default::default()
            })
        })
        .collect()
}

pub async fn store_goals<C: ConnectionTrait>(
    conn: &C,
    match_id: i64,
    events: &[Event],
    own_external_id: i64,
    opponent_external_id: i64,
) -> Result<usize, IngestError> {
    let rows = extract_goals(events, match_id, own_external_id, opponent_external_id);
    let count = rows.len();
    if !rows.is_empty() {
        db::goals::Entity::insert_many(rows).exec(conn).await?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_scorer_time_and_side() {
        let events = vec![
            Event::new(json!({
                "type": "shot",
                "team": {"id": 10},
                "player": {"id": 1, "name": "A. Striker"},
                "period": 1, "minute": 23, "second": 11,
                "shot": {"outcome": "goal"}
            })),
            Event::new(json!({
                "type": "shot",
                "team": {"id": 20},
                "period": 2, "minute": 70,
                "shot": {"outcome": "goal"}
            })),
            // Shootout goal, not extracted.
            Event::new(json!({
                "type": "shot",
                "team": {"id": 10},
                "period": 5,
                "shot": {"outcome": "goal"}
            })),
        ];
        let rows = extract_goals(&events, 1, 10, 20);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].scorer.clone().unwrap(), "A. Striker");
        assert_eq!(rows[0].minute.clone().unwrap(), Some(23));
        assert_eq!(rows[0].side.clone().unwrap(), Side::Own);
        // Missing player degrades to the placeholder.
        assert_eq!(rows[1].scorer.clone().unwrap(), UNKNOWN_SCORER);
        assert_eq!(rows[1].side.clone().unwrap(), Side::Opponent);
    }
}
