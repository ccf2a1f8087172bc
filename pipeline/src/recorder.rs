//! Validates the coach-supplied score against the event stream and
//! persists the match row.

use sea_orm::prelude::TimeDateTimeWithTimeZone;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use pitchside_db as db;
use pitchside_db::common::MatchResult;

use crate::error::IngestError;
use crate::event::Event;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct GoalTally {
    pub own: i32,
    pub opponent: i32,
}

/// Counts goals from shot events, attributing each through the
/// event's own team reference and skipping the shootout period. The
/// count is order-independent.
pub fn count_goals(events: &[Event], own_external_id: i64, opponent_external_id: i64) -> GoalTally {
    let mut tally = GoalTally::default();
    for e in events {
        if !e.is_goal() {
            continue;
        }
        match e.team_id() {
            Some(id) if id == own_external_id => tally.own += 1,
            Some(id) if id == opponent_external_id => tally.opponent += 1,
            other => {
                log::warn!("Goal event attributed to unknown team {other:?}, ignoring");
            }
        }
    }
    tally
}

pub fn result_from_scores(our_score: i32, opponent_score: i32) -> MatchResult {
    match our_score.cmp(&opponent_score) {
        std::cmp::Ordering::Greater => MatchResult::Win,
        std::cmp::Ordering::Equal => MatchResult::Draw,
        std::cmp::Ordering::Less => MatchResult::Loss,
    }
}

pub struct MatchInput<'a> {
    pub club_id: i64,
    pub opponent_id: i64,
    pub opponent_name: &'a str,
    pub date: time::Date,
    pub our_score: i32,
    pub opponent_score: i32,
    pub own_external_id: i64,
    pub opponent_external_id: i64,
}

/// Rejects a re-upload, reconciles the score against counted goals
/// (a mismatch is fatal) and inserts the match row.
pub async fn record_match<C: ConnectionTrait>(
    conn: &C,
    input: &MatchInput<'_>,
    events: &[Event],
) -> Result<i64, IngestError> {
    let already = db::matches::Entity::find()
        .filter(
            Condition::all()
                .add(db::matches::Column::ClubId.eq(input.club_id))
                .add(db::matches::Column::OpponentId.eq(input.opponent_id))
                .add(db::matches::Column::MatchDate.eq(input.date)),
        )
        .count(conn)
        .await?;
    if already > 0 {
        return Err(IngestError::MatchAlreadyIngested {
            opponent: input.opponent_name.to_owned(),
            date: input.date,
        });
    }

    let counted = count_goals(events, input.own_external_id, input.opponent_external_id);
    if counted.own != input.our_score || counted.opponent != input.opponent_score {
        return Err(IngestError::ScoreMismatch {
            counted_own: counted.own,
            counted_opponent: counted.opponent,
            supplied_own: input.our_score,
            supplied_opponent: input.opponent_score,
        });
    }

    let row = db::matches::ActiveModel {
        club_id: Set(input.club_id),
        opponent_id: Set(input.opponent_id),
        match_date: Set(input.date),
        our_score: Set(input.our_score),
        opponent_score: Set(input.opponent_score),
        result: Set(result_from_scores(input.our_score, input.opponent_score)),
        creation_time: Set(TimeDateTimeWithTimeZone::now_utc()),
        ..Default::default()
    };
    let match_id = db::matches::Entity::insert(row)
        .exec(conn)
        .await?
        .last_insert_id;
    log::info!(
        "Recorded match {match_id}: {}-{} vs {:?} on {}",
        input.our_score,
        input.opponent_score,
        input.opponent_name,
        input.date
    );
    Ok(match_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shot(team: i64, outcome: &str, period: i32) -> Event {
        Event::new(json!({
            "type": "shot",
            "team": {"id": team},
            "period": period,
            "shot": {"outcome": outcome}
        }))
    }

    #[test]
    fn result_is_pure_function_of_scores() {
        assert_eq!(result_from_scores(3, 1), MatchResult::Win);
        assert_eq!(result_from_scores(2, 2), MatchResult::Draw);
        assert_eq!(result_from_scores(0, 1), MatchResult::Loss);
    }

    #[test]
    fn shootout_goals_do_not_count() {
        let events = vec![
            shot(10, "goal", 1),
            shot(10, "goal", 2),
            shot(10, "goal", 2),
            shot(20, "goal", 2),
            shot(10, "goal", 5),
            shot(10, "goal", 5),
            shot(20, "goal", 5),
        ];
        let tally = count_goals(&events, 10, 20);
        assert_eq!(tally, GoalTally { own: 3, opponent: 1 });
    }

    #[test]
    fn counting_is_order_invariant() {
        let mut events = vec![
            shot(20, "goal", 2),
            shot(10, "goal", 1),
            shot(10, "saved", 2),
            shot(10, "goal", 2),
        ];
        let forward = count_goals(&events, 10, 20);
        events.reverse();
        let backward = count_goals(&events, 10, 20);
        assert_eq!(forward, backward);
        assert_eq!(forward, GoalTally { own: 2, opponent: 1 });
    }

    #[test]
    fn goals_of_unknown_teams_are_dropped() {
        let events = vec![shot(99, "goal", 1)];
        assert_eq!(count_goals(&events, 10, 20), GoalTally::default());
    }
}
