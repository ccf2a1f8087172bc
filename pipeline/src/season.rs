//! Season-level aggregates for the club and its players.
//!
//! Both aggregators recompute their row wholesale from the stored
//! match history rather than adjusting it incrementally, so a retry
//! or a backfill lands on the same numbers. Completion and success
//! rates are weighted by re-summing the underlying attempt counts
//! across matches; averaging the stored per-match percentages would
//! let a 5-pass match weigh as much as a 500-pass one.

use sea_orm::prelude::TimeDateTimeWithTimeZone;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, Set};

use pitchside_db as db;
use pitchside_db::common::{MatchResult, Side};

use crate::error::IngestError;
use crate::match_stats::pct;

pub const FORM_LENGTH: usize = 5;
pub const LOW_SAMPLE_MATCHES: i32 = 5;

pub const RATING_MIN: i32 = 25;
pub const RATING_MAX: i32 = 100;

// Per-match scales a component is normalized against; hitting the
// scale means a perfect 1.0 for that component.
const GOALS_SCALE: f64 = 1.0;
const ASSISTS_SCALE: f64 = 0.7;
const XG_SCALE: f64 = 1.0;
const SHOTS_ON_TARGET_SCALE: f64 = 3.0;
const LONG_PASSES_SCALE: f64 = 5.0;
const CROSSES_SCALE: f64 = 5.0;
const INTERCEPTIONS_SCALE: f64 = 5.0;
const FINAL_THIRD_SCALE: f64 = 10.0;
const RECOVERIES_SCALE: f64 = 8.0;
const TACKLES_WON_SCALE: f64 = 4.0;
const DRIBBLES_COMPLETED_SCALE: f64 = 5.0;

/// Summed season counters for one player.
#[derive(Debug, Default, Clone)]
pub struct SeasonCounters {
    pub matches: i32,
    pub goals: i32,
    pub assists: i32,
    pub shots: i32,
    pub shots_on_target: i32,
    pub xg: f64,
    pub passes: i32,
    pub passes_completed: i32,
    pub final_third_passes: i32,
    pub long_passes: i32,
    pub crosses: i32,
    pub dribbles_attempted: i32,
    pub dribbles_completed: i32,
    pub tackles: i32,
    pub tackles_won: i32,
    pub interceptions: i32,
    pub recoveries: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratings {
    pub attacking: i32,
    pub technique: i32,
    pub tactical: i32,
    pub defending: i32,
    pub creativity: i32,
}

/// Multiplier keeping ratings of barely-sampled players visually
/// stable: below 5 matches the raw score is inflated, capped at 1.5x
/// so a single match receives the full boost.
pub fn low_sample_boost(matches: i32) -> f64 {
    if matches >= LOW_SAMPLE_MATCHES {
        return 1.0;
    }
    (1.0 + 0.125 * (LOW_SAMPLE_MATCHES - matches) as f64).min(1.5)
}

fn per_match(count: i32, matches: i32) -> f64 {
    if matches <= 0 {
        0.0
    } else {
        count as f64 / matches as f64
    }
}

fn unit(value: f64, scale: f64) -> f64 {
    (value / scale).clamp(0.0, 1.0)
}

fn rate(numerator: i32, denominator: i32) -> f64 {
    if denominator <= 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn display(raw: f64, boost: f64) -> i32 {
    let boosted = (raw * boost).clamp(0.0, 1.0);
    (RATING_MIN as f64 + boosted * (RATING_MAX - RATING_MIN) as f64).round() as i32
}

/// The five attribute ratings, each a fixed weighted combination of
/// normalized season counters mapped into [25, 100].
pub fn ratings(c: &SeasonCounters) -> Ratings {
    let m = c.matches;
    let boost = low_sample_boost(m);

    let pass_completion = rate(c.passes_completed, c.passes);
    let dribble_success = rate(c.dribbles_completed, c.dribbles_attempted);
    let tackle_success = rate(c.tackles_won, c.tackles);

    let attacking = 0.4 * unit(per_match(c.goals, m), GOALS_SCALE)
        + 0.3 * unit(per_match(c.assists, m), ASSISTS_SCALE)
        + 0.2 * unit(c.xg / m.max(1) as f64, XG_SCALE)
        + 0.1 * unit(per_match(c.shots_on_target, m), SHOTS_ON_TARGET_SCALE);
    let technique = 0.4 * pass_completion
        + 0.3 * dribble_success
        + 0.2 * unit(per_match(c.long_passes, m), LONG_PASSES_SCALE)
        + 0.1 * unit(per_match(c.crosses, m), CROSSES_SCALE);
    let tactical = 0.3 * unit(per_match(c.interceptions, m), INTERCEPTIONS_SCALE)
        + 0.3 * unit(per_match(c.final_third_passes, m), FINAL_THIRD_SCALE)
        + 0.2 * unit(per_match(c.recoveries, m), RECOVERIES_SCALE)
        + 0.2 * pass_completion;
    let defending = 0.35 * unit(per_match(c.tackles_won, m), TACKLES_WON_SCALE)
        + 0.25 * tackle_success
        + 0.25 * unit(per_match(c.interceptions, m), INTERCEPTIONS_SCALE)
        + 0.15 * unit(per_match(c.recoveries, m), RECOVERIES_SCALE);
    let creativity = 0.35 * unit(per_match(c.assists, m), ASSISTS_SCALE)
        + 0.3 * unit(per_match(c.final_third_passes, m), FINAL_THIRD_SCALE)
        + 0.2 * unit(per_match(c.crosses, m), CROSSES_SCALE)
        + 0.15 * unit(per_match(c.dribbles_completed, m), DRIBBLES_COMPLETED_SCALE);

    Ratings {
        attacking: display(attacking, boost),
        technique: display(technique, boost),
        tactical: display(tactical, boost),
        defending: display(defending, boost),
        creativity: display(creativity, boost),
    }
}

pub fn form_string(results: impl Iterator<Item = MatchResult>) -> String {
    results.take(FORM_LENGTH).map(|r| r.letter()).collect()
}

/// Rebuilds the club's season row from every stored match of the
/// club.
pub async fn recompute_club<C: ConnectionTrait>(conn: &C, club_id: i64) -> Result<(), IngestError> {
    let mut matches = db::matches::Entity::find()
        .filter(db::matches::Column::ClubId.eq(club_id))
        .all(conn)
        .await?;
    // Most recent first, ingestion order breaking date ties.
    matches.sort_by(|a, b| b.match_date.cmp(&a.match_date).then(b.id.cmp(&a.id)));

    let matches_played = matches.len() as i32;
    let wins = matches.iter().filter(|m| m.result == MatchResult::Win).count() as i32;
    let draws = matches.iter().filter(|m| m.result == MatchResult::Draw).count() as i32;
    let losses = matches.iter().filter(|m| m.result == MatchResult::Loss).count() as i32;
    let clean_sheets = matches.iter().filter(|m| m.opponent_score == 0).count() as i32;
    let goals_for: i32 = matches.iter().map(|m| m.our_score).sum();
    let goals_against: i32 = matches.iter().map(|m| m.opponent_score).sum();
    let form = form_string(matches.iter().map(|m| m.result));

    let stats = db::match_statistics::Entity::find()
        .filter(
            Condition::all()
                .add(
                    db::match_statistics::Column::MatchId
                        .is_in(matches.iter().map(|m| m.id).collect::<Vec<_>>()),
                )
                .add(db::match_statistics::Column::Side.eq(Side::Own)),
        )
        .all(conn)
        .await?;
    let n = stats.len() as i32;

    let possession: Vec<f64> = stats.iter().filter_map(|s| s.possession_pct).collect();
    let avg_possession = (!possession.is_empty())
        .then(|| possession.iter().sum::<f64>() / possession.len() as f64);
    let simple_avg = |total: i32| (n > 0).then(|| total as f64 / n as f64);
    let avg_shots = simple_avg(stats.iter().map(|s| s.shots).sum());
    let avg_shots_on_target = simple_avg(stats.iter().map(|s| s.shots_on_target).sum());
    let avg_xg = (n > 0).then(|| stats.iter().map(|s| s.xg).sum::<f64>() / n as f64);
    let avg_dribbles_completed = simple_avg(stats.iter().map(|s| s.dribbles_completed).sum());
    let avg_final_third_passes = simple_avg(stats.iter().map(|s| s.final_third_passes).sum());

    // Weighted: re-sum the underlying counts across the season.
    let pass_completion_pct = pct(
        stats.iter().map(|s| s.passes_completed).sum(),
        stats.iter().map(|s| s.passes).sum(),
    );
    let tackle_success_pct = pct(
        stats.iter().map(|s| s.tackles_won).sum(),
        stats.iter().map(|s| s.tackles).sum(),
    );
    let interception_success_pct = pct(
        stats.iter().map(|s| s.interceptions_won).sum(),
        stats.iter().map(|s| s.interceptions).sum(),
    );

    let now = TimeDateTimeWithTimeZone::now_utc();
    let existing_id = db::club_season_statistics::Entity::find()
        .filter(db::club_season_statistics::Column::TeamId.eq(club_id))
        .one(conn)
        .await?
        .map(|e| e.id);
    let row = db::club_season_statistics::ActiveModel {
        id: existing_id
            .map(Set)
            .unwrap_or(sea_orm::ActiveValue::NotSet),
        team_id: Set(club_id),
        matches_played: Set(matches_played),
        wins: Set(wins),
        draws: Set(draws),
        losses: Set(losses),
        clean_sheets: Set(clean_sheets),
        goals_for: Set(goals_for),
        goals_against: Set(goals_against),
        form: Set(form),
        avg_possession: Set(avg_possession),
        avg_shots: Set(avg_shots),
        avg_shots_on_target: Set(avg_shots_on_target),
        avg_xg: Set(avg_xg),
        avg_dribbles_completed: Set(avg_dribbles_completed),
        avg_final_third_passes: Set(avg_final_third_passes),
        pass_completion_pct: Set(pass_completion_pct),
        tackle_success_pct: Set(tackle_success_pct),
        interception_success_pct: Set(interception_success_pct),
        update_time: Set(now),
    };
    if existing_id.is_some() {
        db::club_season_statistics::Entity::update(row)
            .exec(conn)
            .await?;
    } else {
        db::club_season_statistics::Entity::insert(row)
            .exec(conn)
            .await?;
    }
    Ok(())
}

/// Rebuilds one player's season row from all their per-match rows.
/// A player with no match rows keeps no season row.
pub async fn recompute_player<C: ConnectionTrait>(
    conn: &C,
    roster_player_id: i64,
) -> Result<(), IngestError> {
    let rows = db::player_match_statistics::Entity::find()
        .filter(db::player_match_statistics::Column::RosterPlayerId.eq(roster_player_id))
        .all(conn)
        .await?;
    if rows.is_empty() {
        return Ok(());
    }
    let mut c = SeasonCounters {
        matches: rows.len() as i32,
        ..Default::default()
    };
    for r in &rows {
        c.goals += r.goals;
        c.assists += r.assists;
        c.shots += r.shots;
        c.shots_on_target += r.shots_on_target;
        c.xg += r.xg;
        c.passes += r.passes;
        c.passes_completed += r.passes_completed;
        c.final_third_passes += r.final_third_passes;
        c.long_passes += r.long_passes;
        c.crosses += r.crosses;
        c.dribbles_attempted += r.dribbles_attempted;
        c.dribbles_completed += r.dribbles_completed;
        c.tackles += r.tackles;
        c.tackles_won += r.tackles_won;
        c.interceptions += r.interceptions;
        c.recoveries += r.recoveries;
    }
    let r = ratings(&c);

    let now = TimeDateTimeWithTimeZone::now_utc();
    let existing_id = db::player_season_statistics::Entity::find()
        .filter(db::player_season_statistics::Column::RosterPlayerId.eq(roster_player_id))
        .one(conn)
        .await?
        .map(|e| e.id);
    let row = db::player_season_statistics::ActiveModel {
        id: existing_id
            .map(Set)
            .unwrap_or(sea_orm::ActiveValue::NotSet),
        roster_player_id: Set(roster_player_id),
        matches_played: Set(c.matches),
        goals: Set(c.goals),
        assists: Set(c.assists),
        shots: Set(c.shots),
        shots_on_target: Set(c.shots_on_target),
        xg: Set(c.xg),
        passes: Set(c.passes),
        passes_completed: Set(c.passes_completed),
        pass_completion_pct: Set(pct(c.passes_completed, c.passes)),
        final_third_passes: Set(c.final_third_passes),
        long_passes: Set(c.long_passes),
        crosses: Set(c.crosses),
        dribbles_attempted: Set(c.dribbles_attempted),
        dribbles_completed: Set(c.dribbles_completed),
        tackles: Set(c.tackles),
        tackles_won: Set(c.tackles_won),
        interceptions: Set(c.interceptions),
        recoveries: Set(c.recoveries),
        rating_attacking: Set(r.attacking),
        rating_technique: Set(r.technique),
        rating_tactical: Set(r.tactical),
        rating_defending: Set(r.defending),
        rating_creativity: Set(r.creativity),
        update_time: Set(now),
    };
    if existing_id.is_some() {
        db::player_season_statistics::Entity::update(row)
            .exec(conn)
            .await?;
    } else {
        db::player_season_statistics::Entity::insert(row)
            .exec(conn)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_rate_resums_counts() {
        // 10/10 and 0/5 across two matches: 66.7%, not the 50% a
        // simple mean of 100% and 0% would give.
        let weighted = pct(10 + 0, 10 + 5).unwrap();
        assert!((weighted - 66.666_666_666_666_67).abs() < 1e-9);
    }

    #[test]
    fn boost_is_capped_and_maximal_for_one_match() {
        assert_eq!(low_sample_boost(1), 1.5);
        assert_eq!(low_sample_boost(0), 1.5);
        assert!(low_sample_boost(2) < 1.5);
        assert!(low_sample_boost(4) > 1.0);
        assert_eq!(low_sample_boost(5), 1.0);
        assert_eq!(low_sample_boost(40), 1.0);
    }

    #[test]
    fn empty_season_sits_on_the_floor() {
        let c = SeasonCounters {
            matches: 3,
            ..Default::default()
        };
        let r = ratings(&c);
        for v in [r.attacking, r.technique, r.tactical, r.defending, r.creativity] {
            assert_eq!(v, RATING_MIN);
        }
    }

    #[test]
    fn absurd_season_is_clamped_to_the_ceiling() {
        let c = SeasonCounters {
            matches: 2,
            goals: 50,
            assists: 50,
            shots: 100,
            shots_on_target: 90,
            xg: 40.0,
            passes: 1000,
            passes_completed: 1000,
            final_third_passes: 400,
            long_passes: 100,
            crosses: 80,
            dribbles_attempted: 60,
            dribbles_completed: 60,
            tackles: 50,
            tackles_won: 50,
            interceptions: 40,
            recoveries: 60,
        };
        let r = ratings(&c);
        for v in [r.attacking, r.technique, r.tactical, r.defending, r.creativity] {
            assert_eq!(v, RATING_MAX);
        }
    }

    #[test]
    fn single_match_goal_gets_boosted() {
        let one = SeasonCounters {
            matches: 1,
            goals: 1,
            shots: 1,
            shots_on_target: 1,
            xg: 0.5,
            ..Default::default()
        };
        let five = SeasonCounters {
            matches: 5,
            goals: 5,
            shots: 5,
            shots_on_target: 5,
            xg: 2.5,
            ..Default::default()
        };
        // Identical per-match output; the single-match season rates
        // higher purely through the display boost.
        let r1 = ratings(&one);
        let r5 = ratings(&five);
        assert!(r1.attacking > r5.attacking);
        assert!(r1.attacking <= RATING_MAX);
    }

    #[test]
    fn form_keeps_five_most_recent() {
        let results = vec![
            MatchResult::Win,
            MatchResult::Win,
            MatchResult::Draw,
            MatchResult::Loss,
            MatchResult::Win,
            MatchResult::Loss,
            MatchResult::Loss,
        ];
        assert_eq!(form_string(results.into_iter()), "WWDLW");
    }
}
