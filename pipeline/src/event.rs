//! The raw event stream and the classification rules shared by the
//! goal, match-statistics and player-statistics stages.
//!
//! Events arrive as JSON objects from the upstream provider. Field
//! access is defensive throughout: a missing or mistyped sub-field
//! yields `None`, never an error. Only the squad announcements are
//! validated strictly, since everything downstream hangs off them.

use serde::Deserialize;
use serde_json::Value;

/// Penalty shootouts are recorded as a fifth period and are excluded
/// from goal counting and open-play statistics.
pub const SHOOTOUT_PERIOD: i32 = 5;

/// Start of the attacking third on the 0..120 long axis, inclusive.
pub const FINAL_THIRD_START_X: f64 = 80.0;

/// A pass is "long" strictly above this length, in meters.
pub const LONG_PASS_LENGTH: f64 = 30.0;

/// A pass is complete unless its outcome is one of these. Absence of
/// an outcome field means the pass reached its target.
pub const PASS_FAILURE_OUTCOMES: &[&str] =
    &["incomplete", "out", "offside", "pass_offside", "unknown"];

/// Set-piece restarts excluded from completion and length statistics.
pub const SET_PIECE_PASS_KINDS: &[&str] = &["throw_in", "goal_kick", "corner"];

pub const SHOT_ON_TARGET_OUTCOMES: &[&str] = &["goal", "saved", "saved_to_post"];
pub const SHOT_SAVED_OUTCOMES: &[&str] = &["saved", "saved_to_post"];

/// Outcome codes that count a contested action as won. Shared by
/// tackles and interceptions.
pub const DUEL_SUCCESS_OUTCOMES: &[&str] = &["won", "success", "success_in_play", "success_out"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Lineup,
    Pass,
    Shot,
    Dribble,
    Duel,
    Interception,
    Recovery,
}

impl EventKind {
    pub fn from_tag(tag: &str) -> Option<EventKind> {
        match tag {
            "lineup" => Some(EventKind::Lineup),
            "pass" => Some(EventKind::Pass),
            "shot" => Some(EventKind::Shot),
            "dribble" => Some(EventKind::Dribble),
            "duel" => Some(EventKind::Duel),
            "interception" => Some(EventKind::Interception),
            "recovery" => Some(EventKind::Recovery),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Lineup => "lineup",
            EventKind::Pass => "pass",
            EventKind::Shot => "shot",
            EventKind::Dribble => "dribble",
            EventKind::Duel => "duel",
            EventKind::Interception => "interception",
            EventKind::Recovery => "recovery",
        }
    }
}

/// One player as listed in a squad announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquadPlayer {
    pub external_id: i64,
    pub name: String,
    pub number: i32,
    pub position: String,
}

/// A single raw event, kept as JSON with typed accessors.
#[derive(Debug, Clone)]
pub struct Event(Value);

impl Event {
    pub fn new(value: Value) -> Event {
        Event(value)
    }

    pub fn payload(&self) -> &Value {
        &self.0
    }

    fn at(&self, path: &[&str]) -> Option<&Value> {
        let mut v = &self.0;
        for key in path {
            v = v.get(key)?;
        }
        Some(v)
    }

    fn i64_at(&self, path: &[&str]) -> Option<i64> {
        self.at(path)?.as_i64()
    }

    fn f64_at(&self, path: &[&str]) -> Option<f64> {
        self.at(path)?.as_f64()
    }

    fn str_at(&self, path: &[&str]) -> Option<&str> {
        self.at(path)?.as_str()
    }

    fn bool_at(&self, path: &[&str]) -> Option<bool> {
        self.at(path)?.as_bool()
    }

    pub fn kind(&self) -> Option<EventKind> {
        EventKind::from_tag(self.str_at(&["type"])?)
    }

    /// The acting team. This, not `possession_team`, attributes goals
    /// and statistics: the possession reference is unreliable around
    /// kickoffs.
    pub fn team_id(&self) -> Option<i64> {
        self.i64_at(&["team", "id"])
    }

    pub fn team_name(&self) -> Option<&str> {
        self.str_at(&["team", "name"])
    }

    pub fn possession_team_id(&self) -> Option<i64> {
        self.i64_at(&["possession_team", "id"])
    }

    pub fn player_id(&self) -> Option<i64> {
        self.i64_at(&["player", "id"])
    }

    pub fn player_name(&self) -> Option<&str> {
        self.str_at(&["player", "name"])
    }

    pub fn period(&self) -> Option<i32> {
        self.i64_at(&["period"]).map(|p| p as i32)
    }

    pub fn minute(&self) -> Option<i32> {
        self.i64_at(&["minute"]).map(|m| m as i32)
    }

    pub fn second(&self) -> Option<i32> {
        self.i64_at(&["second"]).map(|s| s as i32)
    }

    pub fn duration(&self) -> Option<f64> {
        self.f64_at(&["duration"])
    }

    pub fn is_shootout(&self) -> bool {
        self.period() == Some(SHOOTOUT_PERIOD)
    }

    pub fn shot_outcome(&self) -> Option<&str> {
        self.str_at(&["shot", "outcome"])
    }

    pub fn shot_xg(&self) -> Option<f64> {
        self.f64_at(&["shot", "xg"])
    }

    /// A goal that counts toward the score: a shot with outcome
    /// "goal" outside the shootout period.
    pub fn is_goal(&self) -> bool {
        self.kind() == Some(EventKind::Shot)
            && self.shot_outcome() == Some("goal")
            && !self.is_shootout()
    }

    pub fn is_shot_on_target(&self) -> bool {
        self.shot_outcome()
            .is_some_and(|o| SHOT_ON_TARGET_OUTCOMES.contains(&o))
    }

    pub fn is_saved_shot(&self) -> bool {
        self.shot_outcome()
            .is_some_and(|o| SHOT_SAVED_OUTCOMES.contains(&o))
    }

    pub fn pass_outcome(&self) -> Option<&str> {
        self.str_at(&["pass", "outcome"])
    }

    pub fn pass_length(&self) -> Option<f64> {
        self.f64_at(&["pass", "length"])
    }

    pub fn pass_start_x(&self) -> Option<f64> {
        self.f64_at(&["pass", "start_x"])
    }

    pub fn pass_kind(&self) -> Option<&str> {
        self.str_at(&["pass", "kind"])
    }

    pub fn is_set_piece_pass(&self) -> bool {
        self.pass_kind()
            .is_some_and(|k| SET_PIECE_PASS_KINDS.contains(&k))
    }

    /// Complete unless an explicit failure outcome is present.
    pub fn is_completed_pass(&self) -> bool {
        !self
            .pass_outcome()
            .is_some_and(|o| PASS_FAILURE_OUTCOMES.contains(&o))
    }

    pub fn is_final_third_pass(&self) -> bool {
        self.pass_start_x().is_some_and(|x| x >= FINAL_THIRD_START_X)
    }

    pub fn is_long_pass(&self) -> bool {
        self.pass_length().is_some_and(|l| l > LONG_PASS_LENGTH)
    }

    pub fn is_cross(&self) -> bool {
        self.bool_at(&["pass", "cross"]).unwrap_or(false)
    }

    pub fn is_assist(&self) -> bool {
        self.bool_at(&["pass", "assist"]).unwrap_or(false)
    }

    pub fn is_completed_dribble(&self) -> bool {
        self.str_at(&["dribble", "outcome"]) == Some("complete")
    }

    pub fn duel_kind(&self) -> Option<&str> {
        self.str_at(&["duel", "kind"])
    }

    pub fn is_tackle(&self) -> bool {
        self.kind() == Some(EventKind::Duel) && self.duel_kind() == Some("tackle")
    }

    pub fn is_won_tackle(&self) -> bool {
        self.is_tackle()
            && self
                .str_at(&["duel", "outcome"])
                .is_some_and(|o| DUEL_SUCCESS_OUTCOMES.contains(&o))
    }

    pub fn is_won_interception(&self) -> bool {
        self.str_at(&["interception", "outcome"])
            .is_some_and(|o| DUEL_SUCCESS_OUTCOMES.contains(&o))
    }

    pub fn is_counted_recovery(&self) -> bool {
        self.str_at(&["recovery", "outcome"]) != Some("failure")
    }

    /// The players listed on a squad announcement. Entries without a
    /// numeric id are dropped; the resolver validates the final count.
    pub fn lineup_players(&self) -> Vec<SquadPlayer> {
        let Some(list) = self.at(&["lineup"]).and_then(|v| v.as_array()) else {
            return vec![];
        };
        list.iter()
            .filter_map(|p| {
                let external_id = p.get("id")?.as_i64()?;
                let name = p
                    .get("name")
                    .and_then(|n| n.as_str())
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("Player {external_id}"));
                let number = p.get("number").and_then(|n| n.as_i64()).unwrap_or(0) as i32;
                let position = p
                    .get("position")
                    .and_then(|n| n.as_str())
                    .unwrap_or("")
                    .to_owned();
                Some(SquadPlayer {
                    external_id,
                    name,
                    number,
                    position,
                })
            })
            .collect()
    }
}

/// The coach-supplied upload: metadata plus the raw event stream.
#[derive(Debug, Deserialize)]
pub struct MatchSubmission {
    pub opponent: String,
    pub date: time::Date,
    pub our_score: u32,
    pub opponent_score: u32,
    pub events: Vec<Value>,
}

impl MatchSubmission {
    pub fn events(&self) -> Vec<Event> {
        self.events.iter().cloned().map(Event::new).collect()
    }
}
