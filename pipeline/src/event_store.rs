//! Filters the stream down to the event types statistics need and
//! persists them with their original payloads.

use sea_orm::{ConnectionTrait, EntityTrait, Set};

use pitchside_db as db;

use crate::error::IngestError;
use crate::event::{Event, EventKind};

pub const INSERT_CHUNK_SIZE: usize = 256;

const STORED_KINDS: &[EventKind] = &[
    EventKind::Pass,
    EventKind::Shot,
    EventKind::Dribble,
    EventKind::Duel,
    EventKind::Interception,
    EventKind::Recovery,
];

/// The subset of the stream the statistics stages run on.
pub fn relevant<'a>(events: &'a [Event]) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| e.kind().is_some_and(|k| STORED_KINDS.contains(&k)))
        .collect()
}

#[derive(Debug, Default)]
pub struct StoreOutcome {
    pub stored: usize,
    /// Data-quality gaps, degraded to nulls rather than failing.
    pub missing_player: usize,
    pub missing_duration: usize,
}

/// Persists the filtered events. The flat columns are extracted
/// defensively; the payload keeps the event verbatim. Inserts are
/// chunked but stay inside the surrounding transaction.
pub async fn store_events<C: ConnectionTrait>(
    conn: &C,
    match_id: i64,
    events: &[Event],
) -> Result<StoreOutcome, IngestError> {
    let kept = relevant(events);
    if kept.is_empty() {
        return Err(IngestError::NoRelevantEvents);
    }
    let mut outcome = StoreOutcome {
        stored: kept.len(),
        ..Default::default()
    };
    let mut rows = Vec::with_capacity(kept.len());
    for e in &kept {
        if e.player_id().is_none() {
            outcome.missing_player += 1;
        }
        if e.duration().is_none() {
            outcome.missing_duration += 1;
        }
        rows.push(db::match_events::ActiveModel {
            match_id: Set(match_id),
            kind: Set(e.kind().map(|k| k.as_str()).unwrap_or_default().to_owned()),
            team_external_id: Set(e.team_id()),
            player_external_id: Set(e.player_id()),
            period: Set(e.period()),
            minute: Set(e.minute()),
            second: Set(e.second()),
            payload: Set(e.payload().to_string()),
            ..Default::default()
        });
    }
    for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
        db::match_events::Entity::insert_many(chunk.to_vec())
            .exec(conn)
            .await?;
    }
    log::debug!(
        "Stored {} events for match {match_id} ({} without player, {} without duration)",
        outcome.stored,
        outcome.missing_player,
        outcome.missing_duration
    );
    Ok(outcome)
}
