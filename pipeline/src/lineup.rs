//! Persists the starting lineups, 11 rows per side.

use std::collections::HashMap;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use pitchside_db as db;
use pitchside_db::common::Side;

use crate::error::IngestError;
use crate::resolver::SquadAnnouncement;

/// Writes the 22 lineup rows. Name, number and position come from the
/// squad announcement, not the roster table: the announcement is the
/// snapshot of how the player appeared in this match.
pub async fn store_lineups<C: ConnectionTrait>(
    conn: &C,
    match_id: i64,
    own: &SquadAnnouncement,
    own_ids: &HashMap<i64, i64>,
    opponent: &SquadAnnouncement,
    opponent_ids: &HashMap<i64, i64>,
) -> Result<usize, IngestError> {
    let existing = db::lineup_entries::Entity::find()
        .filter(db::lineup_entries::Column::MatchId.eq(match_id))
        .count(conn)
        .await?;
    if existing > 0 {
        return Err(IngestError::LineupAlreadyExists { match_id });
    }

    let mut rows = Vec::with_capacity(own.players.len() + opponent.players.len());
    for p in &own.players {
        let internal = *own_ids
            .get(&p.external_id)
            .ok_or(IngestError::PlayerNotResolved {
                external_id: p.external_id,
            })?;
        rows.push(db::lineup_entries::ActiveModel {
            match_id: Set(match_id),
            side: Set(Side::Own),
            roster_player_id: Set(Some(internal)),
            opponent_player_id: Set(None),
            name: Set(p.name.clone()),
            number: Set(p.number),
            position: Set(p.position.clone()),
            ..Default::default()
        });
    }
    for p in &opponent.players {
        let internal = *opponent_ids
            .get(&p.external_id)
            .ok_or(IngestError::PlayerNotResolved {
                external_id: p.external_id,
            })?;
        rows.push(db::lineup_entries::ActiveModel {
            match_id: Set(match_id),
            side: Set(Side::Opponent),
            roster_player_id: Set(None),
            opponent_player_id: Set(Some(internal)),
            name: Set(p.name.clone()),
            number: Set(p.number),
            position: Set(p.position.clone()),
            ..Default::default()
        });
    }
    let count = rows.len();
    db::lineup_entries::Entity::insert_many(rows).exec(conn).await?;
    Ok(count)
}
