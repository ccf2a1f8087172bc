//! Upserts the 11 announced players of one side into the roster.
//!
//! Matching is by external player id first, then by name or squad
//! number for rows that predate the id (hand-entered rosters), and
//! only then does a new unlinked row get created. The decision itself
//! is a pure function over an in-memory snapshot so the linkage
//! heuristic stays testable without a database.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sea_orm::prelude::TimeDateTimeWithTimeZone;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect, Set};

use pitchside_db as db;

use crate::error::IngestError;
use crate::event::SquadPlayer;

/// Roster snapshot row the linkage decision runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownPlayer {
    pub id: i64,
    pub external_id: Option<i64>,
    pub name: String,
    pub number: i32,
    pub position: String,
    pub linked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterDecision {
    /// Found by (team, external id).
    Matched { index: usize },
    /// Found by name or number on a row without an external id; the
    /// id gets attached.
    Claimed { index: usize },
    Created,
}

/// The pure linkage decision. Fallback matching never touches rows
/// that already carry a different external id.
pub fn decide(known: &[KnownPlayer], incoming: &SquadPlayer) -> RosterDecision {
    if let Some(index) = known
        .iter()
        .position(|k| k.external_id == Some(incoming.external_id))
    {
        return RosterDecision::Matched { index };
    }
    if let Some(index) = known
        .iter()
        .position(|k| k.external_id.is_none() && (k.name == incoming.name || k.number == incoming.number))
    {
        return RosterDecision::Claimed { index };
    }
    RosterDecision::Created
}

pub fn token_prefix(name: &str) -> String {
    let prefix: String = name
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(4)
        .collect::<String>()
        .to_lowercase();
    if prefix.is_empty() {
        "plyr".to_owned()
    } else {
        prefix
    }
}

/// Invitation token: alphabetic prefix from the name plus 4 random
/// digits, re-rolled until it collides with nothing already issued.
pub fn generate_token<R: Rng>(rng: &mut R, name: &str, taken: &HashSet<String>) -> String {
    let prefix = token_prefix(name);
    for _ in 0..1000 {
        let token = format!("{prefix}{:04}", rng.gen_range(0..10_000u32));
        if !taken.contains(&token) {
            return token;
        }
    }
    // The 4-digit space for this prefix is exhausted; widen it.
    loop {
        let token = format!("{prefix}{:08}", rng.gen_range(0..100_000_000u32));
        if !taken.contains(&token) {
            return token;
        }
    }
}

#[derive(Debug, Default)]
pub struct RosterOutcome {
    pub created: usize,
    pub updated: usize,
    /// external player id -> internal row id, for every announced
    /// player. Every later stage resolves players through this map.
    pub id_map: HashMap<i64, i64>,
}

async fn all_invite_tokens<C: ConnectionTrait>(conn: &C) -> Result<HashSet<String>, IngestError> {
    let mut taken: HashSet<String> = db::roster_players::Entity::find()
        .select_only()
        .column(db::roster_players::Column::InviteToken)
        .into_tuple::<String>()
        .all(conn)
        .await?
        .into_iter()
        .collect();
    taken.extend(
        db::opponent_players::Entity::find()
            .select_only()
            .column(db::opponent_players::Column::InviteToken)
            .into_tuple::<String>()
            .all(conn)
            .await?,
    );
    Ok(taken)
}

pub async fn upsert_own_roster<C: ConnectionTrait>(
    conn: &C,
    team_id: i64,
    squad: &[SquadPlayer],
) -> Result<RosterOutcome, IngestError> {
    let mut known: Vec<KnownPlayer> = db::roster_players::Entity::find()
        .filter(db::roster_players::Column::TeamId.eq(team_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|m| KnownPlayer {
            id: m.id,
            external_id: m.external_id,
            name: m.name,
            number: m.number,
            position: m.position,
            linked: m.linked,
        })
        .collect();
    let mut taken = all_invite_tokens(conn).await?;
    // StdRng, not thread_rng: the rng lives across awaits inside the
    // ingestion transaction, so it has to be Send.
    let mut rng = StdRng::from_entropy();
    let now = TimeDateTimeWithTimeZone::now_utc();
    let mut outcome = RosterOutcome::default();

    for p in squad {
        match decide(&known, p) {
            RosterDecision::Matched { index } => {
                let k = &mut known[index];
                outcome.id_map.insert(p.external_id, k.id);
                if k.linked {
                    // A claimed identity; ingestion never touches it.
                    continue;
                }
                if k.number != p.number || k.position != p.position {
                    let update = db::roster_players::ActiveModel {
                        id: Set(k.id),
                        number: Set(p.number),
                        position: Set(p.position.clone()),
                        ..Default::default()
                    };
                    db::roster_players::Entity::update(update).exec(conn).await?;
                    k.number = p.number;
                    k.position = p.position.clone();
                    outcome.updated += 1;
                }
            }
            RosterDecision::Claimed { index } => {
                let k = &mut known[index];
                let update = db::roster_players::ActiveModel {
                    id: Set(k.id),
                    external_id: Set(Some(p.external_id)),
                    number: Set(p.number),
                    position: Set(p.position.clone()),
                    ..Default::default()
                };
                db::roster_players::Entity::update(update).exec(conn).await?;
                k.external_id = Some(p.external_id);
                k.number = p.number;
                k.position = p.position.clone();
                outcome.id_map.insert(p.external_id, k.id);
                outcome.updated += 1;
            }
            RosterDecision::Created => {
                let token = generate_token(&mut rng, &p.name, &taken);
                taken.insert(token.clone());
                let row = db::roster_players::ActiveModel {
                    team_id: Set(team_id),
                    name: Set(p.name.clone()),
                    number: Set(p.number),
                    position: Set(p.position.clone()),
                    external_id: Set(Some(p.external_id)),
                    linked: Set(false),
                    invite_token: Set(token),
                    creation_time: Set(now),
                    ..Default::default()
                };
                let id = db::roster_players::Entity::insert(row)
                    .exec(conn)
                    .await?
                    .last_insert_id;
                known.push(KnownPlayer {
                    id,
                    external_id: Some(p.external_id),
                    name: p.name.clone(),
                    number: p.number,
                    position: p.position.clone(),
                    linked: false,
                });
                outcome.id_map.insert(p.external_id, id);
                outcome.created += 1;
            }
        }
    }
    log::debug!(
        "Roster upsert for team {team_id}: {} created, {} updated",
        outcome.created,
        outcome.updated
    );
    Ok(outcome)
}

pub async fn upsert_opponent_roster<C: ConnectionTrait>(
    conn: &C,
    team_id: i64,
    squad: &[SquadPlayer],
) -> Result<RosterOutcome, IngestError> {
    let mut known: Vec<KnownPlayer> = db::opponent_players::Entity::find()
        .filter(db::opponent_players::Column::TeamId.eq(team_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|m| KnownPlayer {
            id: m.id,
            external_id: m.external_id,
            name: m.name,
            number: m.number,
            position: m.position,
            linked: m.linked,
        })
        .collect();
    let mut taken = all_invite_tokens(conn).await?;
    let mut rng = StdRng::from_entropy();
    let now = TimeDateTimeWithTimeZone::now_utc();
    let mut outcome = RosterOutcome::default();

    for p in squad {
        match decide(&known, p) {
            RosterDecision::Matched { index } => {
                let k = &mut known[index];
                outcome.id_map.insert(p.external_id, k.id);
                if k.linked {
                    continue;
                }
                if k.number != p.number || k.position != p.position {
                    let update = db::opponent_players::ActiveModel {
                        id: Set(k.id),
                        number: Set(p.number),
                        position: Set(p.position.clone()),
                        ..Default::default()
                    };
                    db::opponent_players::Entity::update(update)
                        .exec(conn)
                        .await?;
                    k.number = p.number;
                    k.position = p.position.clone();
                    outcome.updated += 1;
                }
            }
            RosterDecision::Claimed { index } => {
                let k = &mut known[index];
                let update = db::opponent_players::ActiveModel {
                    id: Set(k.id),
                    external_id: Set(Some(p.external_id)),
                    number: Set(p.number),
                    position: Set(p.position.clone()),
                    ..Default::default()
                };
                db::opponent_players::Entity::update(update)
                    .exec(conn)
                    .await?;
                k.external_id = Some(p.external_id);
                k.number = p.number;
                k.position = p.position.clone();
                outcome.id_map.insert(p.external_id, k.id);
                outcome.updated += 1;
            }
            RosterDecision::Created => {
                let token = generate_token(&mut rng, &p.name, &taken);
                taken.insert(token.clone());
                let row = db::opponent_players::ActiveModel {
                    team_id: Set(team_id),
                    name: Set(p.name.clone()),
                    number: Set(p.number),
                    position: Set(p.position.clone()),
                    external_id: Set(Some(p.external_id)),
                    linked: Set(false),
                    invite_token: Set(token),
                    creation_time: Set(now),
                    ..Default::default()
                };
                let id = db::opponent_players::Entity::insert(row)
                    .exec(conn)
                    .await?
                    .last_insert_id;
                known.push(KnownPlayer {
                    id,
                    external_id: Some(p.external_id),
                    name: p.name.clone(),
                    number: p.number,
                    position: p.position.clone(),
                    linked: false,
                });
                outcome.id_map.insert(p.external_id, id);
                outcome.created += 1;
            }
        }
    }
    Ok(outcome)
}
