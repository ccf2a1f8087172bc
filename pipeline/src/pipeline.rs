//! Runs the eleven ingestion stages for one match inside a single
//! database transaction. A failure at any stage rolls everything
//! back; nothing of the match survives a partial run.

use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

use pitchside_db as db;

use crate::error::IngestError;
use crate::event::MatchSubmission;
use crate::{event_store, goal_extractor, lineup, match_stats, opponents, player_stats, recorder,
    resolver, roster, season};

/// The per-ingestion summary handed back to the caller.
#[derive(Debug)]
pub struct IngestReport {
    pub match_id: i64,
    pub events_stored: usize,
    pub goals_extracted: usize,
    pub own_players_created: usize,
    pub own_players_updated: usize,
    pub opponent_players_created: usize,
    pub opponent_players_updated: usize,
    pub lineup_rows: usize,
    pub warnings: Vec<String>,
}

/// Get-or-create the owning club's team row by display name. Called
/// once at startup, before any ingestion.
pub async fn ensure_club(
    db: &DatabaseConnection,
    name: &str,
    logo_url: Option<&str>,
) -> Result<db::teams::Model, IngestError> {
    if let Some(existing) = db::teams::Entity::find()
        .filter(db::teams::Column::Name.eq(name))
        .one(db)
        .await?
    {
        return Ok(existing);
    }
    let row = db::teams::ActiveModel {
        name: Set(name.to_owned()),
        external_id: Set(None),
        logo_url: Set(logo_url.map(str::to_owned)),
        creation_time: Set(sea_orm::prelude::TimeDateTimeWithTimeZone::now_utc()),
        ..Default::default()
    };
    let id = db::teams::Entity::insert(row).exec(db).await?.last_insert_id;
    log::info!("Created club team row {id} for {name:?}");
    db::teams::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| IngestError::Db(sea_orm::DbErr::RecordNotFound(format!("team {id}"))))
}

pub async fn ingest_match(
    db: &DatabaseConnection,
    club_id: i64,
    submission: MatchSubmission,
) -> Result<IngestReport, IngestError> {
    let events = submission.events();
    let opponent_name = submission.opponent.clone();
    let date = submission.date;
    let our_score = submission.our_score as i32;
    let opponent_score = submission.opponent_score as i32;

    let report = db
        .transaction::<_, IngestReport, IngestError>(move |txn| {
            Box::pin(async move {
                run_stages(
                    txn,
                    club_id,
                    &opponent_name,
                    date,
                    our_score,
                    opponent_score,
                    &events,
                )
                .await
            })
        })
        .await
        .map_err(IngestError::from)?;
    log::info!(
        "Ingested match {}: {} events, {} goals, lineup rows {}",
        report.match_id,
        report.events_stored,
        report.goals_extracted,
        report.lineup_rows
    );
    Ok(report)
}

async fn run_stages<C: ConnectionTrait>(
    txn: &C,
    club_id: i64,
    opponent_name: &str,
    date: time::Date,
    our_score: i32,
    opponent_score: i32,
    events: &[crate::event::Event],
) -> Result<IngestReport, IngestError> {
    let club = db::teams::Entity::find_by_id(club_id)
        .one(txn)
        .await?
        .ok_or_else(|| {
            IngestError::Db(sea_orm::DbErr::RecordNotFound(format!("team {club_id}")))
        })?;

    // 1. Resolve which announced side is us.
    let squads = resolver::collect_squads(events)?;
    let resolution = resolver::resolve(club.external_id, &club.name, squads)?;
    if resolution.persist_external_id {
        let update = db::teams::ActiveModel {
            id: Set(club.id),
            external_id: Set(Some(resolution.own.team_external_id)),
            ..Default::default()
        };
        db::teams::Entity::update(update).exec(txn).await?;
        log::info!(
            "Stored external id {} for club {:?}",
            resolution.own.team_external_id,
            club.name
        );
    }
    let own_ext = resolution.own.team_external_id;
    let opp_ext = resolution.opponent.team_external_id;

    // 2. Opponent team row.
    let opponent = opponents::get_or_create(txn, opp_ext, opponent_name, None).await?;

    // 3. Score reconciliation and the match row itself.
    let match_id = recorder::record_match(
        txn,
        &recorder::MatchInput {
            club_id: club.id,
            opponent_id: opponent.id,
            opponent_name,
            date,
            our_score,
            opponent_score,
            own_external_id: own_ext,
            opponent_external_id: opp_ext,
        },
        events,
    )
    .await?;

    // 4. Both rosters.
    let own_roster = roster::upsert_own_roster(txn, club.id, &resolution.own.players).await?;
    let opponent_roster =
        roster::upsert_opponent_roster(txn, opponent.id, &resolution.opponent.players).await?;

    // 5. Starting lineups.
    let lineup_rows = lineup::store_lineups(
        txn,
        match_id,
        &resolution.own,
        &own_roster.id_map,
        &resolution.opponent,
        &opponent_roster.id_map,
    )
    .await?;

    // 6. Event log.
    let stored = event_store::store_events(txn, match_id, events).await?;

    // 7. Goals.
    let goals_extracted = goal_extractor::store_goals(txn, match_id, events, own_ext, opp_ext).await?;

    // 8-9. Match and player statistics.
    match_stats::store_match_statistics(txn, match_id, events, own_ext, opp_ext).await?;
    player_stats::store_player_statistics(
        txn,
        match_id,
        events,
        &resolution.own,
        &own_roster.id_map,
    )
    .await?;

    // 10-11. Season aggregates, recomputed wholesale.
    season::recompute_club(txn, club.id).await?;
    for p in &resolution.own.players {
        if let Some(&roster_player_id) = own_roster.id_map.get(&p.external_id) {
            season::recompute_player(txn, roster_player_id).await?;
        }
    }

    let mut warnings = Vec::new();
    if stored.missing_player > 0 {
        warnings.push(format!(
            "{} stored events carry no attributed player",
            stored.missing_player
        ));
    }
    if stored.missing_duration > 0 {
        warnings.push(format!(
            "{} stored events carry no duration and are invisible to possession",
            stored.missing_duration
        ));
    }

    Ok(IngestReport {
        match_id,
        events_stored: stored.stored,
        goals_extracted,
        own_players_created: own_roster.created,
        own_players_updated: own_roster.updated,
        opponent_players_created: opponent_roster.created,
        opponent_players_updated: opponent_roster.updated,
        lineup_rows,
        warnings,
    })
}
