//! Get-or-create for opponent team rows.

use sea_orm::prelude::TimeDateTimeWithTimeZone;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use pitchside_db as db;

use crate::error::IngestError;

/// Finds the opponent by external id first, then by exact name, and
/// creates it otherwise. A repeat call with the same id returns the
/// same row; a changed display name or logo is refreshed in place.
pub async fn get_or_create<C: ConnectionTrait>(
    conn: &C,
    external_id: i64,
    name: &str,
    logo_url: Option<&str>,
) -> Result<db::teams::Model, IngestError> {
    let by_id = db::teams::Entity::find()
        .filter(db::teams::Column::ExternalId.eq(external_id))
        .one(conn)
        .await?;
    let by_name = match &by_id {
        Some(_) => None,
        None => {
            db::teams::Entity::find()
                .filter(db::teams::Column::Name.eq(name))
                .one(conn)
                .await?
        }
    };
    if let Some(existing) = by_id.or(by_name) {
        let name_changed = existing.name != name;
        let logo_changed = logo_url.is_some() && existing.logo_url.as_deref() != logo_url;
        if !name_changed && !logo_changed && existing.external_id.is_some() {
            return Ok(existing);
        }
        let mut update = db::teams::ActiveModel {
            id: Set(existing.id),
            ..Default::default()
        };
        if name_changed {
            update.name = Set(name.to_owned());
        }
        if logo_changed {
            update.logo_url = Set(logo_url.map(str::to_owned));
        }
        if existing.external_id.is_none() {
            update.external_id = Set(Some(external_id));
        }
        let updated = db::teams::Entity::update(update).exec(conn).await?;
        return Ok(updated);
    }
    let row = db::teams::ActiveModel {
        name: Set(name.to_owned()),
        external_id: Set(Some(external_id)),
        logo_url: Set(logo_url.map(str::to_owned)),
        creation_time: Set(TimeDateTimeWithTimeZone::now_utc()),
        ..Default::default()
    };
    let id = db::teams::Entity::insert(row).exec(conn).await?.last_insert_id;
    log::info!("Registered new opponent {name:?} (external id {external_id}) as team {id}");
    let created = db::teams::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| IngestError::Db(sea_orm::DbErr::RecordNotFound(format!("team {id}"))))?;
    Ok(created)
}
