use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique, indexed)]
    pub name: String,
    // Identifier from the upstream event source. Set once, on the
    // first match it appears in, and never changed afterwards.
    #[sea_orm(unique, indexed)]
    pub external_id: Option<i64>,
    pub logo_url: Option<String>,
    pub creation_time: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::roster_players::Entity")]
    RosterPlayers,
    #[sea_orm(has_many = "super::opponent_players::Entity")]
    OpponentPlayers,
}

impl Related<super::roster_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RosterPlayers.def()
    }
}

impl Related<super::opponent_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OpponentPlayers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
