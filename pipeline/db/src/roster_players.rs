use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "roster_players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(indexed)]
    pub team_id: i64,
    pub name: String,
    pub number: i32,
    pub position: String,
    // Unique per team when present; enforced by the roster extractor.
    #[sea_orm(indexed)]
    pub external_id: Option<i64>,
    // True once the player has claimed this identity through the
    // onboarding flow. Name and invite token of a linked player are
    // never overwritten by ingestion.
    pub linked: bool,
    #[sea_orm(unique, indexed)]
    pub invite_token: String,
    pub creation_time: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::TeamId",
        to = "super::teams::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Teams,
    #[sea_orm(has_many = "super::player_match_statistics::Entity")]
    PlayerMatchStatistics,
    #[sea_orm(has_many = "super::player_season_statistics::Entity")]
    PlayerSeasonStatistics,
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teams.def()
    }
}

impl Related<super::player_match_statistics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerMatchStatistics.def()
    }
}

impl Related<super::player_season_statistics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerSeasonStatistics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
