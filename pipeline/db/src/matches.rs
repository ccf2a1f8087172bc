use sea_orm::entity::prelude::*;

use super::common::MatchResult;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(indexed)]
    pub club_id: i64,
    #[sea_orm(indexed)]
    pub opponent_id: i64,
    #[sea_orm(indexed)]
    pub match_date: TimeDate,
    pub our_score: i32,
    pub opponent_score: i32,
    pub result: MatchResult,
    pub creation_time: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::ClubId",
        to = "super::teams::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Club,
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::OpponentId",
        to = "super::teams::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Opponent,
    #[sea_orm(has_many = "super::lineup_entries::Entity")]
    LineupEntries,
    #[sea_orm(has_many = "super::match_events::Entity")]
    MatchEvents,
    #[sea_orm(has_many = "super::goals::Entity")]
    Goals,
    #[sea_orm(has_many = "super::match_statistics::Entity")]
    MatchStatistics,
    #[sea_orm(has_many = "super::player_match_statistics::Entity")]
    PlayerMatchStatistics,
}

impl Related<super::lineup_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LineupEntries.def()
    }
}

impl Related<super::match_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MatchEvents.def()
    }
}

impl Related<super::goals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Goals.def()
    }
}

impl Related<super::match_statistics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MatchStatistics.def()
    }
}

impl Related<super::player_match_statistics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerMatchStatistics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
