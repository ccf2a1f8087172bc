use sea_orm::entity::prelude::*;

use super::common::Side;

// Name, number and position are denormalized from the squad
// announcement: they record how the player appeared in this match,
// not the roster row's current state.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "lineup_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(indexed)]
    pub match_id: i64,
    pub side: Side,
    // Side-exclusive: exactly one of these is set, matching `side`.
    pub roster_player_id: Option<i64>,
    pub opponent_player_id: Option<i64>,
    pub name: String,
    pub number: i32,
    pub position: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matches::Entity",
        from = "Column::MatchId",
        to = "super::matches::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Matches,
    #[sea_orm(
        belongs_to = "super::roster_players::Entity",
        from = "Column::RosterPlayerId",
        to = "super::roster_players::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    RosterPlayers,
    #[sea_orm(
        belongs_to = "super::opponent_players::Entity",
        from = "Column::OpponentPlayerId",
        to = "super::opponent_players::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    OpponentPlayers,
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
