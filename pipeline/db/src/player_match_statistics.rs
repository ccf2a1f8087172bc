use sea_orm::entity::prelude::*;

// One row per own-roster player who started the match.
#[derive(Clone, Debug, DeriveEntityModel)]
#[sea_orm(table_name = "player_match_statistics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(indexed)]
    pub match_id: i64,
    #[sea_orm(indexed)]
    pub roster_player_id: i64,
    pub goals: i32,
    pub assists: i32,
    pub shots: i32,
    pub shots_on_target: i32,
    pub xg: f64,
    pub passes: i32,
    pub passes_completed: i32,
    pub pass_completion_pct: Option<f64>,
    pub final_third_passes: i32,
    pub long_passes: i32,
    pub crosses: i32,
    pub dribbles_attempted: i32,
    pub dribbles_completed: i32,
    pub tackles: i32,
    pub tackles_won: i32,
    pub interceptions: i32,
    pub recoveries: i32,
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
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matches.def()
    }
}

impl Related<super::roster_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RosterPlayers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
