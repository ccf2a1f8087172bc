use sea_orm::entity::prelude::*;

// One row per own-roster player, recomputed wholesale. The five
// rating columns are display scores in [25, 100].
#[derive(Clone, Debug, DeriveEntityModel)]
#[sea_orm(table_name = "player_season_statistics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique, indexed)]
    pub roster_player_id: i64,
    pub matches_played: i32,
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
    pub rating_attacking: i32,
    pub rating_technique: i32,
    pub rating_tactical: i32,
    pub rating_defending: i32,
    pub rating_creativity: i32,
    pub update_time: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::roster_players::Entity",
        from = "Column::RosterPlayerId",
        to = "super::roster_players::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    RosterPlayers,
}

impl Related<super::roster_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RosterPlayers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
