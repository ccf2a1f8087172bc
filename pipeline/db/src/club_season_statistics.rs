use sea_orm::entity::prelude::*;

// One row per club, recomputed wholesale after every ingestion.
// Completion/success percentages are weighted by the underlying
// attempt counts, not averaged across matches.
#[derive(Clone, Debug, DeriveEntityModel)]
#[sea_orm(table_name = "club_season_statistics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique, indexed)]
    pub team_id: i64,
    pub matches_played: i32,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub clean_sheets: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    // Most recent 5 results, most recent first, e.g. "WDLWW".
    pub form: String,
    pub avg_possession: Option<f64>,
    pub avg_shots: Option<f64>,
    pub avg_shots_on_target: Option<f64>,
    pub avg_xg: Option<f64>,
    pub avg_dribbles_completed: Option<f64>,
    pub avg_final_third_passes: Option<f64>,
    pub pass_completion_pct: Option<f64>,
    pub tackle_success_pct: Option<f64>,
    pub interception_success_pct: Option<f64>,
    pub update_time: TimeDateTimeWithTimeZone,
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
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teams.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
