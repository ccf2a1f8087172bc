use sea_orm::entity::prelude::*;

use super::common::Side;

// Exactly two rows per match, one per side. Percentage and average
// columns are NULL when their denominator was zero.
#[derive(Clone, Debug, DeriveEntityModel)]
#[sea_orm(table_name = "match_statistics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(indexed)]
    pub match_id: i64,
    pub side: Side,
    pub possession_pct: Option<f64>,
    pub shots: i32,
    pub shots_on_target: i32,
    pub shots_off_target: i32,
    pub xg: f64,
    pub goalkeeper_saves: i32,
    pub passes: i32,
    pub passes_completed: i32,
    pub pass_completion_pct: Option<f64>,
    pub pass_length_avg: Option<f64>,
    pub final_third_passes: i32,
    pub long_passes: i32,
    pub crosses: i32,
    pub dribbles_attempted: i32,
    pub dribbles_completed: i32,
    pub tackles: i32,
    pub tackles_won: i32,
    pub tackle_success_pct: Option<f64>,
    pub interceptions: i32,
    pub interceptions_won: i32,
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
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
