use sea_orm::entity::prelude::*;

// Append-only. The flat columns are extracted for indexing; `payload`
// keeps the original event verbatim for audit and re-derivation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "match_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(indexed)]
    pub match_id: i64,
    #[sea_orm(indexed)]
    pub kind: String,
    pub team_external_id: Option<i64>,
    #[sea_orm(indexed)]
    pub player_external_id: Option<i64>,
    pub period: Option<i32>,
    pub minute: Option<i32>,
    pub second: Option<i32>,
    pub payload: String,
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
