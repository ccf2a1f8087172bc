use sea_orm::{DeriveActiveEnum, EnumIter};

/// Which side of a match a row belongs to, from the owning club's
/// point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(None)")]
pub enum Side {
    #[sea_orm(string_value = "own")]
    Own,
    #[sea_orm(string_value = "opponent")]
    Opponent,
}

/// Full-time result, computed once from the two final scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(None)")]
pub enum MatchResult {
    #[sea_orm(string_value = "W")]
    Win,
    #[sea_orm(string_value = "D")]
    Draw,
    #[sea_orm(string_value = "L")]
    Loss,
}

impl MatchResult {
    pub fn letter(&self) -> char {
        match self {
            MatchResult::Win => 'W',
            MatchResult::Draw => 'D',
            MatchResult::Loss => 'L',
        }
    }
}
