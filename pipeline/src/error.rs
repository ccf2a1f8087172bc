use sea_orm::DbErr;

/// Fatal ingestion failures. Any of these aborts the whole
/// transaction; nothing from the failed match is persisted.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("team resolution: malformed squad announcement: {0}")]
    MalformedLineup(String),
    #[error("team resolution: could not identify {club_name:?} among the announced teams")]
    TeamNotIdentified { club_name: String },
    #[error(
        "match recording: goals counted from events ({counted_own}-{counted_opponent}) \
         do not match the supplied score ({supplied_own}-{supplied_opponent})"
    )]
    ScoreMismatch {
        counted_own: i32,
        counted_opponent: i32,
        supplied_own: i32,
        supplied_opponent: i32,
    },
    #[error("match recording: a match against {opponent:?} on {date} was already ingested")]
    MatchAlreadyIngested { opponent: String, date: time::Date },
    #[error("lineup building: lineup rows already exist for match {match_id}")]
    LineupAlreadyExists { match_id: i64 },
    #[error("lineup building: announced player {external_id} was not resolved to a roster identity")]
    PlayerNotResolved { external_id: i64 },
    #[error("{stage}: statistics already exist for match {match_id}")]
    StatisticsAlreadyExist { stage: &'static str, match_id: i64 },
    #[error("event store: the stream contains no events usable for statistics")]
    NoRelevantEvents,
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

impl From<sea_orm::TransactionError<IngestError>> for IngestError {
    fn from(e: sea_orm::TransactionError<IngestError>) -> Self {
        match e {
            sea_orm::TransactionError::Connection(e) => IngestError::Db(e),
            sea_orm::TransactionError::Transaction(e) => e,
        }
    }
}
