use pitchside_db::prelude::*;
use sea_orm::EntityTrait;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn idx<E: EntityTrait>(s: &sea_orm::Schema, e: E) -> Vec<IndexCreateStatement> {
    s.create_index_from_entity(e)
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        let s = sea_orm::Schema::new(m.get_database_backend());
        m.create_table(s.create_table_from_entity(Teams)).await?;
        m.create_table(s.create_table_from_entity(RosterPlayers))
            .await?;
        m.create_table(s.create_table_from_entity(OpponentPlayers))
            .await?;
        m.create_table(s.create_table_from_entity(Matches)).await?;
        m.create_table(s.create_table_from_entity(LineupEntries))
            .await?;
        m.create_table(s.create_table_from_entity(MatchEvents))
            .await?;
        m.create_table(s.create_table_from_entity(Goals)).await?;
        m.create_table(s.create_table_from_entity(MatchStatistics))
            .await?;
        m.create_table(s.create_table_from_entity(PlayerMatchStatistics))
            .await?;
        m.create_table(s.create_table_from_entity(ClubSeasonStatistics))
            .await?;
        m.create_table(s.create_table_from_entity(PlayerSeasonStatistics))
            .await?;
        let s = &s;
        let all_idx = [
            idx(s, Teams),
            idx(s, RosterPlayers),
            idx(s, OpponentPlayers),
            idx(s, Matches),
            idx(s, LineupEntries),
            idx(s, MatchEvents),
            idx(s, Goals),
            idx(s, MatchStatistics),
            idx(s, PlayerMatchStatistics),
            idx(s, ClubSeasonStatistics),
            idx(s, PlayerSeasonStatistics),
        ]
        .into_iter()
        .flatten();
        for i in all_idx {
            m.create_index(i).await?;
        }
        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(
            Table::drop()
                .table(PlayerSeasonStatistics)
                .if_exists()
                .to_owned(),
        )
        .await
        .inspect_err(log_err("drop player_season_statistics"))?;
        m.drop_table(
            Table::drop()
                .table(ClubSeasonStatistics)
                .if_exists()
                .to_owned(),
        )
        .await
        .inspect_err(log_err("drop club_season_statistics"))?;
        m.drop_table(
            Table::drop()
                .table(PlayerMatchStatistics)
                .if_exists()
                .to_owned(),
        )
        .await
        .inspect_err(log_err("drop player_match_statistics"))?;
        m.drop_table(Table::drop().table(MatchStatistics).if_exists().to_owned())
            .await
            .inspect_err(log_err("drop match_statistics"))?;
        m.drop_table(Table::drop().table(Goals).if_exists().to_owned())
            .await
            .inspect_err(log_err("drop goals"))?;
        m.drop_table(Table::drop().table(MatchEvents).if_exists().to_owned())
            .await
            .inspect_err(log_err("drop match_events"))?;
        m.drop_table(Table::drop().table(LineupEntries).if_exists().to_owned())
            .await
            .inspect_err(log_err("drop lineup_entries"))?;
        m.drop_table(Table::drop().table(Matches).if_exists().to_owned())
            .await
            .inspect_err(log_err("drop matches"))?;
        m.drop_table(Table::drop().table(OpponentPlayers).if_exists().to_owned())
            .await
            .inspect_err(log_err("drop opponent_players"))?;
        m.drop_table(Table::drop().table(RosterPlayers).if_exists().to_owned())
            .await
            .inspect_err(log_err("drop roster_players"))?;
        m.drop_table(Table::drop().table(Teams).if_exists().to_owned())
            .await
            .inspect_err(log_err("drop teams"))?;
        Ok(())
    }
}

fn log_err<'a>(ctx: &'a str) -> impl FnOnce(&DbErr) + 'a {
    move |e| {
        eprintln!("{ctx}: {e}");
    }
}
