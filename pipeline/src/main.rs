use anyhow::{anyhow, Context};

use pitchside_pipeline::config::{self, Config};
use pitchside_pipeline::event::MatchSubmission;
use pitchside_pipeline::pipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_module("sqlx", log::LevelFilter::Error)
        .init();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        return Err(anyhow::Error::msg(
            "usage: pitchside-pipeline <config.toml> <submission.json>",
        ));
    }
    let config_text = tokio::fs::read_to_string(&args[1])
        .await
        .context(format!("Failed to read config file {}", args[1]))?;
    let config: Config = toml::from_str(&config_text).context("Failed to parse config")?;
    config::validate(&config).map_err(|e| anyhow!("Config validation failed: {e}"))?;

    let submission_text = tokio::fs::read_to_string(&args[2])
        .await
        .context(format!("Failed to read submission file {}", args[2]))?;
    let submission: MatchSubmission =
        serde_json::from_str(&submission_text).context("Failed to parse submission")?;

    let db = sea_orm::Database::connect(&config.db_path)
        .await
        .context("Failed to connect to the database")?;
    let club = pipeline::ensure_club(&db, &config.club.name, config.club.logo_url.as_deref())
        .await
        .context("Failed to load the club team row")?;

    let report = pipeline::ingest_match(&db, club.id, submission).await?;
    println!(
        "match {}: stored {} events, {} goals; own roster +{}/~{}, opponent roster +{}/~{}, {} lineup rows",
        report.match_id,
        report.events_stored,
        report.goals_extracted,
        report.own_players_created,
        report.own_players_updated,
        report.opponent_players_created,
        report.opponent_players_updated,
        report.lineup_rows,
    );
    for w in &report.warnings {
        println!("warning: {w}");
    }
    Ok(())
}
