use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ClubConfig {
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub db_path: String,
    pub club: ClubConfig,
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    if cfg.db_path.is_empty() {
        return Err("db_path must not be empty".to_owned());
    }
    if cfg.club.name.trim().is_empty() {
        return Err("club.name must not be empty".to_owned());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let cfg: Config = toml::from_str(
            r#"
            db_path = "sqlite://pitchside.sqlite?mode=rwc"
            [club]
            name = "Riverside Falcons"
            "#,
        )
        .unwrap();
        assert!(validate(&cfg).is_ok());
        assert_eq!(cfg.club.logo_url, None);
    }

    #[test]
    fn rejects_blank_club_name() {
        let cfg: Config = toml::from_str(
            r#"
            db_path = "sqlite://x.sqlite"
            [club]
            name = " "
            "#,
        )
        .unwrap();
        assert!(validate(&cfg).is_err());
    }
}
