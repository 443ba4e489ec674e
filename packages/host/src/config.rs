use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GamesConfig {
    /// Root directory all installed games live under.
    pub games_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub games: GamesConfig,
    /// Language tag passed to launched games.
    pub language: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("GAMEBOX_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("database.url", "sqlite://gamebox.db?mode=rwc")?
            .set_default("games.games_dir", "./games")?
            .set_default("language", "en")?
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g. GAMEBOX__DATABASE__URL)
            .add_source(Environment::with_prefix("GAMEBOX").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
