use std::env;

/// Database file used when DATABASE_URL is not set
const DEFAULT_DATABASE_URL: &str = "sqlite://warden.db";

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub database_url: String,
    /// When set, commands are registered only in this guild (faster for development)
    pub guild_id: Option<u64>,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| "DISCORD_TOKEN environment variable not set")?;

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let guild_id = env::var("GUILD_ID")
            .ok()
            .and_then(|s| s.parse::<u64>().ok());

        Ok(Self {
            discord_token,
            database_url,
            guild_id,
        })
    }
}
