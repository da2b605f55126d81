use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GuildConfig {
    pub guild_id: i64,
    pub logs_channel_id: Option<i64>,
    pub welcome_channel_id: Option<i64>,
    pub welcome_message: Option<String>,
    pub leave_channel_id: Option<i64>,
    pub leave_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
