use chrono::{DateTime, Utc};

/// Append-only moderation history row. `moderator_id` is the bot's own id
/// for automated actions.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ModLogEntry {
    pub id: i64,
    pub guild_id: i64,
    pub user_id: i64,
    pub moderator_id: i64,
    pub action: String,
    pub reason: Option<String>,
    pub duration: i64,
    pub created_at: DateTime<Utc>,
}
