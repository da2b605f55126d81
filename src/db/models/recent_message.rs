use chrono::{DateTime, Utc};

/// Rolling ledger row used only for duplicate-message detection.
/// Purged on age by the retention sweeper, never by the pipeline.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecentMessage {
    pub user_id: i64,
    pub guild_id: i64,
    pub content: String,
    pub channel_id: i64,
    pub message_id: i64,
    pub created_at: DateTime<Utc>,
}
