use chrono::{DateTime, Utc};

/// Per-guild automod toggles and thresholds
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AutomodPolicy {
    pub guild_id: i64,
    pub spam_protection: bool,
    pub caps_protection: bool,
    pub link_protection: bool,
    pub profanity_filter: bool,
    pub max_mentions: i64,
    pub max_duplicates: i64,
    /// Timeout applied on violation, in seconds; 0 disables the timeout step
    pub timeout_duration: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AutomodPolicy {
    /// True when every check is switched off
    pub fn is_inert(&self) -> bool {
        !self.spam_protection
            && !self.caps_protection
            && !self.link_protection
            && !self.profanity_filter
            && self.max_mentions <= 0
    }
}
