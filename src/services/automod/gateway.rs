use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serenity::all::{ChannelId, CreateEmbed, CreateMessage, EditMember, GuildId, MessageId, UserId};
use serenity::http::Http;

use crate::bot::error::Error;

/// Discord side effects used by enforcement, behind a seam so tests can
/// record calls and inject failures
#[async_trait]
pub trait ModerationGateway: Send + Sync {
    async fn delete_message(&self, channel_id: i64, message_id: i64) -> Result<(), Error>;

    async fn timeout_member(
        &self,
        guild_id: i64,
        user_id: i64,
        until: DateTime<Utc>,
        reason: &str,
    ) -> Result<(), Error>;

    async fn dm_user(&self, user_id: i64, embed: CreateEmbed) -> Result<(), Error>;

    async fn send_embed(&self, channel_id: i64, embed: CreateEmbed) -> Result<(), Error>;
}

/// Production gateway backed by the serenity HTTP client
pub struct DiscordGateway {
    http: Arc<Http>,
}

impl DiscordGateway {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ModerationGateway for DiscordGateway {
    async fn delete_message(&self, channel_id: i64, message_id: i64) -> Result<(), Error> {
        ChannelId::new(channel_id as u64)
            .delete_message(&self.http, MessageId::new(message_id as u64))
            .await
            .map_err(Error::Serenity)
    }

    async fn timeout_member(
        &self,
        guild_id: i64,
        user_id: i64,
        until: DateTime<Utc>,
        reason: &str,
    ) -> Result<(), Error> {
        let edit = EditMember::new()
            .disable_communication_until(until.to_rfc3339())
            .audit_log_reason(reason);

        GuildId::new(guild_id as u64)
            .edit_member(&self.http, UserId::new(user_id as u64), edit)
            .await
            .map_err(Error::Serenity)?;

        Ok(())
    }

    async fn dm_user(&self, user_id: i64, embed: CreateEmbed) -> Result<(), Error> {
        let channel = UserId::new(user_id as u64)
            .create_dm_channel(&self.http)
            .await
            .map_err(Error::Serenity)?;

        channel
            .id
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await
            .map_err(Error::Serenity)?;

        Ok(())
    }

    async fn send_embed(&self, channel_id: i64, embed: CreateEmbed) -> Result<(), Error> {
        ChannelId::new(channel_id as u64)
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await
            .map_err(Error::Serenity)?;

        Ok(())
    }
}

/// Recording fake with per-step failure injection
#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct FakeGateway {
        pub deleted: Mutex<Vec<(i64, i64)>>,
        pub timeouts: Mutex<Vec<(i64, i64, String)>>,
        pub dms: Mutex<Vec<i64>>,
        pub mirrored: Mutex<Vec<i64>>,
        pub fail_delete: bool,
        pub fail_timeout: bool,
        pub fail_dm: bool,
        pub fail_send: bool,
    }

    fn injected() -> Error {
        Error::custom("injected failure")
    }

    #[async_trait]
    impl ModerationGateway for FakeGateway {
        async fn delete_message(&self, channel_id: i64, message_id: i64) -> Result<(), Error> {
            if self.fail_delete {
                return Err(injected());
            }
            self.deleted.lock().unwrap().push((channel_id, message_id));
            Ok(())
        }

        async fn timeout_member(
            &self,
            guild_id: i64,
            user_id: i64,
            _until: DateTime<Utc>,
            reason: &str,
        ) -> Result<(), Error> {
            if self.fail_timeout {
                return Err(injected());
            }
            self.timeouts
                .lock()
                .unwrap()
                .push((guild_id, user_id, reason.to_string()));
            Ok(())
        }

        async fn dm_user(&self, user_id: i64, _embed: CreateEmbed) -> Result<(), Error> {
            if self.fail_dm {
                return Err(injected());
            }
            self.dms.lock().unwrap().push(user_id);
            Ok(())
        }

        async fn send_embed(&self, channel_id: i64, _embed: CreateEmbed) -> Result<(), Error> {
            if self.fail_send {
                return Err(injected());
            }
            self.mirrored.lock().unwrap().push(channel_id);
            Ok(())
        }
    }
}
