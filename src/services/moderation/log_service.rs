use serenity::all::{ChannelId, Context, CreateMessage};
use sqlx::SqlitePool;
use tracing::warn;

use crate::bot::error::Error;
use crate::constants::embeds;
use crate::db::models::ModLogEntry;
use crate::db::queries::{guild_config, mod_log};
use crate::utils::formatting::mention_user;

/// Record a manual moderation action and mirror it to the guild's logs
/// channel. The mirror is best-effort; the database row is the source of
/// truth.
#[allow(clippy::too_many_arguments)]
pub async fn record_action(
    ctx: &Context,
    pool: &SqlitePool,
    guild_id: i64,
    user_id: i64,
    moderator_id: i64,
    action: &str,
    reason: Option<&str>,
    duration: i64,
) -> Result<ModLogEntry, Error> {
    let entry = mod_log::create(pool, guild_id, user_id, moderator_id, action, reason, duration)
        .await?;

    match guild_config::logs_channel(pool, guild_id).await {
        Ok(Some(channel_id)) => {
            let embed = embeds::info_embed()
                .title("Moderation Action")
                .field("User", mention_user(user_id), true)
                .field("Moderator", mention_user(moderator_id), true)
                .field("Action", action.to_string(), true)
                .field("Reason", reason.unwrap_or("No reason provided").to_string(), false);

            if let Err(e) = ChannelId::new(channel_id as u64)
                .send_message(&ctx.http, CreateMessage::new().embed(embed))
                .await
            {
                warn!(
                    "Failed to mirror {} action to logs channel {}: {:?}",
                    action, channel_id, e
                );
            }
        }
        Ok(None) => {}
        Err(e) => {
            warn!("Failed to read logs channel for guild {}: {:?}", guild_id, e);
        }
    }

    Ok(entry)
}
