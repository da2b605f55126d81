use std::sync::Arc;

use chrono::Utc;
use serenity::all::{Context, Message};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::services::automod;
use crate::services::automod::gateway::DiscordGateway;
use crate::services::automod::pipeline::MessageFacts;
use crate::utils::permissions;

/// Feed one gateway message through the automod pipeline
pub async fn handle_message(
    ctx: &Context,
    data: &Arc<Data>,
    message: &Message,
) -> Result<(), Error> {
    // Bots and DMs are never evaluated
    if message.author.bot {
        return Ok(());
    }
    let Some(guild_id) = message.guild_id else {
        return Ok(());
    };

    let author_can_manage_messages =
        permissions::can_manage_messages(ctx, guild_id, message.author.id).await;

    let facts = MessageFacts {
        guild_id: guild_id.get() as i64,
        channel_id: message.channel_id.get() as i64,
        message_id: message.id.get() as i64,
        author_id: message.author.id.get() as i64,
        content: message.content.clone(),
        user_mentions: message.mentions.len(),
        role_mentions: message.mention_roles.len(),
        author_can_manage_messages,
        timestamp: Utc::now(),
    };

    let bot_id = ctx.cache.current_user().id.get() as i64;
    let gateway = DiscordGateway::new(ctx.http.clone());

    automod::process_message(&data.pool, &gateway, bot_id, &facts).await?;

    Ok(())
}
