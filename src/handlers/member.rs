use std::sync::Arc;

use serenity::all::{ChannelId, Context, CreateMessage, GuildId, Member, User};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::db::queries::guild_config;
use crate::utils::formatting::render_member_template;

pub const DEFAULT_WELCOME_MESSAGE: &str =
    "Welcome to **{server}**, {user}! We're glad to have you here.";
pub const DEFAULT_LEAVE_MESSAGE: &str = "{user} has left **{server}**.";

pub async fn handle_member_join(
    ctx: &Context,
    data: &Arc<Data>,
    member: &Member,
) -> Result<(), Error> {
    let guild_id = member.guild_id.get() as i64;
    let Some(config) = guild_config::get(&data.pool, guild_id).await? else {
        return Ok(());
    };
    let Some(channel_id) = config.welcome_channel_id else {
        return Ok(());
    };

    let guild_name = guild_name(ctx, member.guild_id);
    let template = config
        .welcome_message
        .as_deref()
        .unwrap_or(DEFAULT_WELCOME_MESSAGE);
    let text = render_member_template(template, member.user.id.get() as i64, &guild_name);

    let embed = embeds::success_embed().description(text);
    ChannelId::new(channel_id as u64)
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await?;

    Ok(())
}

pub async fn handle_member_leave(
    ctx: &Context,
    data: &Arc<Data>,
    guild: GuildId,
    user: &User,
) -> Result<(), Error> {
    let guild_id = guild.get() as i64;
    let Some(config) = guild_config::get(&data.pool, guild_id).await? else {
        return Ok(());
    };
    let Some(channel_id) = config.leave_channel_id else {
        return Ok(());
    };

    let guild_name = guild_name(ctx, guild);
    let template = config
        .leave_message
        .as_deref()
        .unwrap_or(DEFAULT_LEAVE_MESSAGE);
    let text = render_member_template(template, user.id.get() as i64, &guild_name);

    let embed = embeds::info_embed().description(text);
    ChannelId::new(channel_id as u64)
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await?;

    Ok(())
}

fn guild_name(ctx: &Context, guild_id: GuildId) -> String {
    guild_id
        .name(ctx)
        .unwrap_or_else(|| "this server".to_string())
}
