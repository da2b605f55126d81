use poise::serenity_prelude::Channel;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::db::queries::guild_config;

/// Configure server channels and messages
#[poise::command(
    slash_command,
    subcommands("logs", "welcome", "leave"),
    required_permissions = "MANAGE_GUILD",
    guild_only
)]
pub async fn config(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use one of the subcommands: `/config logs`, `/config welcome`, `/config leave`")
        .await?;
    Ok(())
}

/// Set the channel that receives moderation and automod logs
#[poise::command(slash_command, guild_only, user_cooldown = 3)]
pub async fn logs(
    ctx: Context<'_>,
    #[description = "Channel for moderation logs"]
    #[channel_types("Text")]
    channel: Channel,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    guild_config::set_logs_channel(
        &ctx.data().pool,
        guild_id.get() as i64,
        channel.id().get() as i64,
    )
    .await?;

    let embed = embeds::success_embed()
        .title("Logs Channel Set")
        .description(format!("Moderation logs will be mirrored to <#{}>", channel.id()));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Set the welcome channel and optionally the message template
#[poise::command(slash_command, guild_only, user_cooldown = 3)]
pub async fn welcome(
    ctx: Context<'_>,
    #[description = "Channel for welcome messages"]
    #[channel_types("Text")]
    channel: Channel,
    #[description = "Template; {user} and {server} are substituted"] message: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    guild_config::set_welcome(
        &ctx.data().pool,
        guild_id.get() as i64,
        channel.id().get() as i64,
        message,
    )
    .await?;

    let embed = embeds::success_embed()
        .title("Welcome Messages Set")
        .description(format!("New members will be greeted in <#{}>", channel.id()));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Set the leave channel and optionally the message template
#[poise::command(slash_command, guild_only, user_cooldown = 3)]
pub async fn leave(
    ctx: Context<'_>,
    #[description = "Channel for leave messages"]
    #[channel_types("Text")]
    channel: Channel,
    #[description = "Template; {user} and {server} are substituted"] message: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    guild_config::set_leave(
        &ctx.data().pool,
        guild_id.get() as i64,
        channel.id().get() as i64,
        message,
    )
    .await?;

    let embed = embeds::success_embed()
        .title("Leave Messages Set")
        .description(format!("Departures will be announced in <#{}>", channel.id()));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
