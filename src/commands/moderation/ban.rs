use poise::serenity_prelude::User;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::commands::moderation::reject_invalid_target;
use crate::constants::embeds;
use crate::services::moderation::log_service;

/// Ban a user from the server
#[poise::command(
    slash_command,
    required_permissions = "BAN_MEMBERS",
    guild_only,
    user_cooldown = 3
)]
pub async fn ban(
    ctx: Context<'_>,
    #[description = "User to ban"] user: User,
    #[description = "Reason for the ban"] reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    if reject_invalid_target(ctx, &user).await? {
        return Ok(());
    }

    let reason = reason.unwrap_or_else(|| "No reason provided".to_string());

    // Keep the banned user's messages; deletion is a separate decision
    guild_id
        .ban_with_reason(ctx.serenity_context(), user.id, 0, &reason)
        .await
        .map_err(Error::Serenity)?;

    log_service::record_action(
        ctx.serenity_context(),
        &ctx.data().pool,
        guild_id.get() as i64,
        user.id.get() as i64,
        ctx.author().id.get() as i64,
        "ban",
        Some(&reason),
        0,
    )
    .await?;

    let embed = embeds::success_embed()
        .title("User Banned")
        .description(format!("<@{}> has been banned.\n**Reason:** {}", user.id, reason));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
