use poise::serenity_prelude::{CreateMessage, User};
use tracing::debug;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::commands::moderation::reject_invalid_target;
use crate::constants::embeds;
use crate::services::moderation::log_service;

/// Warn a user for breaking the rules
#[poise::command(
    slash_command,
    required_permissions = "MODERATE_MEMBERS",
    guild_only,
    user_cooldown = 3
)]
pub async fn warn(
    ctx: Context<'_>,
    #[description = "User to warn"] user: User,
    #[description = "Reason for the warning"] reason: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    if reject_invalid_target(ctx, &user).await? {
        return Ok(());
    }

    // Best-effort DM; closed DMs are common
    let dm_embed = embeds::warning_embed()
        .title("Warning")
        .description(format!(
            "You have been warned in **{}**.\n\n**Reason:** {}",
            guild_id
                .name(ctx)
                .unwrap_or_else(|| "this server".to_string()),
            reason
        ));
    if user
        .dm(ctx.serenity_context(), CreateMessage::new().embed(dm_embed))
        .await
        .is_err()
    {
        debug!("Could not DM warned user {}", user.id);
    }

    log_service::record_action(
        ctx.serenity_context(),
        &ctx.data().pool,
        guild_id.get() as i64,
        user.id.get() as i64,
        ctx.author().id.get() as i64,
        "warn",
        Some(&reason),
        0,
    )
    .await?;

    let embed = embeds::success_embed()
        .title("User Warned")
        .description(format!("<@{}> has been warned.\n**Reason:** {}", user.id, reason));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
