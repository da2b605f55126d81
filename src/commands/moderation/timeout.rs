use chrono::{Duration, Utc};
use poise::serenity_prelude::{EditMember, User};

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::commands::moderation::reject_invalid_target;
use crate::constants::embeds;
use crate::services::moderation::log_service;

/// Time a user out
#[poise::command(
    slash_command,
    required_permissions = "MODERATE_MEMBERS",
    guild_only,
    user_cooldown = 3
)]
pub async fn timeout(
    ctx: Context<'_>,
    #[description = "User to time out"] user: User,
    #[description = "Duration in minutes"]
    #[min = 1]
    #[max = 40320]
    minutes: u32,
    #[description = "Reason for the timeout"] reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    if reject_invalid_target(ctx, &user).await? {
        return Ok(());
    }

    let reason = reason.unwrap_or_else(|| "No reason provided".to_string());
    let duration_seconds = i64::from(minutes) * 60;
    let until = Utc::now() + Duration::seconds(duration_seconds);

    let edit = EditMember::new()
        .disable_communication_until(until.to_rfc3339())
        .audit_log_reason(&reason);

    guild_id
        .edit_member(ctx.serenity_context(), user.id, edit)
        .await
        .map_err(Error::Serenity)?;

    log_service::record_action(
        ctx.serenity_context(),
        &ctx.data().pool,
        guild_id.get() as i64,
        user.id.get() as i64,
        ctx.author().id.get() as i64,
        "timeout",
        Some(&reason),
        duration_seconds,
    )
    .await?;

    let embed = embeds::success_embed()
        .title("User Timed Out")
        .description(format!(
            "<@{}> has been timed out for {} minute{}.\n**Reason:** {}",
            user.id,
            minutes,
            if minutes == 1 { "" } else { "s" },
            reason
        ));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
