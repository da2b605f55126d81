use poise::serenity_prelude::User;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::db::queries::mod_log;

const HISTORY_LIMIT: i64 = 10;

/// Show a user's recent moderation history
#[poise::command(
    slash_command,
    required_permissions = "MODERATE_MEMBERS",
    guild_only,
    user_cooldown = 3
)]
pub async fn modlogs(
    ctx: Context<'_>,
    #[description = "User to look up"] user: User,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let pool = &ctx.data().pool;
    let gid = guild_id.get() as i64;
    let uid = user.id.get() as i64;

    let total = mod_log::count_for_user(pool, gid, uid).await?;
    let entries = mod_log::recent_for_user(pool, gid, uid, HISTORY_LIMIT).await?;

    if entries.is_empty() {
        let embed = embeds::info_embed()
            .title("Moderation History")
            .description(format!("<@{}> has no moderation history here.", user.id));
        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        return Ok(());
    }

    let mut embed = embeds::info_embed()
        .title("Moderation History")
        .description(format!(
            "<@{}> — {} entr{} total, showing the latest {}",
            user.id,
            total,
            if total == 1 { "y" } else { "ies" },
            entries.len()
        ));

    for entry in &entries {
        let mut value = format!(
            "**Reason:** {}",
            entry.reason.as_deref().unwrap_or("No reason provided")
        );
        if entry.duration > 0 {
            value.push_str(&format!("\n**Duration:** {} seconds", entry.duration));
        }
        value.push_str(&format!("\n**By:** <@{}>", entry.moderator_id));

        embed = embed.field(
            format!(
                "{} — {}",
                entry.action,
                entry.created_at.format("%Y-%m-%d %H:%M UTC")
            ),
            value,
            false,
        );
    }

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
