pub mod ban;
pub mod kick;
pub mod modlogs;
pub mod timeout;
pub mod warn;

use poise::serenity_prelude::User;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;

/// Reject self- and bot-targets with an ephemeral reply.
/// Returns true when the command should stop.
pub(crate) async fn reject_invalid_target(ctx: Context<'_>, user: &User) -> Result<bool, Error> {
    let message = if user.id == ctx.author().id {
        Some("You cannot moderate yourself.")
    } else if user.bot {
        Some("You cannot moderate a bot.")
    } else {
        None
    };

    if let Some(message) = message {
        let embed = embeds::error_embed()
            .title("Invalid Target")
            .description(message);
        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        return Ok(true);
    }

    Ok(false)
}
