use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, FullEvent};
use tracing::{error, info};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::db::queries::{automod_policy, guild_config};
use crate::handlers::{member, message};

pub async fn event_handler(
    ctx: &serenity::Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Arc<Data>, Error>,
    data: &Arc<Data>,
) -> Result<(), Error> {
    match event {
        FullEvent::Ready { data_about_bot, .. } => {
            info!("Bot ready as {}", data_about_bot.user.name);
        }

        FullEvent::Message { new_message } => {
            // Automod never propagates past a single message: log and move on
            if let Err(e) = message::handle_message(ctx, data, new_message).await {
                error!(
                    "Automod error for message {} in guild {:?}: {:?}",
                    new_message.id, new_message.guild_id, e
                );
            }
        }

        FullEvent::GuildCreate { guild, .. } => {
            // Fires for every guild at startup and on join; provisioning is
            // idempotent so the policy row exists before the first message
            let guild_id = guild.id.get() as i64;
            if let Err(e) = guild_config::get_or_create(&data.pool, guild_id).await {
                error!("Failed to provision config for guild {}: {:?}", guild_id, e);
            }
            if let Err(e) = automod_policy::get_or_create(&data.pool, guild_id).await {
                error!("Failed to provision policy for guild {}: {:?}", guild_id, e);
            }
        }

        FullEvent::GuildMemberAddition { new_member } => {
            if let Err(e) = member::handle_member_join(ctx, data, new_member).await {
                error!(
                    "Welcome handler error for user {} in guild {}: {:?}",
                    new_member.user.id, new_member.guild_id, e
                );
            }
        }

        FullEvent::GuildMemberRemoval { guild_id, user, .. } => {
            if let Err(e) = member::handle_member_leave(ctx, data, *guild_id, user).await {
                error!(
                    "Leave handler error for user {} in guild {}: {:?}",
                    user.id, guild_id, e
                );
            }
        }

        _ => {}
    }

    Ok(())
}
