pub mod enforcement;
pub mod gateway;
pub mod pipeline;
pub mod sweeper;

use sqlx::SqlitePool;
use tracing::warn;

use crate::bot::error::Error;
use crate::db::queries::{automod_policy, guild_config};
use crate::services::automod::gateway::ModerationGateway;
use crate::services::automod::pipeline::MessageFacts;

/// Evaluate one inbound message and enforce the first violation, if any.
///
/// Returns whether enforcement ran. A guild without a policy row is treated
/// as having automod disabled; store errors propagate to the caller, which
/// fails open at the dispatch boundary.
pub async fn process_message(
    pool: &SqlitePool,
    gateway: &dyn ModerationGateway,
    bot_id: i64,
    facts: &MessageFacts,
) -> Result<bool, Error> {
    let Some(policy) = automod_policy::get(pool, facts.guild_id).await? else {
        return Ok(false);
    };

    let Some(violation) = pipeline::evaluate(pool, &policy, facts).await? else {
        return Ok(false);
    };

    // A broken logs-channel lookup must not stop enforcement
    let logs_channel = match guild_config::logs_channel(pool, facts.guild_id).await {
        Ok(channel) => channel,
        Err(e) => {
            warn!(
                "Failed to read logs channel for guild {}: {:?}",
                facts.guild_id, e
            );
            None
        }
    };

    enforcement::enforce(gateway, pool, bot_id, facts, &violation, &policy, logs_channel).await;

    Ok(true)
}
