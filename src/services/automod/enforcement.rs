use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use tracing::{debug, error, warn};

use crate::constants::automod::LOG_CONTENT_MAX_CHARS;
use crate::constants::embeds;
use crate::db::models::AutomodPolicy;
use crate::db::queries::mod_log;
use crate::services::automod::gateway::ModerationGateway;
use crate::services::automod::pipeline::{MessageFacts, Violation};
use crate::utils::formatting::{mention_channel, mention_user, truncate};

/// Apply the enforcement sequence for one violation.
///
/// Steps run in a fixed order (delete, timeout, DM, log mirror, mod-log row)
/// and each step tolerates failure in the ones before it. Removing the
/// content comes first; everything after is best-effort.
pub async fn enforce(
    gateway: &dyn ModerationGateway,
    pool: &SqlitePool,
    bot_id: i64,
    facts: &MessageFacts,
    violation: &Violation,
    policy: &AutomodPolicy,
    logs_channel: Option<i64>,
) {
    let kind = violation.kind();
    let detail = violation.detail();

    // 1. Remove the offending message
    if let Err(e) = gateway
        .delete_message(facts.channel_id, facts.message_id)
        .await
    {
        warn!(
            "Failed to delete message {} in guild {}: {:?}",
            facts.message_id, facts.guild_id, e
        );
    }

    // 2. Timeout the author
    if policy.timeout_duration > 0 {
        let until = Utc::now() + Duration::seconds(policy.timeout_duration);
        let reason = format!("Automod: {}", kind);
        if let Err(e) = gateway
            .timeout_member(facts.guild_id, facts.author_id, until, &reason)
            .await
        {
            warn!(
                "Failed to timeout user {} in guild {}: {:?}",
                facts.author_id, facts.guild_id, e
            );
        }
    }

    // 3. Best-effort private warning
    let warning = embeds::warning_embed()
        .title("Automod Warning")
        .description(format!(
            "Your message was removed by automod.\n\n**Reason:** {}\n**Details:** {}",
            kind, detail
        ));
    if gateway.dm_user(facts.author_id, warning).await.is_err() {
        debug!("Could not DM user {} (DMs likely closed)", facts.author_id);
    }

    // 4. Mirror to the guild's logs channel
    if let Some(channel_id) = logs_channel {
        let log = embeds::error_embed()
            .title("Automod Action")
            .field("User", mention_user(facts.author_id), true)
            .field("Channel", mention_channel(facts.channel_id), true)
            .field("Reason", kind, true)
            .field("Details", detail.clone(), false)
            .field(
                "Message Content",
                if facts.content.is_empty() {
                    "No content".to_string()
                } else {
                    truncate(&facts.content, LOG_CONTENT_MAX_CHARS)
                },
                false,
            );
        if let Err(e) = gateway.send_embed(channel_id, log).await {
            warn!(
                "Failed to mirror automod action to channel {}: {:?}",
                channel_id, e
            );
        }
    }

    // 5. Append the moderation-log row, regardless of the steps above
    let reason = format!("{}: {}", kind, detail);
    if let Err(e) = mod_log::create(
        pool,
        facts.guild_id,
        facts.author_id,
        bot_id,
        "automod",
        Some(&reason),
        policy.timeout_duration,
    )
    .await
    {
        error!(
            "Failed to write mod log for guild {}: {:?}",
            facts.guild_id, e
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_test_pool;
    use crate::db::queries::automod_policy;
    use crate::services::automod::gateway::test_support::FakeGateway;

    const BOT_ID: i64 = 999;

    fn facts() -> MessageFacts {
        MessageFacts {
            guild_id: 1,
            channel_id: 2,
            message_id: 3,
            author_id: 4,
            content: "offending content".to_string(),
            user_mentions: 0,
            role_mentions: 0,
            author_can_manage_messages: false,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn runs_every_step_in_order() {
        let pool = create_test_pool().await;
        let policy = automod_policy::get_or_create(&pool, 1).await.unwrap();
        let gateway = FakeGateway::default();

        enforce(
            &gateway,
            &pool,
            BOT_ID,
            &facts(),
            &Violation::DuplicateSpam,
            &policy,
            Some(77),
        )
        .await;

        assert_eq!(*gateway.deleted.lock().unwrap(), vec![(2, 3)]);
        assert_eq!(gateway.timeouts.lock().unwrap().len(), 1);
        assert_eq!(*gateway.dms.lock().unwrap(), vec![4]);
        assert_eq!(*gateway.mirrored.lock().unwrap(), vec![77]);

        let entries = mod_log::recent_for_user(&pool, 1, 4, 10).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "automod");
        assert_eq!(
            entries[0].reason.as_deref(),
            Some("Spam Detection: Sending duplicate messages")
        );
        assert_eq!(entries[0].duration, 60);
        assert_eq!(entries[0].moderator_id, BOT_ID);
    }

    #[tokio::test]
    async fn delete_failure_does_not_block_later_steps() {
        let pool = create_test_pool().await;
        let policy = automod_policy::get_or_create(&pool, 1).await.unwrap();
        let gateway = FakeGateway {
            fail_delete: true,
            ..Default::default()
        };

        enforce(
            &gateway,
            &pool,
            BOT_ID,
            &facts(),
            &Violation::Profanity,
            &policy,
            Some(77),
        )
        .await;

        assert!(gateway.deleted.lock().unwrap().is_empty());
        assert_eq!(gateway.timeouts.lock().unwrap().len(), 1);
        assert_eq!(gateway.dms.lock().unwrap().len(), 1);
        assert_eq!(gateway.mirrored.lock().unwrap().len(), 1);
        assert_eq!(mod_log::count_for_user(&pool, 1, 4).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn every_discord_step_can_fail_and_the_row_still_lands() {
        let pool = create_test_pool().await;
        let policy = automod_policy::get_or_create(&pool, 1).await.unwrap();
        let gateway = FakeGateway {
            fail_delete: true,
            fail_timeout: true,
            fail_dm: true,
            fail_send: true,
            ..Default::default()
        };

        enforce(
            &gateway,
            &pool,
            BOT_ID,
            &facts(),
            &Violation::ExcessiveCaps,
            &policy,
            Some(77),
        )
        .await;

        let entries = mod_log::recent_for_user(&pool, 1, 4, 10).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].reason.as_deref(),
            Some("Excessive Caps: Message contains too many capital letters")
        );
    }

    #[tokio::test]
    async fn zero_timeout_skips_the_timeout_step() {
        let pool = create_test_pool().await;
        let mut policy = automod_policy::get_or_create(&pool, 1).await.unwrap();
        policy.timeout_duration = 0;
        let gateway = FakeGateway::default();

        enforce(
            &gateway,
            &pool,
            BOT_ID,
            &facts(),
            &Violation::UnauthorizedLink,
            &policy,
            None,
        )
        .await;

        assert!(gateway.timeouts.lock().unwrap().is_empty());
        assert!(gateway.mirrored.lock().unwrap().is_empty());

        let entries = mod_log::recent_for_user(&pool, 1, 4, 10).await.unwrap();
        assert_eq!(entries[0].duration, 0);
    }

    #[tokio::test]
    async fn timeout_reason_names_the_violation() {
        let pool = create_test_pool().await;
        let policy = automod_policy::get_or_create(&pool, 1).await.unwrap();
        let gateway = FakeGateway::default();

        enforce(
            &gateway,
            &pool,
            BOT_ID,
            &facts(),
            &Violation::MentionFlood { count: 8 },
            &policy,
            None,
        )
        .await;

        let timeouts = gateway.timeouts.lock().unwrap();
        assert_eq!(timeouts[0].2, "Automod: Mention Spam");
    }
}
