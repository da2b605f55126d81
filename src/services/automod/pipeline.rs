use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::bot::error::Error;
use crate::constants::automod::{
    CAPS_MIN_LENGTH, CAPS_THRESHOLD_PERCENT, DUPLICATE_LOOKBACK_SECONDS,
};
use crate::db::models::AutomodPolicy;
use crate::db::queries::recent_messages;
use crate::utils::profanity;

/// Everything the pipeline needs to know about an inbound message,
/// decoupled from the Discord types so checks are testable in isolation
#[derive(Debug, Clone)]
pub struct MessageFacts {
    pub guild_id: i64,
    pub channel_id: i64,
    pub message_id: i64,
    pub author_id: i64,
    pub content: String,
    pub user_mentions: usize,
    pub role_mentions: usize,
    pub author_can_manage_messages: bool,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of the first check that fired; checks are mutually exclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    DuplicateSpam,
    ExcessiveCaps,
    UnauthorizedLink,
    MentionFlood { count: usize },
    Profanity,
}

impl Violation {
    pub fn kind(&self) -> &'static str {
        match self {
            Violation::DuplicateSpam => "Spam Detection",
            Violation::ExcessiveCaps => "Excessive Caps",
            Violation::UnauthorizedLink => "Link Detection",
            Violation::MentionFlood { .. } => "Mention Spam",
            Violation::Profanity => "Profanity Filter",
        }
    }

    pub fn detail(&self) -> String {
        match self {
            Violation::DuplicateSpam => "Sending duplicate messages".to_string(),
            Violation::ExcessiveCaps => "Message contains too many capital letters".to_string(),
            Violation::UnauthorizedLink => "Unauthorized link posting".to_string(),
            Violation::MentionFlood { count } => format!("Too many mentions ({})", count),
            Violation::Profanity => "Message contains inappropriate language".to_string(),
        }
    }
}

/// Run the ordered checks for one message and stop at the first violation.
///
/// Order is part of the contract: spam, caps, links, mentions, profanity.
/// A clean message's only side effect is its ledger append in the spam step.
pub async fn evaluate(
    pool: &SqlitePool,
    policy: &AutomodPolicy,
    facts: &MessageFacts,
) -> Result<Option<Violation>, Error> {
    if policy.spam_protection {
        let prior = recent_messages::count_duplicates(
            pool,
            facts.author_id,
            facts.guild_id,
            &facts.content,
            DUPLICATE_LOOKBACK_SECONDS,
            policy.max_duplicates,
        )
        .await?;

        // The current message counts toward the duplicate total
        if prior + 1 >= policy.max_duplicates {
            return Ok(Some(Violation::DuplicateSpam));
        }

        recent_messages::record(
            pool,
            facts.author_id,
            facts.guild_id,
            &facts.content,
            facts.channel_id,
            facts.message_id,
            facts.timestamp,
        )
        .await?;
    }

    Ok(static_violation(policy, facts))
}

/// Checks 2-5, which need no store access
pub fn static_violation(policy: &AutomodPolicy, facts: &MessageFacts) -> Option<Violation> {
    if policy.caps_protection && has_excessive_caps(&facts.content) {
        return Some(Violation::ExcessiveCaps);
    }

    if policy.link_protection
        && contains_link(&facts.content)
        && !facts.author_can_manage_messages
    {
        return Some(Violation::UnauthorizedLink);
    }

    if policy.max_mentions > 0 {
        let total = facts.user_mentions + facts.role_mentions;
        if total as i64 > policy.max_mentions {
            return Some(Violation::MentionFlood { count: total });
        }
    }

    if policy.profanity_filter && profanity::find_profanity(&facts.content).is_some() {
        return Some(Violation::Profanity);
    }

    None
}

/// Uppercase ratio check; short messages are too noisy to judge
fn has_excessive_caps(content: &str) -> bool {
    let total = content.chars().count();
    if total < CAPS_MIN_LENGTH {
        return false;
    }

    let caps = content.chars().filter(|c| c.is_ascii_uppercase()).count();
    caps * 100 >= total * CAPS_THRESHOLD_PERCENT
}

fn contains_link(content: &str) -> bool {
    let lowered = content.to_lowercase();
    lowered.contains("http://") || lowered.contains("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_test_pool;
    use crate::db::queries::automod_policy;

    fn facts(content: &str) -> MessageFacts {
        MessageFacts {
            guild_id: 1,
            channel_id: 2,
            message_id: 3,
            author_id: 4,
            content: content.to_string(),
            user_mentions: 0,
            role_mentions: 0,
            author_can_manage_messages: false,
            timestamp: Utc::now(),
        }
    }

    fn permissive_policy() -> AutomodPolicy {
        AutomodPolicy {
            guild_id: 1,
            spam_protection: true,
            caps_protection: true,
            link_protection: true,
            profanity_filter: true,
            max_mentions: 5,
            max_duplicates: 3,
            timeout_duration: 60,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn caps_boundary_at_seventy_percent() {
        let policy = permissive_policy();

        // 10 chars, 7 uppercase: exactly 70%, flagged
        assert_eq!(
            static_violation(&policy, &facts("ABCDEFGhij")),
            Some(Violation::ExcessiveCaps)
        );
        // 10 chars, 6 uppercase: 60%, allowed
        assert_eq!(static_violation(&policy, &facts("ABCDEFghij")), None);
        // 9 all-caps chars: below the length floor, never judged
        assert_eq!(static_violation(&policy, &facts("ABCDEFGHI")), None);
    }

    #[test]
    fn links_flag_unprivileged_authors_only() {
        let policy = permissive_policy();

        assert_eq!(
            static_violation(&policy, &facts("join here https://example.com now")),
            Some(Violation::UnauthorizedLink)
        );

        let mut exempt = facts("join here https://example.com now");
        exempt.author_can_manage_messages = true;
        assert_eq!(static_violation(&policy, &exempt), None);
    }

    #[test]
    fn link_detection_is_case_insensitive() {
        let policy = permissive_policy();
        assert_eq!(
            static_violation(&policy, &facts("see HTTP://example.com for details")),
            Some(Violation::UnauthorizedLink)
        );
    }

    #[test]
    fn mention_flood_is_strictly_greater_than_limit() {
        let policy = permissive_policy();

        let mut at_limit = facts("hello friends");
        at_limit.user_mentions = 3;
        at_limit.role_mentions = 2;
        assert_eq!(static_violation(&policy, &at_limit), None);

        let mut over = facts("hello friends");
        over.user_mentions = 4;
        over.role_mentions = 2;
        assert_eq!(
            static_violation(&policy, &over),
            Some(Violation::MentionFlood { count: 6 })
        );
    }

    #[test]
    fn profanity_fires_last() {
        let policy = permissive_policy();
        assert_eq!(
            static_violation(&policy, &facts("you are a fuckhead")),
            Some(Violation::Profanity)
        );
    }

    #[test]
    fn caps_beats_links_mentions_and_profanity() {
        let policy = permissive_policy();

        let mut everything = facts("FUCK HTTPS://EXAMPLE.COM EVERYONE");
        everything.user_mentions = 10;
        assert_eq!(
            static_violation(&policy, &everything),
            Some(Violation::ExcessiveCaps)
        );
    }

    #[test]
    fn links_beat_mentions_and_profanity() {
        let policy = permissive_policy();

        let mut msg = facts("shit, look at https://example.com");
        msg.user_mentions = 10;
        assert_eq!(
            static_violation(&policy, &msg),
            Some(Violation::UnauthorizedLink)
        );
    }

    #[test]
    fn mentions_beat_profanity() {
        let policy = permissive_policy();

        let mut msg = facts("shit happens");
        msg.user_mentions = 10;
        assert_eq!(
            static_violation(&policy, &msg),
            Some(Violation::MentionFlood { count: 10 })
        );
    }

    #[test]
    fn disabled_checks_never_fire() {
        let mut policy = permissive_policy();
        policy.caps_protection = false;
        policy.link_protection = false;
        policy.profanity_filter = false;
        policy.max_mentions = 0;

        let mut msg = facts("FUCK HTTPS://EXAMPLE.COM EVERYONE");
        msg.user_mentions = 20;
        assert_eq!(static_violation(&policy, &msg), None);
    }

    #[tokio::test]
    async fn third_identical_send_is_flagged() {
        let pool = create_test_pool().await;
        let policy = automod_policy::get_or_create(&pool, 1).await.unwrap();

        assert_eq!(evaluate(&pool, &policy, &facts("spam")).await.unwrap(), None);
        assert_eq!(evaluate(&pool, &policy, &facts("spam")).await.unwrap(), None);
        assert_eq!(
            evaluate(&pool, &policy, &facts("spam")).await.unwrap(),
            Some(Violation::DuplicateSpam)
        );
    }

    #[tokio::test]
    async fn two_identical_sends_are_not_flagged() {
        let pool = create_test_pool().await;
        let policy = automod_policy::get_or_create(&pool, 1).await.unwrap();

        assert_eq!(evaluate(&pool, &policy, &facts("hi there")).await.unwrap(), None);
        assert_eq!(evaluate(&pool, &policy, &facts("hi there")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn spam_beats_caps() {
        let pool = create_test_pool().await;
        let policy = automod_policy::get_or_create(&pool, 1).await.unwrap();

        let shouting = facts("AAAA BBBB CCCC");
        evaluate(&pool, &policy, &shouting).await.unwrap();
        evaluate(&pool, &policy, &shouting).await.unwrap();

        // Third copy trips both spam and caps; spam is checked first
        assert_eq!(
            evaluate(&pool, &policy, &shouting).await.unwrap(),
            Some(Violation::DuplicateSpam)
        );
    }

    #[tokio::test]
    async fn flagged_spam_is_not_recorded_again() {
        let pool = create_test_pool().await;
        let mut policy = automod_policy::get_or_create(&pool, 1).await.unwrap();
        policy.max_duplicates = 2;

        evaluate(&pool, &policy, &facts("dupe")).await.unwrap();
        assert_eq!(
            evaluate(&pool, &policy, &facts("dupe")).await.unwrap(),
            Some(Violation::DuplicateSpam)
        );

        let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recent_messages")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn ledger_untouched_when_spam_check_disabled() {
        let pool = create_test_pool().await;
        let mut policy = automod_policy::get_or_create(&pool, 1).await.unwrap();
        policy.spam_protection = false;

        evaluate(&pool, &policy, &facts("hello world")).await.unwrap();

        let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recent_messages")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 0);
    }
}
