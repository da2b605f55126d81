use chrono::Utc;
use sqlx::SqlitePool;

use crate::db::models::AutomodPolicy;

/// Toggleable automod feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomodFeature {
    Spam,
    Caps,
    Links,
    Profanity,
}

impl AutomodFeature {
    fn column(&self) -> &'static str {
        match self {
            AutomodFeature::Spam => "spam_protection",
            AutomodFeature::Caps => "caps_protection",
            AutomodFeature::Links => "link_protection",
            AutomodFeature::Profanity => "profanity_filter",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AutomodFeature::Spam => "Anti-spam",
            AutomodFeature::Caps => "Caps filter",
            AutomodFeature::Links => "Link filter",
            AutomodFeature::Profanity => "Profanity filter",
        }
    }
}

pub async fn get(pool: &SqlitePool, guild_id: i64) -> Result<Option<AutomodPolicy>, sqlx::Error> {
    sqlx::query_as::<_, AutomodPolicy>("SELECT * FROM automod_policies WHERE guild_id = ?")
        .bind(guild_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_or_create(pool: &SqlitePool, guild_id: i64) -> Result<AutomodPolicy, sqlx::Error> {
    if let Some(policy) = get(pool, guild_id).await? {
        return Ok(policy);
    }

    // Defaults come from the table schema
    let now = Utc::now();
    sqlx::query_as::<_, AutomodPolicy>(
        r#"
        INSERT INTO automod_policies (guild_id, created_at, updated_at)
        VALUES (?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(guild_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Flip a single feature flag, returning the updated policy
pub async fn set_feature(
    pool: &SqlitePool,
    guild_id: i64,
    feature: AutomodFeature,
    enabled: bool,
) -> Result<AutomodPolicy, sqlx::Error> {
    get_or_create(pool, guild_id).await?;

    // Column name comes from a closed enum, not user input
    let query = format!(
        "UPDATE automod_policies SET {} = ?, updated_at = ? WHERE guild_id = ? RETURNING *",
        feature.column()
    );

    sqlx::query_as::<_, AutomodPolicy>(&query)
        .bind(enabled)
        .bind(Utc::now())
        .bind(guild_id)
        .fetch_one(pool)
        .await
}

/// Flip every feature flag at once, returning the updated policy
pub async fn set_all_features(
    pool: &SqlitePool,
    guild_id: i64,
    enabled: bool,
) -> Result<AutomodPolicy, sqlx::Error> {
    get_or_create(pool, guild_id).await?;

    sqlx::query_as::<_, AutomodPolicy>(
        r#"
        UPDATE automod_policies
        SET spam_protection = ?,
            caps_protection = ?,
            link_protection = ?,
            profanity_filter = ?,
            updated_at = ?
        WHERE guild_id = ?
        RETURNING *
        "#,
    )
    .bind(enabled)
    .bind(enabled)
    .bind(enabled)
    .bind(enabled)
    .bind(Utc::now())
    .bind(guild_id)
    .fetch_one(pool)
    .await
}

/// Partial threshold update; unspecified fields are left untouched
pub async fn set_thresholds(
    pool: &SqlitePool,
    guild_id: i64,
    max_mentions: Option<i64>,
    max_duplicates: Option<i64>,
    timeout_duration: Option<i64>,
) -> Result<AutomodPolicy, sqlx::Error> {
    get_or_create(pool, guild_id).await?;

    sqlx::query_as::<_, AutomodPolicy>(
        r#"
        UPDATE automod_policies
        SET max_mentions = COALESCE(?, max_mentions),
            max_duplicates = COALESCE(?, max_duplicates),
            timeout_duration = COALESCE(?, timeout_duration),
            updated_at = ?
        WHERE guild_id = ?
        RETURNING *
        "#,
    )
    .bind(max_mentions)
    .bind(max_duplicates)
    .bind(timeout_duration)
    .bind(Utc::now())
    .bind(guild_id)
    .fetch_one(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_test_pool;

    #[tokio::test]
    async fn defaults_match_provisioning() {
        let pool = create_test_pool().await;
        let policy = get_or_create(&pool, 1).await.unwrap();

        assert!(policy.spam_protection);
        assert!(policy.caps_protection);
        assert!(!policy.link_protection);
        assert!(policy.profanity_filter);
        assert_eq!(policy.max_mentions, 5);
        assert_eq!(policy.max_duplicates, 3);
        assert_eq!(policy.timeout_duration, 60);
    }

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let pool = create_test_pool().await;
        let first = get_or_create(&pool, 7).await.unwrap();
        let second = get_or_create(&pool, 7).await.unwrap();
        assert_eq!(first.guild_id, second.guild_id);
        assert_eq!(first.created_at, second.created_at);
    }

    #[tokio::test]
    async fn set_feature_flips_only_that_flag() {
        let pool = create_test_pool().await;
        let policy = set_feature(&pool, 2, AutomodFeature::Links, true)
            .await
            .unwrap();

        assert!(policy.link_protection);
        assert!(policy.spam_protection);
        assert!(policy.profanity_filter);
    }

    #[tokio::test]
    async fn set_thresholds_updates_only_given_fields() {
        let pool = create_test_pool().await;
        let policy = set_thresholds(&pool, 3, Some(8), None, None).await.unwrap();

        assert_eq!(policy.max_mentions, 8);
        assert_eq!(policy.max_duplicates, 3);
        assert_eq!(policy.timeout_duration, 60);
    }

    #[tokio::test]
    async fn missing_guild_reads_as_none() {
        let pool = create_test_pool().await;
        assert!(get(&pool, 999).await.unwrap().is_none());
    }
}
