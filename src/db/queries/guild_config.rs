use chrono::Utc;
use sqlx::SqlitePool;

use crate::db::models::GuildConfig;

pub async fn get(pool: &SqlitePool, guild_id: i64) -> Result<Option<GuildConfig>, sqlx::Error> {
    sqlx::query_as::<_, GuildConfig>("SELECT * FROM guild_configs WHERE guild_id = ?")
        .bind(guild_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_or_create(pool: &SqlitePool, guild_id: i64) -> Result<GuildConfig, sqlx::Error> {
    if let Some(config) = get(pool, guild_id).await? {
        return Ok(config);
    }

    let now = Utc::now();
    sqlx::query_as::<_, GuildConfig>(
        r#"
        INSERT INTO guild_configs (guild_id, created_at, updated_at)
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

pub async fn set_logs_channel(
    pool: &SqlitePool,
    guild_id: i64,
    channel_id: i64,
) -> Result<GuildConfig, sqlx::Error> {
    get_or_create(pool, guild_id).await?;

    sqlx::query_as::<_, GuildConfig>(
        r#"
        UPDATE guild_configs
        SET logs_channel_id = ?, updated_at = ?
        WHERE guild_id = ?
        RETURNING *
        "#,
    )
    .bind(channel_id)
    .bind(Utc::now())
    .bind(guild_id)
    .fetch_one(pool)
    .await
}

pub async fn set_welcome(
    pool: &SqlitePool,
    guild_id: i64,
    channel_id: i64,
    message: Option<String>,
) -> Result<GuildConfig, sqlx::Error> {
    get_or_create(pool, guild_id).await?;

    sqlx::query_as::<_, GuildConfig>(
        r#"
        UPDATE guild_configs
        SET welcome_channel_id = ?,
            welcome_message = COALESCE(?, welcome_message),
            updated_at = ?
        WHERE guild_id = ?
        RETURNING *
        "#,
    )
    .bind(channel_id)
    .bind(message)
    .bind(Utc::now())
    .bind(guild_id)
    .fetch_one(pool)
    .await
}

pub async fn set_leave(
    pool: &SqlitePool,
    guild_id: i64,
    channel_id: i64,
    message: Option<String>,
) -> Result<GuildConfig, sqlx::Error> {
    get_or_create(pool, guild_id).await?;

    sqlx::query_as::<_, GuildConfig>(
        r#"
        UPDATE guild_configs
        SET leave_channel_id = ?,
            leave_message = COALESCE(?, leave_message),
            updated_at = ?
        WHERE guild_id = ?
        RETURNING *
        "#,
    )
    .bind(channel_id)
    .bind(message)
    .bind(Utc::now())
    .bind(guild_id)
    .fetch_one(pool)
    .await
}

/// Logs channel for a guild, if configured. Missing config reads as unset.
pub async fn logs_channel(pool: &SqlitePool, guild_id: i64) -> Result<Option<i64>, sqlx::Error> {
    Ok(get(pool, guild_id).await?.and_then(|c| c.logs_channel_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_test_pool;

    #[tokio::test]
    async fn new_config_has_no_channels() {
        let pool = create_test_pool().await;
        let config = get_or_create(&pool, 1).await.unwrap();

        assert!(config.logs_channel_id.is_none());
        assert!(config.welcome_channel_id.is_none());
        assert!(config.leave_channel_id.is_none());
    }

    #[tokio::test]
    async fn set_logs_channel_roundtrip() {
        let pool = create_test_pool().await;
        let config = set_logs_channel(&pool, 1, 42).await.unwrap();
        assert_eq!(config.logs_channel_id, Some(42));
        assert_eq!(logs_channel(&pool, 1).await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn set_welcome_keeps_message_when_unspecified() {
        let pool = create_test_pool().await;
        set_welcome(&pool, 1, 10, Some("hi {user}".into()))
            .await
            .unwrap();
        let config = set_welcome(&pool, 1, 11, None).await.unwrap();

        assert_eq!(config.welcome_channel_id, Some(11));
        assert_eq!(config.welcome_message.as_deref(), Some("hi {user}"));
    }
}
