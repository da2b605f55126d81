use chrono::Utc;
use sqlx::SqlitePool;

use crate::db::models::ModLogEntry;

pub async fn create(
    pool: &SqlitePool,
    guild_id: i64,
    user_id: i64,
    moderator_id: i64,
    action: &str,
    reason: Option<&str>,
    duration: i64,
) -> Result<ModLogEntry, sqlx::Error> {
    sqlx::query_as::<_, ModLogEntry>(
        r#"
        INSERT INTO mod_logs (guild_id, user_id, moderator_id, action, reason, duration, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(guild_id)
    .bind(user_id)
    .bind(moderator_id)
    .bind(action)
    .bind(reason)
    .bind(duration)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// Most recent entries for a user, newest first
pub async fn recent_for_user(
    pool: &SqlitePool,
    guild_id: i64,
    user_id: i64,
    limit: i64,
) -> Result<Vec<ModLogEntry>, sqlx::Error> {
    sqlx::query_as::<_, ModLogEntry>(
        r#"
        SELECT * FROM mod_logs
        WHERE guild_id = ? AND user_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(guild_id)
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn count_for_user(
    pool: &SqlitePool,
    guild_id: i64,
    user_id: i64,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM mod_logs WHERE guild_id = ? AND user_id = ?")
            .bind(guild_id)
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_test_pool;

    #[tokio::test]
    async fn create_assigns_incrementing_ids() {
        let pool = create_test_pool().await;
        let first = create(&pool, 1, 2, 3, "warn", Some("spamming"), 0)
            .await
            .unwrap();
        let second = create(&pool, 1, 2, 3, "timeout", Some("again"), 300)
            .await
            .unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.action, "warn");
        assert_eq!(second.duration, 300);
    }

    #[tokio::test]
    async fn recent_for_user_is_newest_first_and_scoped() {
        let pool = create_test_pool().await;
        create(&pool, 1, 2, 3, "warn", None, 0).await.unwrap();
        create(&pool, 1, 2, 3, "kick", None, 0).await.unwrap();
        create(&pool, 1, 8, 3, "ban", None, 0).await.unwrap();

        let entries = recent_for_user(&pool, 1, 2, 10).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, "kick");
        assert_eq!(count_for_user(&pool, 1, 2).await.unwrap(), 2);
    }
}
