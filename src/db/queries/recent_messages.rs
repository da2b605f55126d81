use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

/// Unconditional append; no dedup at write time
pub async fn record(
    pool: &SqlitePool,
    user_id: i64,
    guild_id: i64,
    content: &str,
    channel_id: i64,
    message_id: i64,
    created_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO recent_messages (user_id, guild_id, content, channel_id, message_id, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(guild_id)
    .bind(content)
    .bind(channel_id)
    .bind(message_id)
    .bind(created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Number of prior records inside the lookback window whose content exactly
/// equals `content`, scanning at most `scan_limit` most-recent rows. The scan
/// cap means interleaved non-matching messages can cause under-counting.
pub async fn count_duplicates(
    pool: &SqlitePool,
    user_id: i64,
    guild_id: i64,
    content: &str,
    lookback_seconds: i64,
    scan_limit: i64,
) -> Result<i64, sqlx::Error> {
    let cutoff = Utc::now() - Duration::seconds(lookback_seconds);

    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM (
            SELECT content FROM recent_messages
            WHERE user_id = ? AND guild_id = ? AND created_at > ?
            ORDER BY created_at DESC
            LIMIT ?
        )
        WHERE content = ?
        "#,
    )
    .bind(user_id)
    .bind(guild_id)
    .bind(cutoff)
    .bind(scan_limit)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Age-keyed delete; returns the number of rows removed
pub async fn purge_older_than(
    pool: &SqlitePool,
    retention_seconds: i64,
) -> Result<u64, sqlx::Error> {
    let cutoff = Utc::now() - Duration::seconds(retention_seconds);

    let result = sqlx::query("DELETE FROM recent_messages WHERE created_at < ?")
        .bind(cutoff)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
