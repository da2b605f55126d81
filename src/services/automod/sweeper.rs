use std::time::Duration;

use sqlx::SqlitePool;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::constants::automod::{LEDGER_RETENTION_SECONDS, LEDGER_SWEEP_INTERVAL_SECONDS};
use crate::db::queries::recent_messages;

/// Background task that ages out recent-message ledger rows on a fixed
/// interval, independent of message volume
pub fn spawn_retention_sweeper(pool: SqlitePool) {
    info!(
        "Starting ledger retention sweeper (every {}s, retention {}s)",
        LEDGER_SWEEP_INTERVAL_SECONDS, LEDGER_RETENTION_SECONDS
    );

    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(Duration::from_secs(LEDGER_SWEEP_INTERVAL_SECONDS));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            match recent_messages::purge_older_than(&pool, LEDGER_RETENTION_SECONDS).await {
                Ok(0) => {}
                Ok(removed) => debug!("Retention sweep removed {} ledger rows", removed),
                Err(e) => error!("Retention sweep failed: {:?}", e),
            }
        }
    });
}
