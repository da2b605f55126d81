/// Sliding window for duplicate-message detection
pub const DUPLICATE_LOOKBACK_SECONDS: i64 = 30;

/// Ledger rows older than this are eligible for deletion
pub const LEDGER_RETENTION_SECONDS: i64 = 3600;

/// How often the retention sweep runs
pub const LEDGER_SWEEP_INTERVAL_SECONDS: u64 = 3600;

/// Messages shorter than this are never judged for excessive caps
pub const CAPS_MIN_LENGTH: usize = 10;

/// Uppercase percentage at or above which a message is flagged
pub const CAPS_THRESHOLD_PERCENT: usize = 70;

/// Original message content is truncated to this many characters in log embeds
pub const LOG_CONTENT_MAX_CHARS: usize = 1000;
