//! Timestamps embedded in tweet ids.

use chrono::{DateTime, TimeZone, Utc};

/// Milliseconds between the Unix epoch and the snowflake epoch (2010-11-04).
const SNOWFLAKE_EPOCH_MS: i64 = 1_288_834_974_657;

/// Bits below the timestamp (worker id and sequence).
const TIMESTAMP_SHIFT: u32 = 22;

/// Sequential pre-snowflake ids stayed far below this.
const MIN_SNOWFLAKE_ID: u64 = 1 << 40;

/// Layout of the `created_at` field.
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Creation time encoded in a snowflake id.
///
/// Returns `None` for ids issued before snowflakes were introduced.
pub fn snowflake_time(id: u64) -> Option<DateTime<Utc>> {
    if id < MIN_SNOWFLAKE_ID {
        return None;
    }

    let millis = (id >> TIMESTAMP_SHIFT) as i64 + SNOWFLAKE_EPOCH_MS;
    Utc.timestamp_millis_opt(millis).single()
}

/// Creation time of a tweet: from its id, else from `created_at`.
pub fn tweet_time(id: u64, created_at: Option<&str>) -> Option<DateTime<Utc>> {
    snowflake_time(id).or_else(|| {
        let raw = created_at?;
        DateTime::parse_from_str(raw, CREATED_AT_FORMAT)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    })
}
