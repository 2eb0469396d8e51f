//! Posting cadence: average days between consecutive posts.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::types::PostSample;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Epoch values below this are treated as seconds, above as milliseconds.
const EPOCH_SECONDS_CUTOFF: i64 = 100_000_000_000;

/// Parse a post timestamp into epoch milliseconds.
///
/// Accepts RFC 3339, naive ISO-8601 date-times (taken as UTC), bare dates,
/// and integer epoch seconds or milliseconds. Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc().timestamp_millis());
    }

    if let Ok(epoch) = raw.parse::<i64>() {
        if epoch <= 0 {
            return None;
        }
        let millis = if epoch < EPOCH_SECONDS_CUTOFF {
            epoch.checked_mul(1_000)?
        } else {
            epoch
        };
        return DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.timestamp_millis());
    }

    None
}

/// Average number of days between posts, rounded to the nearest day.
///
/// Timestamps that fail to parse are skipped. Input order does not matter.
/// Fewer than two valid timestamps yields `0`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn average_upload_interval_days(posts: &[PostSample]) -> u64 {
    let mut epochs: Vec<i64> = posts
        .iter()
        .filter_map(|p| parse_timestamp_millis(&p.timestamp))
        .collect();

    if epochs.len() < 2 {
        return 0;
    }

    epochs.sort_unstable_by(|a, b| b.cmp(a));

    let newest = epochs[0];
    let oldest = epochs[epochs.len() - 1];
    let total_days = (newest - oldest) as f64 / MILLIS_PER_DAY;
    let gaps = (epochs.len() - 1) as f64;

    (total_days / gaps).round() as u64
}
