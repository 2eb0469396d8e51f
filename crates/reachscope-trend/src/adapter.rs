//! Boundary conversion from loosely-typed [`RawPost`] records to [`PostSample`].
//!
//! Every field read applies an explicit default so the analyzer never sees
//! a missing or malformed value.

use serde_json::Value;

use crate::cadence::parse_timestamp_millis;
use crate::types::{PostSample, RawPost};

impl From<RawPost> for PostSample {
    fn from(raw: RawPost) -> Self {
        Self {
            likes: count_or_zero(raw.likes.as_ref()),
            comments: count_or_zero(raw.comments.as_ref()),
            timestamp: timestamp_or_empty(raw.timestamp.as_ref()),
        }
    }
}

/// Convert raw records to samples, preserving order.
#[must_use]
pub fn to_samples(raw: Vec<RawPost>) -> Vec<PostSample> {
    raw.into_iter().map(PostSample::from).collect()
}

/// Order samples newest first by parsed timestamp.
///
/// For sources that list posts chronologically. Samples whose timestamp does
/// not parse sort after all dated samples; ties keep their relative order.
pub fn sort_most_recent_first(samples: &mut [PostSample]) {
    samples.sort_by_cached_key(|s| {
        std::cmp::Reverse(parse_timestamp_millis(&s.timestamp).unwrap_or(i64::MIN))
    });
}

/// Read a non-negative integer count, defaulting to `0`.
///
/// Numbers and numeric strings are accepted; fractional values are
/// truncated. Negative, non-finite, boolean, null or non-numeric values
/// become `0`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn count_or_zero(value: Option<&Value>) -> u64 {
    let as_float = match value {
        Some(Value::Number(n)) => {
            if let Some(u) = n.as_u64() {
                return u;
            }
            n.as_f64()
        }
        Some(Value::String(s)) => {
            let s = s.trim();
            if let Ok(u) = s.parse::<u64>() {
                return u;
            }
            s.parse::<f64>().ok()
        }
        _ => None,
    };

    match as_float {
        Some(f) if f.is_finite() && f > 0.0 => {
            if f >= u64::MAX as f64 {
                u64::MAX
            } else {
                f.trunc() as u64
            }
        }
        _ => 0,
    }
}

/// Timestamps may arrive as strings or epoch numbers; anything else is empty.
fn timestamp_or_empty(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_owned(),
        Some(Value::Number(n)) if n.as_i64().is_some() => n.to_string(),
        _ => String::new(),
    }
}
