use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One historical post's engagement facts.
///
/// Sequences of samples are ordered most-recent-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSample {
    pub likes: u64,
    pub comments: u64,
    /// ISO-8601 instant; only used for cadence.
    pub timestamp: String,
}

impl PostSample {
    #[must_use]
    pub fn new(likes: u64, comments: u64, timestamp: impl Into<String>) -> Self {
        Self {
            likes,
            comments,
            timestamp: timestamp.into(),
        }
    }
}

/// Loosely-typed post record as delivered by scrapers and API callers.
///
/// Every field may be absent or hold a value of the wrong JSON type; the
/// conversion into [`PostSample`] substitutes zero / empty defaults.
///
/// Each field is read from the first non-null key of its list, so records
/// carrying both `likes` and `likesCount` are accepted. Non-object records
/// deserialize to all-`None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawPost {
    pub likes: Option<Value>,
    pub comments: Option<Value>,
    pub timestamp: Option<Value>,
}

const LIKES_KEYS: &[&str] = &["likes", "likesCount", "like_count"];
const COMMENTS_KEYS: &[&str] = &["comments", "commentsCount", "comment_count"];
const TIMESTAMP_KEYS: &[&str] = &["timestamp", "takenAt", "published_at"];

impl<'de> Deserialize<'de> for RawPost {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Value::Object(mut fields) = Value::deserialize(deserializer)? else {
            return Ok(Self::default());
        };
        Ok(Self {
            likes: take_first(&mut fields, LIKES_KEYS),
            comments: take_first(&mut fields, COMMENTS_KEYS),
            timestamp: take_first(&mut fields, TIMESTAMP_KEYS),
        })
    }
}

fn take_first(fields: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    keys.iter()
        .find_map(|key| fields.remove(*key).filter(|value| !value.is_null()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErTrend {
    Rising,
    Stable,
    Declining,
}

impl ErTrend {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErTrend::Rising => "rising",
            ErTrend::Stable => "stable",
            ErTrend::Declining => "declining",
        }
    }
}

impl std::fmt::Display for ErTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engagement statistics for one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    /// Engagement rate in percent.
    pub er: f64,
    pub avg_likes: f64,
    pub avg_comments: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    pub recent: PeriodStats,
    pub middle: PeriodStats,
    pub oldest: PeriodStats,
}

/// Result of a trend analysis over one account's post history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendMetrics {
    pub er_trend: ErTrend,
    /// Signed change of recent ER against the older-period baseline, one decimal.
    pub er_change_percent: f64,
    /// Mean days between consecutive posts.
    pub avg_upload_frequency: u64,
    pub total_posts: usize,
    pub period_comparison: PeriodComparison,
}
