//! Engagement-trend analysis for creator accounts.
//!
//! [`compute_trend`] segments a most-recent-first post history into three
//! periods and classifies the recent engagement rate against the older ones.
//! [`adapter`] turns scraper output into samples and [`prompt`] renders the
//! result for AI analysis prompts.

pub mod adapter;
pub mod analyzer;
pub mod cadence;
pub mod prompt;
pub mod types;

pub use adapter::{count_or_zero, sort_most_recent_first, to_samples};
pub use analyzer::{compute_trend, MIN_POSTS_FOR_TREND};
pub use cadence::average_upload_interval_days;
pub use prompt::render_prompt_context;
pub use types::{ErTrend, PeriodComparison, PeriodStats, PostSample, RawPost, TrendMetrics};
