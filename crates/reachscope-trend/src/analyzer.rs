//! Engagement-trend segmentation.
//!
//! Splits a most-recent-first post history into `recent`, `middle` and
//! `oldest` periods, compares the recent engagement rate against a blended
//! baseline of the older two, and estimates posting cadence.

use crate::cadence::average_upload_interval_days;
use crate::types::{ErTrend, PeriodComparison, PeriodStats, PostSample, TrendMetrics};

/// Below this many posts a three-way split carries no signal.
pub const MIN_POSTS_FOR_TREND: usize = 10;

/// Change (in percent) beyond which the trend is `rising` or `declining`.
pub const TREND_THRESHOLD_PERCENT: f64 = 15.0;

/// Compute trend metrics for one account.
///
/// `posts` must be ordered most-recent-first. Returns `None` when fewer than
/// [`MIN_POSTS_FOR_TREND`] posts are supplied. Zero followers, unparseable
/// timestamps and empty periods all resolve to zeros rather than errors.
#[must_use]
pub fn compute_trend(posts: &[PostSample], followers: u64) -> Option<TrendMetrics> {
    let total_posts = posts.len();
    if total_posts < MIN_POSTS_FOR_TREND {
        return None;
    }

    let (recent, middle, oldest) = split_periods(posts);

    let recent_stats = period_stats(recent, followers);
    let middle_stats = period_stats(middle, followers);
    let oldest_stats = period_stats(oldest, followers);

    let baseline = baseline_er(
        (!middle.is_empty()).then_some(middle_stats.er),
        (!oldest.is_empty()).then_some(oldest_stats.er),
    );

    let raw_change = if baseline > 0.0 {
        (recent_stats.er - baseline) / baseline * 100.0
    } else {
        0.0
    };
    let er_change_percent = round_to(raw_change, 1);
    let er_trend = classify(er_change_percent);

    let avg_upload_frequency = average_upload_interval_days(posts);

    tracing::debug!(
        total_posts,
        followers,
        recent_er = recent_stats.er,
        middle_er = middle_stats.er,
        oldest_er = oldest_stats.er,
        baseline,
        er_change_percent,
        trend = %er_trend,
        avg_upload_frequency,
        "computed engagement trend"
    );

    Some(TrendMetrics {
        er_trend,
        er_change_percent,
        avg_upload_frequency,
        total_posts,
        period_comparison: PeriodComparison {
            recent: round_period(recent_stats),
            middle: round_period(middle_stats),
            oldest: round_period(oldest_stats),
        },
    })
}

/// Partition `posts` into `(recent, middle, oldest)`.
///
/// `recent` and `middle` hold `len / 3` posts each; `oldest` takes the rest,
/// so every post lands in exactly one period.
#[must_use]
pub fn split_periods(posts: &[PostSample]) -> (&[PostSample], &[PostSample], &[PostSample]) {
    let segment_size = posts.len() / 3;
    let (recent, rest) = posts.split_at(segment_size);
    let (middle, oldest) = rest.split_at(segment_size);
    (recent, middle, oldest)
}

/// Mean likes, mean comments and engagement rate for one period.
///
/// An empty period, or an account with zero followers, has an ER of zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn period_stats(period: &[PostSample], followers: u64) -> PeriodStats {
    if period.is_empty() {
        return PeriodStats::default();
    }

    let (likes, comments) = period.iter().fold((0_u64, 0_u64), |(likes, comments), p| {
        (likes.saturating_add(p.likes), comments.saturating_add(p.comments))
    });

    let count = period.len() as f64;
    let avg_likes = likes as f64 / count;
    let avg_comments = comments as f64 / count;

    let er = if followers > 0 {
        (avg_likes + avg_comments) / followers as f64 * 100.0
    } else {
        0.0
    };

    PeriodStats {
        er,
        avg_likes,
        avg_comments,
    }
}

/// Blend the older periods into the comparison baseline.
///
/// Behind the post-count gate `oldest` is never empty, so only the first arm
/// is reachable from [`compute_trend`].
fn baseline_er(middle: Option<f64>, oldest: Option<f64>) -> f64 {
    match (middle, oldest) {
        (Some(middle), Some(oldest)) => (middle + oldest) / 2.0,
        (Some(middle), None) => middle,
        (None, _) => 0.0,
    }
}

fn classify(change_percent: f64) -> ErTrend {
    if change_percent > TREND_THRESHOLD_PERCENT {
        ErTrend::Rising
    } else if change_percent < -TREND_THRESHOLD_PERCENT {
        ErTrend::Declining
    } else {
        ErTrend::Stable
    }
}

fn round_period(stats: PeriodStats) -> PeriodStats {
    PeriodStats {
        er: round_to(stats.er, 2),
        avg_likes: stats.avg_likes.round(),
        avg_comments: stats.avg_comments.round(),
    }
}

/// Round half away from zero to `places` decimals.
///
/// Values that round to zero come back as `+0.0`, never `-0.0`.
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
#[path = "analyzer_test.rs"]
mod tests;
