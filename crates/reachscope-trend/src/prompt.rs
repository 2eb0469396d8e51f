//! Plain-text rendering of trend metrics for AI analysis prompts.

use crate::analyzer::MIN_POSTS_FOR_TREND;
use crate::types::{PeriodStats, TrendMetrics};

/// The single line rendered when no trend could be computed.
#[must_use]
pub fn unavailable_line() -> String {
    format!("Engagement trend: unavailable (fewer than {MIN_POSTS_FOR_TREND} posts in history)")
}

/// Render the trend block embedded in analysis prompts.
///
/// `None` renders [`unavailable_line`].
#[must_use]
pub fn render_prompt_context(metrics: Option<&TrendMetrics>) -> String {
    let Some(metrics) = metrics else {
        return unavailable_line();
    };

    let periods = &metrics.period_comparison;
    let unit = if metrics.avg_upload_frequency == 1 {
        "day"
    } else {
        "days"
    };

    [
        format!(
            "Engagement trend: {} ({:+.1}% recent vs. earlier posts)",
            metrics.er_trend, metrics.er_change_percent
        ),
        period_line("Recent", &periods.recent),
        period_line("Middle", &periods.middle),
        period_line("Oldest", &periods.oldest),
        format!(
            "Posting cadence: every {} {unit}",
            metrics.avg_upload_frequency
        ),
        format!("Posts analyzed: {}", metrics.total_posts),
    ]
    .join("\n")
}

fn period_line(label: &str, stats: &PeriodStats) -> String {
    format!(
        "{label} period: ER {:.2}%, avg {:.0} likes, avg {:.0} comments",
        stats.er, stats.avg_likes, stats.avg_comments
    )
}
