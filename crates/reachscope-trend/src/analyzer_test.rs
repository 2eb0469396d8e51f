use super::*;

/// Timestamps spaced `spacing_days` apart, newest first, starting 2024-06-30.
fn timestamp(index: usize, spacing_days: usize) -> String {
    let newest = chrono::NaiveDate::from_ymd_opt(2024, 6, 30)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .and_utc();
    let offset = chrono::Duration::days(i64::try_from(index * spacing_days).unwrap());
    (newest - offset).to_rfc3339()
}

fn uniform_posts(count: usize, likes: u64, comments: u64) -> Vec<PostSample> {
    (0..count)
        .map(|i| PostSample::new(likes, comments, timestamp(i, 1)))
        .collect()
}

/// Twelve posts: the first four carry `recent_likes`, the other eight `baseline_likes`.
fn twelve_with_recent(recent_likes: u64, baseline_likes: u64) -> Vec<PostSample> {
    (0..12)
        .map(|i| {
            let likes = if i < 4 { recent_likes } else { baseline_likes };
            PostSample::new(likes, 0, timestamp(i, 3))
        })
        .collect()
}

fn decimal_places(value: f64) -> usize {
    let rendered = value.to_string();
    rendered.split_once('.').map_or(0, |(_, frac)| frac.len())
}

// -----------------------------------------------------------------------
// gate
// -----------------------------------------------------------------------

#[test]
fn fewer_than_ten_posts_returns_none() {
    for count in 0..MIN_POSTS_FOR_TREND {
        assert!(
            compute_trend(&uniform_posts(count, 100, 10), 1_000).is_none(),
            "expected None for {count} posts"
        );
    }
}

#[test]
fn gate_ignores_content() {
    let posts: Vec<PostSample> = (0..9)
        .map(|i| PostSample::new(1_000_000 * (i + 1), 0, "2024-01-01T00:00:00Z"))
        .collect();
    assert!(compute_trend(&posts, 10).is_none());
}

#[test]
fn exactly_ten_posts_produces_metrics() {
    let metrics = compute_trend(&uniform_posts(10, 100, 10), 1_000).unwrap();
    assert_eq!(metrics.total_posts, 10);
}

// -----------------------------------------------------------------------
// partition
// -----------------------------------------------------------------------

#[test]
fn periods_partition_every_post_exactly_once() {
    for count in MIN_POSTS_FOR_TREND..=40 {
        let posts = uniform_posts(count, 1, 1);
        let (recent, middle, oldest) = split_periods(&posts);
        assert_eq!(recent.len() + middle.len() + oldest.len(), count);
        assert_eq!(recent.len(), count / 3);
        assert_eq!(middle.len(), count / 3);
        assert!(oldest.len() >= recent.len());
    }
}

#[test]
fn eleven_posts_oldest_absorbs_remainder() {
    let posts = uniform_posts(11, 1, 1);
    let (recent, middle, oldest) = split_periods(&posts);
    assert_eq!((recent.len(), middle.len(), oldest.len()), (3, 3, 5));
}

#[test]
fn twelve_posts_split_evenly() {
    let posts = uniform_posts(12, 1, 1);
    let (recent, middle, oldest) = split_periods(&posts);
    assert_eq!((recent.len(), middle.len(), oldest.len()), (4, 4, 4));
}

#[test]
fn remainder_posts_are_averaged_into_oldest() {
    // 11 posts: indices 6..11 form the oldest period
    let posts: Vec<PostSample> = (0..11_u64)
        .map(|i| PostSample::new(i * 10, 0, timestamp(usize::try_from(i).unwrap(), 1)))
        .collect();
    let metrics = compute_trend(&posts, 1_000).unwrap();
    // (60 + 70 + 80 + 90 + 100) / 5
    assert_eq!(metrics.period_comparison.oldest.avg_likes, 80.0);
    // (0 + 10 + 20) / 3
    assert_eq!(metrics.period_comparison.recent.avg_likes, 10.0);
    assert_eq!(metrics.total_posts, 11);
}

// -----------------------------------------------------------------------
// period statistics
// -----------------------------------------------------------------------

#[test]
fn period_stats_of_empty_slice_is_zero() {
    assert_eq!(period_stats(&[], 1_000), PeriodStats::default());
}

#[test]
fn period_stats_computes_engagement_rate() {
    let posts = vec![
        PostSample::new(100, 10, "2024-01-02T00:00:00Z"),
        PostSample::new(300, 30, "2024-01-01T00:00:00Z"),
    ];
    let stats = period_stats(&posts, 1_000);
    assert_eq!(stats.avg_likes, 200.0);
    assert_eq!(stats.avg_comments, 20.0);
    assert!((stats.er - 22.0).abs() < 1e-9, "er was {}", stats.er);
}

#[test]
fn zero_followers_zeroes_every_rate() {
    let metrics = compute_trend(&twelve_with_recent(5_000, 100), 0).unwrap();
    let periods = metrics.period_comparison;
    assert_eq!(periods.recent.er, 0.0);
    assert_eq!(periods.middle.er, 0.0);
    assert_eq!(periods.oldest.er, 0.0);
    assert_eq!(metrics.er_change_percent, 0.0);
    assert_eq!(metrics.er_trend, ErTrend::Stable);
    // averages are still reported
    assert_eq!(periods.recent.avg_likes, 5_000.0);
}

#[test]
fn zero_engagement_baseline_yields_zero_change() {
    let metrics = compute_trend(&twelve_with_recent(500, 0), 1_000).unwrap();
    assert_eq!(metrics.er_change_percent, 0.0);
    assert_eq!(metrics.er_trend, ErTrend::Stable);
}

#[test]
fn baseline_blends_middle_and_oldest() {
    assert!((baseline_er(Some(2.0), Some(4.0)) - 3.0).abs() < f64::EPSILON);
}

#[test]
fn baseline_falls_back_when_older_periods_are_missing() {
    // Only reachable when called directly; the post-count gate keeps both periods populated.
    assert!((baseline_er(Some(2.5), None) - 2.5).abs() < f64::EPSILON);
    assert_eq!(baseline_er(None, Some(4.0)), 0.0);
    assert_eq!(baseline_er(None, None), 0.0);
}

// -----------------------------------------------------------------------
// classification thresholds
// -----------------------------------------------------------------------

#[test]
fn exactly_fifteen_percent_up_is_stable() {
    let metrics = compute_trend(&twelve_with_recent(1_150, 1_000), 1_000).unwrap();
    assert_eq!(metrics.er_change_percent, 15.0);
    assert_eq!(metrics.er_trend, ErTrend::Stable);
}

#[test]
fn just_over_fifteen_percent_up_is_rising() {
    let metrics = compute_trend(&twelve_with_recent(1_151, 1_000), 1_000).unwrap();
    assert_eq!(metrics.er_change_percent, 15.1);
    assert_eq!(metrics.er_trend, ErTrend::Rising);
}

#[test]
fn exactly_fifteen_percent_down_is_stable() {
    let metrics = compute_trend(&twelve_with_recent(850, 1_000), 1_000).unwrap();
    assert_eq!(metrics.er_change_percent, -15.0);
    assert_eq!(metrics.er_trend, ErTrend::Stable);
}

#[test]
fn just_over_fifteen_percent_down_is_declining() {
    let metrics = compute_trend(&twelve_with_recent(849, 1_000), 1_000).unwrap();
    assert_eq!(metrics.er_change_percent, -15.1);
    assert_eq!(metrics.er_trend, ErTrend::Declining);
}

#[test]
fn flat_history_is_stable() {
    let metrics = compute_trend(&uniform_posts(15, 200, 20), 5_000).unwrap();
    assert_eq!(metrics.er_change_percent, 0.0);
    assert_eq!(metrics.er_trend, ErTrend::Stable);
}

#[test]
fn tiny_drop_reports_unsigned_zero_change() {
    let metrics = compute_trend(&twelve_with_recent(99_990, 100_000), 1_000_000).unwrap();
    assert_eq!(metrics.er_change_percent, 0.0);
    assert!(metrics.er_change_percent.is_sign_positive());
    assert_eq!(metrics.er_trend, ErTrend::Stable);

    let json = serde_json::to_value(&metrics).unwrap();
    assert_eq!(json["erChangePercent"].to_string(), "0.0");
}

// -----------------------------------------------------------------------
// cadence
// -----------------------------------------------------------------------

#[test]
fn cadence_ignores_input_order() {
    let mut posts: Vec<PostSample> = (0..12)
        .map(|i| PostSample::new(10, 1, timestamp(i, 10)))
        .collect();
    posts.swap(0, 11);
    posts.swap(3, 7);
    let metrics = compute_trend(&posts, 100).unwrap();
    assert_eq!(metrics.avg_upload_frequency, 10);
}

#[test]
fn unparseable_timestamps_do_not_abort_analysis() {
    let posts: Vec<PostSample> = (0..12)
        .map(|i| PostSample::new(10, 1, format!("not-a-date-{i}")))
        .collect();
    let metrics = compute_trend(&posts, 100).unwrap();
    assert_eq!(metrics.avg_upload_frequency, 0);
    assert_eq!(metrics.total_posts, 12);
}

// -----------------------------------------------------------------------
// rounding
// -----------------------------------------------------------------------

#[test]
fn output_is_rounded_and_deterministic() {
    let posts: Vec<PostSample> = (0..13_u64)
        .map(|i| PostSample::new(97 + i * 7, 3 + i % 4, timestamp(usize::try_from(i).unwrap(), 1)))
        .collect();

    let first = compute_trend(&posts, 7_777).unwrap();
    for _ in 0..5 {
        assert_eq!(compute_trend(&posts, 7_777).unwrap(), first);
    }

    let periods = [
        first.period_comparison.recent,
        first.period_comparison.middle,
        first.period_comparison.oldest,
    ];
    for period in periods {
        assert!(decimal_places(period.er) <= 2, "er {} not 2dp", period.er);
        assert_eq!(period.avg_likes.fract(), 0.0);
        assert_eq!(period.avg_comments.fract(), 0.0);
    }
    assert!(
        decimal_places(first.er_change_percent) <= 1,
        "change {} not 1dp",
        first.er_change_percent
    );
}

#[test]
fn round_to_handles_places() {
    assert_eq!(round_to(1.234_56, 2), 1.23);
    assert_eq!(round_to(1.235_01, 2), 1.24);
    assert_eq!(round_to(-15.04, 1), -15.0);
    assert_eq!(round_to(15.06, 1), 15.1);
    assert!(round_to(-0.04, 1).is_sign_positive());
    assert!(round_to(-0.001, 2).is_sign_positive());
}

// -----------------------------------------------------------------------
// end to end
// -----------------------------------------------------------------------

#[test]
fn rising_account_end_to_end() {
    // Most recent first: likes fall from 500 to 104 going back in time.
    let posts: Vec<PostSample> = (0..12_u64)
        .map(|i| PostSample::new(500 - i * 36, 10, timestamp(usize::try_from(i).unwrap(), 2)))
        .collect();

    let metrics = compute_trend(&posts, 10_000).unwrap();
    let periods = metrics.period_comparison;

    assert_eq!(metrics.total_posts, 12);
    assert_eq!(periods.recent.avg_likes, 446.0);
    assert_eq!(periods.middle.avg_likes, 302.0);
    assert_eq!(periods.oldest.avg_likes, 158.0);
    assert_eq!(periods.recent.avg_comments, 10.0);
    assert_eq!(periods.recent.er, 4.56);
    assert_eq!(periods.middle.er, 3.12);
    assert_eq!(periods.oldest.er, 1.68);
    assert!(periods.recent.er > periods.oldest.er);
    // (4.56 - 2.4) / 2.4
    assert_eq!(metrics.er_change_percent, 90.0);
    assert_eq!(metrics.er_trend, ErTrend::Rising);
    assert_eq!(metrics.avg_upload_frequency, 2);
}

#[test]
fn declining_account_end_to_end() {
    let posts: Vec<PostSample> = (0..12_u64)
        .map(|i| PostSample::new(104 + i * 36, 10, timestamp(usize::try_from(i).unwrap(), 7)))
        .collect();

    let metrics = compute_trend(&posts, 10_000).unwrap();
    assert_eq!(metrics.er_trend, ErTrend::Declining);
    assert!(metrics.er_change_percent < -15.0);
    assert_eq!(metrics.avg_upload_frequency, 7);
}

#[test]
fn metrics_serialize_in_camel_case() {
    let metrics = compute_trend(&uniform_posts(12, 100, 10), 1_000).unwrap();
    let json = serde_json::to_value(&metrics).unwrap();
    assert_eq!(json["erTrend"], "stable");
    assert_eq!(json["totalPosts"], 12);
    assert_eq!(json["avgUploadFrequency"], 1);
    assert!(json["erChangePercent"].is_number());
    assert_eq!(json["periodComparison"]["recent"]["avgLikes"], 100.0);
    assert_eq!(json["periodComparison"]["oldest"]["er"], 11.0);
}
