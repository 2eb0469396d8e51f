//! Rendering of per-account trend results for stdout.

use reachscope_trend::{render_prompt_context, TrendMetrics};
use serde::Serialize;

use super::OutputFormat;

/// Trend outcome for one account, as printed by the CLI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccountReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    pub followers: u64,
    pub posts: usize,
    /// `None` when the history is too short for a trend.
    pub metrics: Option<TrendMetrics>,
}

/// Render a single report.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn render_report(report: &AccountReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => Ok(render_text(report)),
    }
}

/// Render several reports: one JSON array, or text blocks separated by a blank line.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn render_reports(
    reports: &[AccountReport],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
        OutputFormat::Text => Ok(reports
            .iter()
            .map(render_text)
            .collect::<Vec<_>>()
            .join("\n\n")),
    }
}

fn render_text(report: &AccountReport) -> String {
    let header = match &report.handle {
        Some(handle) => format!("@{handle} ({} followers)", report.followers),
        None => format!("{} followers", report.followers),
    };
    format!(
        "{header}\n{}",
        render_prompt_context(report.metrics.as_ref())
    )
}
