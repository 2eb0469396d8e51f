//! Trend command handlers for the CLI.
//!
//! `analyze` works offline on a JSON post file; `fetch` and `batch` scrape
//! accounts through Apify first. Per-account failures in a batch are logged
//! and skipped so one bad handle does not abort the run.

mod report;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Subcommand, ValueEnum};
use futures::stream::{self, StreamExt};
use reachscope_trend::{compute_trend, to_samples, RawPost};

pub(crate) use report::{render_report, render_reports, AccountReport};

/// Output rendering for trend results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

/// Sub-commands available under `trend`.
#[derive(Debug, Subcommand)]
pub enum TrendCommands {
    /// Analyze a JSON array of posts (most recent first)
    Analyze {
        /// Path to the posts file
        #[arg(long)]
        input: PathBuf,

        /// Account follower count
        #[arg(long)]
        followers: u64,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Scrape one account and analyze its recent posts
    Fetch {
        /// Account handle, with or without a leading '@'
        #[arg(long)]
        username: String,

        /// Override the scraped follower count
        #[arg(long)]
        followers: Option<u64>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Scrape and analyze every active account on the watchlist
    Batch {
        /// Watchlist YAML; defaults to `REACHSCOPE_ACCOUNTS_PATH`
        #[arg(long)]
        accounts: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

pub(crate) async fn run(
    config: &reachscope_core::AppConfig,
    command: TrendCommands,
) -> anyhow::Result<()> {
    match command {
        TrendCommands::Analyze {
            input,
            followers,
            format,
        } => run_trend_analyze(&input, followers, format),
        TrendCommands::Fetch {
            username,
            followers,
            format,
        } => run_trend_fetch(config, &username, followers, format).await,
        TrendCommands::Batch { accounts, format } => {
            let path = accounts.unwrap_or_else(|| config.accounts_path.clone());
            run_trend_batch(config, &path, format).await
        }
    }
}

/// Parse a JSON array of raw posts.
pub(crate) fn parse_posts(content: &str) -> anyhow::Result<Vec<RawPost>> {
    serde_json::from_str(content).context("posts file must be a JSON array of post objects")
}

fn run_trend_analyze(input: &Path, followers: u64, format: OutputFormat) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read posts file {}", input.display()))?;
    let samples = to_samples(parse_posts(&content)?);
    let metrics = compute_trend(&samples, followers);

    if metrics.is_none() {
        tracing::info!(posts = samples.len(), "not enough posts for trend analysis");
    }

    let report = AccountReport {
        handle: None,
        followers,
        posts: samples.len(),
        metrics,
    };
    println!("{}", render_report(&report, format)?);
    Ok(())
}

fn build_apify_client(
    config: &reachscope_core::AppConfig,
) -> anyhow::Result<reachscope_scraper::ApifyClient> {
    let token = config.require_apify_token()?;
    reachscope_scraper::ApifyClient::new(
        token,
        &config.apify_actor,
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Apify client: {e}"))
}

/// Scrape one account and compute its trend.
async fn analyze_account(
    client: &reachscope_scraper::ApifyClient,
    handle: &str,
    followers_override: Option<u64>,
    results_limit: u32,
) -> anyhow::Result<AccountReport> {
    let profile = client
        .fetch_profile(handle, results_limit)
        .await
        .with_context(|| format!("failed to scrape '{handle}'"))?;

    let followers = followers_override.unwrap_or(profile.followers);
    let samples = to_samples(profile.posts);
    let metrics = compute_trend(&samples, followers);

    tracing::info!(
        handle = %profile.username,
        followers,
        posts = samples.len(),
        trend = metrics.as_ref().map_or("unavailable", |m| m.er_trend.as_str()),
        "account analyzed"
    );

    Ok(AccountReport {
        handle: Some(profile.username),
        followers,
        posts: samples.len(),
        metrics,
    })
}

async fn run_trend_fetch(
    config: &reachscope_core::AppConfig,
    username: &str,
    followers: Option<u64>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let client = build_apify_client(config)?;
    let report = analyze_account(&client, username, followers, config.scraper_results_limit).await?;
    println!("{}", render_report(&report, format)?);
    Ok(())
}

async fn run_trend_batch(
    config: &reachscope_core::AppConfig,
    accounts_path: &Path,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let accounts_file = reachscope_core::load_accounts(accounts_path)?;
    let accounts: Vec<&reachscope_core::AccountConfig> = accounts_file.active().collect();

    if accounts.is_empty() {
        println!("no active accounts in {}; nothing to analyze", accounts_path.display());
        return Ok(());
    }

    let client = build_apify_client(config)?;
    let account_count = accounts.len();

    let results: Vec<_> = stream::iter(accounts)
        .map(|account| {
            let client = &client;
            async move {
                let handle = account.normalized_handle();
                let result = analyze_account(
                    client,
                    &handle,
                    account.followers,
                    config.scraper_results_limit,
                )
                .await;
                (handle, result)
            }
        })
        .buffer_unordered(config.scraper_max_concurrent_accounts)
        .collect()
        .await;

    let mut reports = Vec::with_capacity(results.len());
    let mut failed_accounts = 0_usize;
    for (handle, result) in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                tracing::error!(handle = %handle, error = %format!("{e:#}"), "trend analysis failed");
                failed_accounts += 1;
            }
        }
    }

    if failed_accounts == account_count {
        anyhow::bail!("all {failed_accounts} accounts failed trend analysis");
    }
    if failed_accounts > 0 {
        tracing::warn!(
            failed_accounts,
            total_accounts = account_count,
            "some accounts failed during trend analysis"
        );
    }

    reports.sort_by(|a, b| a.handle.cmp(&b.handle));
    println!("{}", render_reports(&reports, format)?);

    Ok(())
}
