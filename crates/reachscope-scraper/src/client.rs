//! HTTP client for the Apify actor API.
//!
//! Runs a profile-scraper actor synchronously and returns its dataset items.
//! Non-2xx responses surface as [`ScraperError::UnexpectedStatus`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ScraperError;
use crate::types::{ApifyProfileItem, ProfileScrapeInput, ScrapedProfile};

const DEFAULT_BASE_URL: &str = "https://api.apify.com/";

/// Client for running Apify scraper actors.
///
/// Use [`ApifyClient::new`] for production or [`ApifyClient::with_base_url`]
/// to point at a mock server in tests.
pub struct ApifyClient {
    client: Client,
    token: String,
    actor: String,
    base_url: Url,
}

impl ApifyClient {
    /// Creates a client pointed at the production Apify API.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        token: &str,
        actor: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ScraperError> {
        Self::with_base_url(token, actor, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`ScraperError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        token: &str,
        actor: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ScraperError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            token: token.to_owned(),
            actor: actor.to_owned(),
            base_url,
        })
    }

    /// Scrapes one profile and its latest posts.
    ///
    /// `username` may carry a leading `@`. Posts keep the order returned by
    /// the actor, which lists the newest post first.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::ProfileNotFound`] if no dataset item matches the handle.
    /// - [`ScraperError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ScraperError::Http`] on network failure.
    /// - [`ScraperError::Deserialize`] if the body is not a list of profile items.
    pub async fn fetch_profile(
        &self,
        username: &str,
        results_limit: u32,
    ) -> Result<ScrapedProfile, ScraperError> {
        let handle = username.trim().trim_start_matches('@');
        let url = self.run_sync_url()?;
        let input = ProfileScrapeInput {
            usernames: [handle],
            results_limit,
        };

        tracing::debug!(actor = %self.actor, handle, results_limit, "running apify actor");

        let response = self.client.post(url.clone()).json(&input).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: redact_token(&url),
            });
        }

        let body = response.text().await?;
        let items: Vec<ApifyProfileItem> =
            serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
                context: format!("profile scrape for '{handle}'"),
                source: e,
            })?;

        select_profile(items, handle)
    }

    fn run_sync_url(&self) -> Result<Url, ScraperError> {
        let mut url = self
            .base_url
            .join(&format!(
                "v2/acts/{}/run-sync-get-dataset-items",
                self.actor
            ))
            .map_err(|e| ScraperError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut().append_pair("token", &self.token);
        Ok(url)
    }
}

/// Pick the dataset item for `handle`, ignoring case and error items.
fn select_profile(
    items: Vec<ApifyProfileItem>,
    handle: &str,
) -> Result<ScrapedProfile, ScraperError> {
    let item = items
        .into_iter()
        .filter(|item| item.error.is_none())
        .find(|item| {
            item.username
                .as_deref()
                .is_some_and(|u| u.eq_ignore_ascii_case(handle))
        })
        .ok_or_else(|| ScraperError::ProfileNotFound(handle.to_owned()))?;

    let followers = item.followers_count.unwrap_or_default();
    if item.followers_count.is_none() {
        tracing::warn!(handle, "profile has no follower count; engagement rates will be zero");
    }

    Ok(ScrapedProfile {
        username: item.username.unwrap_or_else(|| handle.to_owned()),
        followers,
        posts: item.latest_posts,
    })
}

/// Strip the API token from a URL before it lands in an error or log line.
fn redact_token(url: &Url) -> String {
    let mut redacted = url.clone();
    redacted.set_query(None);
    redacted.to_string()
}
