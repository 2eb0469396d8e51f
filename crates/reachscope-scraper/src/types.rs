use reachscope_trend::RawPost;
use serde::{Deserialize, Serialize};

/// One dataset item from the Apify Instagram profile scraper.
///
/// Only the fields the trend pipeline consumes are modelled.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApifyProfileItem {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub followers_count: Option<u64>,
    #[serde(default)]
    pub latest_posts: Vec<RawPost>,
    /// Set by the actor when the profile could not be scraped.
    #[serde(default)]
    pub error: Option<String>,
}

/// Actor input for a profile scrape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileScrapeInput<'a> {
    pub usernames: [&'a str; 1],
    pub results_limit: u32,
}

/// A scraped account ready for trend analysis.
#[derive(Debug, Clone)]
pub struct ScrapedProfile {
    pub username: String,
    pub followers: u64,
    /// Posts in the provider's order (most recent first).
    pub posts: Vec<RawPost>,
}
