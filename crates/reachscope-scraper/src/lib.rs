//! Ingestion of creator post histories from the Apify scraping platform.

pub mod client;
pub mod error;
pub mod types;

pub use client::ApifyClient;
pub use error::ScraperError;
pub use types::{ApifyProfileItem, ScrapedProfile};
