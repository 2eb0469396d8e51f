use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub accounts_path: PathBuf,
    pub apify_token: Option<String>,
    pub apify_actor: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_results_limit: u32,
    pub scraper_max_concurrent_accounts: usize,
}

impl AppConfig {
    /// Returns the Apify token or an error naming the missing variable.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::MissingEnvVar`] when `APIFY_TOKEN` was not set.
    pub fn require_apify_token(&self) -> Result<&str, crate::ConfigError> {
        self.apify_token
            .as_deref()
            .ok_or_else(|| crate::ConfigError::MissingEnvVar("APIFY_TOKEN".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("accounts_path", &self.accounts_path)
            .field(
                "apify_token",
                &self.apify_token.as_ref().map(|_| "[redacted]"),
            )
            .field("apify_actor", &self.apify_actor)
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("scraper_results_limit", &self.scraper_results_limit)
            .field(
                "scraper_max_concurrent_accounts",
                &self.scraper_max_concurrent_accounts,
            )
            .finish()
    }
}
