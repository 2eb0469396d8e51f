use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Tiktok,
    Youtube,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Instagram => write!(f, "instagram"),
            Platform::Tiktok => write!(f, "tiktok"),
            Platform::Youtube => write!(f, "youtube"),
        }
    }
}

fn default_active() -> bool {
    true
}

/// One creator account on the analysis watchlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub handle: String,
    pub platform: Platform,
    /// Follower count override; when absent the scraped profile count is used.
    pub followers: Option<u64>,
    pub notes: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl AccountConfig {
    /// Handle without a leading `@`, lowercased.
    #[must_use]
    pub fn normalized_handle(&self) -> String {
        self.handle.trim().trim_start_matches('@').to_lowercase()
    }
}

#[derive(Debug, Deserialize)]
pub struct AccountsFile {
    pub accounts: Vec<AccountConfig>,
}

impl AccountsFile {
    /// Accounts flagged `active`, in file order.
    pub fn active(&self) -> impl Iterator<Item = &AccountConfig> {
        self.accounts.iter().filter(|a| a.active)
    }
}

/// Load and validate the account watchlist from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_accounts(path: &Path) -> Result<AccountsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::AccountsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_accounts(&content)
}

fn parse_accounts(content: &str) -> Result<AccountsFile, ConfigError> {
    let accounts_file: AccountsFile =
        serde_yaml::from_str(content).map_err(ConfigError::AccountsFileParse)?;

    validate_accounts(&accounts_file)?;

    Ok(accounts_file)
}

fn validate_accounts(accounts_file: &AccountsFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for account in &accounts_file.accounts {
        let handle = account.normalized_handle();
        if handle.is_empty() {
            return Err(ConfigError::Validation(
                "account handle must be non-empty".to_string(),
            ));
        }

        if !seen.insert((account.platform, handle.clone())) {
            return Err(ConfigError::Validation(format!(
                "duplicate {} account: '{handle}'",
                account.platform
            )));
        }
    }

    Ok(())
}
