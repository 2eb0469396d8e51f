pub mod accounts;
pub mod app_config;
pub mod config;

use thiserror::Error;

pub use accounts::{load_accounts, AccountConfig, AccountsFile, Platform};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read accounts file {path}: {source}")]
    AccountsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse accounts file: {0}")]
    AccountsFileParse(#[source] serde_yaml::Error),

    #[error("accounts validation failed: {0}")]
    Validation(String),
}
