//! Runtime configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is loaded first when present (development).

use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_PAGE_LIMIT: usize = 50;
pub const DEFAULT_STORE_BUFFER: usize = 32;

/// Errors raised while loading configuration or reference data. All are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a positive number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Failed to read reference data from {path}: {source}")]
    ReadReferenceData {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid reference data: {0}")]
    ParseReferenceData(#[from] serde_json::Error),
}

/// Identity-provider and store settings for the directory.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: Option<String>,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub app_id: Option<String>,
    /// Replaces the embedded country table when set.
    pub countries_path: Option<PathBuf>,
    /// Server-side cap on published-clinic listings.
    pub page_limit: usize,
    /// Request channel capacity of the clinic store.
    pub store_buffer: usize,
}

impl DirectoryConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let optional = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let required = |name: &'static str| optional(name).ok_or(ConfigError::Missing(name));

        Ok(Self {
            api_key: required("CLINIC_API_KEY")?,
            auth_domain: required("CLINIC_AUTH_DOMAIN")?,
            project_id: optional("CLINIC_PROJECT_ID"),
            storage_bucket: optional("CLINIC_STORAGE_BUCKET"),
            messaging_sender_id: optional("CLINIC_MESSAGING_SENDER_ID"),
            app_id: optional("CLINIC_APP_ID"),
            countries_path: optional("CLINIC_COUNTRIES_PATH").map(PathBuf::from),
            page_limit: positive(
                "CLINIC_PAGE_LIMIT",
                optional("CLINIC_PAGE_LIMIT"),
                DEFAULT_PAGE_LIMIT,
            )?,
            store_buffer: positive(
                "CLINIC_STORE_BUFFER",
                optional("CLINIC_STORE_BUFFER"),
                DEFAULT_STORE_BUFFER,
            )?,
        })
    }
}

/// Service-account credentials used by the index provisioning tool.
#[derive(Clone)]
pub struct AdminCredentials {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl AdminCredentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Escaped `\n` sequences in the private key are expanded to newlines.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        Ok(Self {
            project_id: required("CLINIC_PROJECT_ID")?,
            client_email: required("CLINIC_CLIENT_EMAIL")?,
            private_key: required("CLINIC_PRIVATE_KEY")?.replace("\\n", "\n"),
        })
    }
}

fn positive(name: &'static str, raw: Option<String>, default: usize) -> Result<usize, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidNumber { name, value: raw }),
    }
}
