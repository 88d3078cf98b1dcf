//! Application configuration management.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Transaction storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Treasury exchange rate API configuration.
    #[serde(default)]
    pub treasury: TreasuryConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound on handling a single request, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Requests accepted per minute before callers get 429.
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            rate_limit_per_minute: default_rate_limit(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    10
}

fn default_rate_limit() -> u64 {
    100
}

/// Backend holding the transaction key-value records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// In-process map; contents vanish on restart.
    Memory,
    /// Local filesystem directory.
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// S3-compatible storage: Cloudflare R2, Supabase, AWS S3, DigitalOcean Spaces
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// AWS access key ID.
        access_key_id: String,
        /// AWS secret access key.
        secret_access_key: String,
        /// AWS region.
        region: String,
    },
}

impl StorageProvider {
    /// Create local filesystem provider.
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Create S3-compatible provider (Cloudflare R2, Supabase, AWS S3).
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Get the provider name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::LocalFs { .. } => "local",
            Self::S3 { .. } => "s3",
        }
    }
}

impl Default for StorageProvider {
    fn default() -> Self {
        Self::local_fs("./data")
    }
}

/// Transaction storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Storage provider configuration.
    #[serde(default)]
    pub provider: StorageProvider,
    /// Namespace prefixed to every transaction key.
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

impl StorageConfig {
    /// Default key namespace.
    pub const DEFAULT_BUCKET: &'static str = "transactions";

    /// Create a new storage config with the default bucket.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            bucket: default_bucket(),
        }
    }

    /// Set the key namespace.
    #[must_use]
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// In-memory storage, mostly for tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(StorageProvider::Memory)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(StorageProvider::default())
    }
}

fn default_bucket() -> String {
    StorageConfig::DEFAULT_BUCKET.to_string()
}

/// Treasury "rates of exchange" API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreasuryConfig {
    /// Full URL of the rates of exchange endpoint.
    #[serde(default = "default_treasury_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_treasury_timeout")]
    pub timeout_secs: u64,
    /// Total attempts for a request that fails at the transport level.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Fixed pause between attempts, in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
    /// Records requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl TreasuryConfig {
    /// Public endpoint of the Treasury Reporting Rates of Exchange dataset.
    pub const DEFAULT_URL: &'static str = "https://api.fiscaldata.treasury.gov/services/api/fiscal_service/v1/accounting/od/rates_of_exchange";
}

impl Default for TreasuryConfig {
    fn default() -> Self {
        Self {
            base_url: default_treasury_url(),
            timeout_secs: default_treasury_timeout(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay(),
            page_size: default_page_size(),
        }
    }
}

fn default_treasury_url() -> String {
    TreasuryConfig::DEFAULT_URL.to_string()
}

fn default_treasury_timeout() -> u64 {
    10
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1000
}

fn default_page_size() -> u32 {
    1000
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `PURCHASEFX__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("PURCHASEFX")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
