//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Admin access configuration.
    pub admin: AdminConfig,
    /// Summarizer configuration.
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    /// Maintenance scheduler configuration.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Admin access configuration.
///
/// Authentication is an opaque "caller is admin" predicate: a request is
/// an admin request iff it presents this bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Bearer token granting admin access.
    pub token: String,
    /// Bearer secret required by the cron endpoints (unset = open).
    #[serde(default)]
    pub cron_secret: Option<String>,
}

/// Summarizer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizerConfig {
    /// `OpenAI` API key.
    #[serde(default)]
    pub openai_api_key: Option<String>,
    /// `OpenAI` model (e.g., "gpt-4o-mini").
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// Request timeout in seconds for the external summarization call.
    #[serde(default = "default_summarizer_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: default_openai_model(),
            timeout_seconds: default_summarizer_timeout(),
        }
    }
}

/// Maintenance scheduler configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Whether the in-process interval scheduler runs at all. When false,
    /// the cron HTTP endpoints are the only trigger.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Interval between auto-end runs in seconds (default: 1 minute).
    #[serde(default = "default_auto_end_interval")]
    pub auto_end_interval_seconds: u64,
    /// Interval between auto-summarize runs in seconds (default: 1 hour).
    #[serde(default = "default_auto_summarize_interval")]
    pub auto_summarize_interval_seconds: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_end_interval_seconds: default_auto_end_interval(),
            auto_summarize_interval_seconds: default_auto_summarize_interval(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

const fn default_summarizer_timeout() -> u64 {
    60
}

const fn default_true() -> bool {
    true
}

const fn default_auto_end_interval() -> u64 {
    60
}

const fn default_auto_summarize_interval() -> u64 {
    3600
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `LECTUREBOARD_ENV`)
    /// 3. Environment variables with `LECTUREBOARD_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("LECTUREBOARD_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("LECTUREBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("LECTUREBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
