use serde::Deserialize;

/// Environment variable that overrides `server.allowed-origins`
pub const ALLOWED_ORIGINS_ENV: &str = "CRAWLER_ALLOWED_ORIGINS";

const DEFAULT_ORIGIN: &str = "http://localhost:4200";

/// Main configuration structure for Shelf-Scout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub callback: CallbackConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// HTTP transport configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Origins allowed by the CORS layer
    #[serde(rename = "allowed-origins", default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

/// Outbound page fetching configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header sent with every page request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Accept header sent with every page request
    #[serde(default = "default_accept")]
    pub accept: String,

    /// Maximum number of redirects followed per request
    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: usize,
}

/// Completion callback configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackConfig {
    /// Timeout for the callback POST (milliseconds), independent of job timeouts
    #[serde(rename = "timeout-ms", default = "default_callback_timeout_ms")]
    pub timeout_ms: u64,
}

/// Values applied when a crawl request omits them
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_concurrency")]
    pub concurrency: i64,

    #[serde(rename = "request-timeout-ms", default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Config {
    /// Replaces the allowed origins with the comma-separated list in `raw`.
    ///
    /// An empty list falls back to the local development origin.
    pub fn apply_allowed_origins(&mut self, raw: &str) {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        self.server.allowed_origins = if origins.is_empty() {
            default_allowed_origins()
        } else {
            origins
        };
    }

    /// Applies overrides from the process environment
    pub fn apply_env(&mut self) {
        if let Ok(raw) = std::env::var(ALLOWED_ORIGINS_ENV) {
            self.apply_allowed_origins(&raw);
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept: default_accept(),
            max_redirects: default_max_redirects(),
        }
    }
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_callback_timeout_ms(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec![DEFAULT_ORIGIN.to_string()]
}

fn default_user_agent() -> String {
    format!("shelf-scout/{}", env!("CARGO_PKG_VERSION"))
}

fn default_accept() -> String {
    "text/html,application/xhtml+xml".to_string()
}

fn default_max_redirects() -> usize {
    10
}

fn default_callback_timeout_ms() -> u64 {
    10_000
}

pub(crate) fn default_concurrency() -> i64 {
    4
}

pub(crate) fn default_request_timeout_ms() -> u64 {
    20_000
}
