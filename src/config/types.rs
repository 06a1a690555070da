// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

use crate::redirect::{MappingFormat, PathUrl};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    #[serde(default)]
    pub redirects: RedirectsConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// error, warn, info or debug
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// Redirect mapping configuration
///
/// ```toml
/// [redirects]
/// status = 302
///
/// [[redirects.paths]]
/// path = "/docs"
/// url = "https://docs.example.com"
///
/// [[redirects.sources]]
/// file = "redirects.yaml"
///
/// [redirects.fallback]
/// type = "not_found"
/// ```
#[derive(Debug, Deserialize, Clone)]
pub struct RedirectsConfig {
    /// Status code used for mapped redirects
    #[serde(default = "default_redirect_code")]
    pub status: u16,
    /// Inline path/URL pairs, consulted after every source file
    #[serde(default)]
    pub paths: Vec<PathUrl>,
    /// Mapping files, consulted in listed order
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
    /// What to do when no mapping matches
    #[serde(default)]
    pub fallback: FallbackConfig,
}

impl Default for RedirectsConfig {
    fn default() -> Self {
        Self {
            status: default_redirect_code(),
            paths: Vec::new(),
            sources: Vec::new(),
            fallback: FallbackConfig::default(),
        }
    }
}

/// A mapping file on disk
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub file: String,
    /// Inferred from the file extension when absent
    #[serde(default)]
    pub format: Option<MappingFormat>,
}

/// Handler for paths no mapping knows about
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FallbackConfig {
    /// 404 Not Found
    #[default]
    NotFound,
    /// Fixed response
    Direct {
        #[serde(default = "default_direct_status")]
        status: u16,
        #[serde(default)]
        body: Option<String>,
        #[serde(default)]
        content_type: Option<String>,
    },
    /// Send every unmatched path to one target
    Redirect {
        target: String,
        #[serde(default = "default_redirect_code")]
        code: u16,
    },
}

#[allow(clippy::missing_const_for_fn)]
fn default_redirect_code() -> u16 {
    crate::http::DEFAULT_REDIRECT_STATUS
}

#[allow(clippy::missing_const_for_fn)]
fn default_direct_status() -> u16 {
    200
}
