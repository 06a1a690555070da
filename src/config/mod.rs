// Configuration module entry point
// Loads layered configuration and holds the runtime state built from it

mod state;
pub mod types;

use hyper::header::HeaderValue;
use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, FallbackConfig, PerformanceConfig, RedirectsConfig};

use crate::http::is_redirect_status;
use crate::logger::Level;

impl Config {
    /// Load configuration from specified file path (extension optional)
    ///
    /// Sources, lowest priority first: built-in defaults, the file if it
    /// exists, then `REDIRECTOR_*` environment variables
    /// (e.g. `REDIRECTOR_SERVER__PORT=9000`).
    pub fn load_from(config_path: &str) -> Result<Self, ::config::ConfigError> {
        let settings = ::config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .add_source(::config::File::with_name(config_path).required(false))
            .add_source(
                ::config::Environment::with_prefix("REDIRECTOR")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Reject settings that would only fail later, at request time
    pub fn validate(&self) -> Result<(), String> {
        if self.logging.level.parse::<Level>().is_err() {
            return Err(format!(
                "logging.level must be one of error, warn, info, debug (got '{}')",
                self.logging.level
            ));
        }

        let redirects = &self.redirects;
        if !is_redirect_status(redirects.status) {
            return Err(format!(
                "redirects.status {} is not a redirect code (use 301, 302, 303, 307 or 308)",
                redirects.status
            ));
        }

        if let Some(source) = redirects.sources.iter().find(|s| s.file.trim().is_empty()) {
            return Err(format!("redirects.sources entry has an empty file: {source:?}"));
        }

        match &redirects.fallback {
            FallbackConfig::NotFound => {}
            FallbackConfig::Direct { status, .. } => {
                if !(100..=599).contains(status) {
                    return Err(format!("redirects.fallback status {status} is out of range"));
                }
            }
            FallbackConfig::Redirect { target, code } => {
                if target.is_empty() {
                    return Err("redirects.fallback redirect target is empty".to_string());
                }
                if HeaderValue::from_str(target).is_err() {
                    return Err(format!(
                        "redirects.fallback target {target:?} is not a valid Location header value"
                    ));
                }
                if !is_redirect_status(*code) {
                    return Err(format!(
                        "redirects.fallback code {code} is not a redirect code"
                    ));
                }
            }
        }

        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
