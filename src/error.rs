//! Startup errors
//!
//! Everything that can stop the server before it accepts its first connection.

use std::net::SocketAddr;
use thiserror::Error;

use crate::redirect::LoadError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("{0}")]
    Address(String),
    #[error("failed to load redirect source {file}: {source}")]
    Source {
        file: String,
        #[source]
        source: LoadError,
    },
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to open log file: {0}")]
    Logger(#[source] std::io::Error),
}
