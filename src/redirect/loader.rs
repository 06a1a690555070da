//! Mapping loader
//!
//! Parses a list of path/URL pairs from text into a `RedirectMap`.
//!
//! Accepted layouts:
//!
//! ```yaml
//! - path: /some-path
//!   url: https://www.some-url.com/demo
//! ```
//!
//! ```toml
//! [[redirect]]
//! path = "/some-path"
//! url = "https://www.some-url.com/demo"
//! ```
//!
//! ```json
//! [{"path": "/some-path", "url": "https://www.some-url.com/demo"}]
//! ```

use hyper::header::HeaderValue;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use super::{Handler, MapHandler, RedirectMap};

/// One serialized mapping entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PathUrl {
    pub path: String,
    pub url: String,
}

/// Serialization format of a mapping document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingFormat {
    Yaml,
    Toml,
    Json,
}

impl MappingFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for MappingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Json => "json",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid YAML mapping: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid TOML mapping: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON mapping: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot infer mapping format of {0} (expected .yaml, .yml, .toml or .json)")]
    UnknownFormat(String),
    #[error("target of {path} is not a valid Location header value: {url:?}")]
    InvalidTarget { path: String, url: String },
}

/// TOML has no top-level arrays, entries live under `[[redirect]]`
#[derive(Deserialize)]
struct TomlDocument {
    #[serde(default)]
    redirect: Vec<PathUrl>,
}

/// Parse mapping text into its entries, in document order
pub fn parse(text: &str, format: MappingFormat) -> Result<Vec<PathUrl>, LoadError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let entries = match format {
        // A bare `null` / `~` document counts as empty
        MappingFormat::Yaml => serde_yaml::from_str::<Option<Vec<PathUrl>>>(text)?
            .unwrap_or_default(),
        MappingFormat::Toml => toml::from_str::<TomlDocument>(text)?.redirect,
        MappingFormat::Json => serde_json::from_str::<Option<Vec<PathUrl>>>(text)?
            .unwrap_or_default(),
    };
    check_targets(&entries)?;
    Ok(entries)
}

/// Every target must fit in a `Location` header, or its redirect would go out
/// without one
pub fn check_targets(entries: &[PathUrl]) -> Result<(), LoadError> {
    match entries
        .iter()
        .find(|entry| HeaderValue::from_str(&entry.url).is_err())
    {
        Some(entry) => Err(LoadError::InvalidTarget {
            path: entry.path.clone(),
            url: entry.url.clone(),
        }),
        None => Ok(()),
    }
}

/// Collect entries into a map; a repeated path keeps its last URL
pub fn into_map(entries: Vec<PathUrl>) -> RedirectMap {
    entries
        .into_iter()
        .map(|entry| (entry.path, entry.url))
        .collect()
}

pub fn load(text: &str, format: MappingFormat) -> Result<RedirectMap, LoadError> {
    parse(text, format).map(into_map)
}

/// Read a mapping file and settle its format
///
/// When `format` is `None` it is inferred from the file extension.
pub fn read_source(
    path: &Path,
    format: Option<MappingFormat>,
) -> Result<(String, MappingFormat), LoadError> {
    let format = match format {
        Some(format) => format,
        None => MappingFormat::from_path(path)
            .ok_or_else(|| LoadError::UnknownFormat(path.display().to_string()))?,
    };

    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok((text, format))
}

/// Parse mapping text and wrap it in a dispatcher in one step
pub fn map_handler(
    text: &str,
    format: MappingFormat,
    fallback: Arc<dyn Handler>,
) -> Result<MapHandler, LoadError> {
    let paths = load(text, format)?;
    Ok(MapHandler::new(paths, fallback))
}
