//! Dispatcher chain construction
//!
//! Lookup order: each `redirects.sources` file in listed order, then the
//! inline `redirects.paths`, then the fallback.

use std::path::Path;
use std::sync::Arc;

use super::fallback;
use crate::config::RedirectsConfig;
use crate::error::StartupError;
use crate::logger;
use crate::redirect::{loader, Handler, LoadError, MapHandler, RedirectMap};

pub fn build_chain(config: &RedirectsConfig) -> Result<Arc<dyn Handler>, StartupError> {
    let (mut head, description) = fallback::from_config(&config.fallback);
    logger::log_fallback(&description);

    if !config.paths.is_empty() {
        loader::check_targets(&config.paths).map_err(|err| source_error(INLINE, err))?;
        let paths = loader::into_map(config.paths.clone());
        head = wrap(INLINE, MapHandler::new(paths, head), config.status);
    }

    // Wrap back to front so the first listed source ends up outermost
    for source in config.sources.iter().rev() {
        let (text, format) = loader::read_source(Path::new(&source.file), source.format)
            .map_err(|err| source_error(&source.file, err))?;
        let handler = loader::map_handler(&text, format, head)
            .map_err(|err| source_error(&source.file, err))?;
        head = wrap(&source.file, handler, config.status);
    }

    Ok(head)
}

const INLINE: &str = "inline paths";

fn source_error(file: &str, source: LoadError) -> StartupError {
    StartupError::Source {
        file: file.to_string(),
        source,
    }
}

fn wrap(name: &str, handler: MapHandler, status: u16) -> Arc<dyn Handler> {
    let handler = handler.with_status(status);
    for path in unreachable_paths(handler.paths()) {
        logger::log_warning(&format!(
            "[Mapping] {name}: path '{path}' does not start with '/' and will never match"
        ));
    }
    if handler.is_empty() {
        logger::log_warning(&format!("[Mapping] {name}: no redirects"));
    }
    logger::log_mapping_loaded(name, handler.len());
    Arc::new(handler)
}

/// Request paths always start with '/', other keys can never match
fn unreachable_paths(paths: &RedirectMap) -> Vec<&str> {
    let mut unreachable: Vec<&str> = paths
        .keys()
        .map(String::as_str)
        .filter(|p| !p.starts_with('/'))
        .collect();
    unreachable.sort_unstable();
    unreachable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::SourceConfig;
    use crate::config::FallbackConfig;
    use crate::redirect::PathUrl;
    use hyper::Request;

    fn entry(path: &str, url: &str) -> PathUrl {
        PathUrl {
            path: path.to_string(),
            url: url.to_string(),
        }
    }

    fn location(handler: &Arc<dyn Handler>, uri: &str) -> Option<String> {
        let req = Request::builder().uri(uri).body(()).unwrap();
        handler
            .serve(&req)
            .headers()
            .get("Location")
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[test]
    fn test_empty_config_is_fallback_only() {
        let handler = build_chain(&RedirectsConfig::default()).unwrap();
        let req = Request::builder().uri("/x").body(()).unwrap();
        assert_eq!(handler.serve(&req).status(), 404);
    }

    #[test]
    fn test_sources_take_precedence_in_order() {
        let dir = std::env::temp_dir();
        let first = dir.join(format!("redirector-chain-first-{}.yaml", std::process::id()));
        let second = dir.join(format!("redirector-chain-second-{}.json", std::process::id()));
        std::fs::write(&first, "- path: /a\n  url: https://first.example.com/a\n").unwrap();
        std::fs::write(
            &second,
            r#"[{"path": "/a", "url": "https://second.example.com/a"},
                {"path": "/b", "url": "https://second.example.com/b"}]"#,
        )
        .unwrap();

        let config = RedirectsConfig {
            status: 301,
            paths: vec![
                entry("/b", "https://inline.example.com/b"),
                entry("/c", "https://inline.example.com/c"),
            ],
            sources: vec![
                SourceConfig {
                    file: first.to_str().unwrap().to_string(),
                    format: None,
                },
                SourceConfig {
                    file: second.to_str().unwrap().to_string(),
                    format: None,
                },
            ],
            fallback: FallbackConfig::NotFound,
        };
        let handler = build_chain(&config);
        std::fs::remove_file(&first).ok();
        std::fs::remove_file(&second).ok();
        let handler = handler.unwrap();

        assert_eq!(location(&handler, "/a").as_deref(), Some("https://first.example.com/a"));
        assert_eq!(location(&handler, "/b").as_deref(), Some("https://second.example.com/b"));
        assert_eq!(location(&handler, "/c").as_deref(), Some("https://inline.example.com/c"));
        assert_eq!(location(&handler, "/d"), None);

        let req = Request::builder().uri("/c").body(()).unwrap();
        assert_eq!(handler.serve(&req).status(), 301);
    }

    #[test]
    fn test_unreachable_paths() {
        let paths = loader::into_map(vec![
            entry("/ok", "https://a.example.com"),
            entry("docs", "https://b.example.com"),
            entry("", "https://c.example.com"),
            entry("https://x.example.com/y", "https://d.example.com"),
        ]);
        assert_eq!(
            unreachable_paths(&paths),
            vec!["", "docs", "https://x.example.com/y"]
        );
        assert!(unreachable_paths(&RedirectMap::new()).is_empty());
    }

    #[test]
    fn test_invalid_inline_target_fails() {
        let config = RedirectsConfig {
            paths: vec![entry("/x", "https://a.example.com/x\ny")],
            ..RedirectsConfig::default()
        };
        let err = build_chain(&config).err().unwrap();
        assert!(matches!(
            err,
            StartupError::Source {
                source: LoadError::InvalidTarget { .. },
                ..
            }
        ));
        assert!(err.to_string().contains("inline paths"));
    }

    #[test]
    fn test_invalid_source_target_fails() {
        let path = std::env::temp_dir().join(format!("redirector-chain-bad-{}.yaml", std::process::id()));
        std::fs::write(&path, "- path: /x\n  url: \"https://a.example.com/x\\ny\"\n").unwrap();
        let config = RedirectsConfig {
            sources: vec![SourceConfig {
                file: path.to_str().unwrap().to_string(),
                format: None,
            }],
            ..RedirectsConfig::default()
        };
        let result = build_chain(&config);
        std::fs::remove_file(&path).ok();
        assert!(matches!(
            result.err().unwrap(),
            StartupError::Source {
                source: LoadError::InvalidTarget { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_missing_source_fails() {
        let config = RedirectsConfig {
            sources: vec![SourceConfig {
                file: "/nonexistent/redirector/paths.yaml".to_string(),
                format: None,
            }],
            ..RedirectsConfig::default()
        };
        let err = build_chain(&config).err().unwrap();
        assert!(matches!(err, StartupError::Source { .. }));
        assert!(err.to_string().contains("paths.yaml"));
    }
}
