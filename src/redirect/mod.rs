//! Redirect resolution module
//!
//! Maps an incoming request path to a redirect target:
//! - `resolve` performs the exact-path lookup
//! - `MapHandler` turns the lookup result into a redirect or delegates to a fallback
//! - `loader` builds the same mapping from YAML, TOML or JSON text

mod dispatcher;
pub mod loader;

use std::collections::HashMap;

pub use dispatcher::{Handler, MapHandler};
pub use loader::{LoadError, MappingFormat, PathUrl};

/// Path to target URL, matched by exact string equality
pub type RedirectMap = HashMap<String, String>;

/// Outcome of resolving a path against a `RedirectMap`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// Redirect to the contained target URL
    Redirect(&'a str),
    /// No entry for this path, hand the request to the fallback
    Delegate,
}

/// Resolve a request path against the mapping
///
/// Only exact keys match: no prefix matching, no trailing-slash or case folding.
pub fn resolve<'a>(path: &str, map: &'a RedirectMap) -> Action<'a> {
    map.get(path)
        .map_or(Action::Delegate, |target| Action::Redirect(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> RedirectMap {
        let mut map = RedirectMap::new();
        map.insert(
            "/urlshort-godoc".to_string(),
            "https://godoc.org/github.com/gophercises/urlshort".to_string(),
        );
        map.insert(
            "/yaml-godoc".to_string(),
            "https://godoc.org/gopkg.in/yaml.v2".to_string(),
        );
        map
    }

    #[test]
    fn test_resolve_hit() {
        let map = sample_map();
        assert_eq!(
            resolve("/yaml-godoc", &map),
            Action::Redirect("https://godoc.org/gopkg.in/yaml.v2")
        );
    }

    #[test]
    fn test_resolve_miss_delegates() {
        let map = sample_map();
        assert_eq!(resolve("/", &map), Action::Delegate);
        assert_eq!(resolve("/unknown", &map), Action::Delegate);
    }

    #[test]
    fn test_resolve_is_exact() {
        let map = sample_map();
        // No prefix, trailing slash or case normalisation
        assert_eq!(resolve("/yaml-godoc/", &map), Action::Delegate);
        assert_eq!(resolve("/yaml-godoc/extra", &map), Action::Delegate);
        assert_eq!(resolve("/YAML-GODOC", &map), Action::Delegate);
        assert_eq!(resolve("/yaml", &map), Action::Delegate);
    }

    #[test]
    fn test_resolve_empty_map() {
        let map = RedirectMap::new();
        assert_eq!(resolve("/anything", &map), Action::Delegate);
    }
}
