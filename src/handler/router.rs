//! Request entry point
//!
//! Hands every request to the dispatcher chain and records the access log line.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppState;
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
///
/// The body is never read: resolution depends on the request line only.
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _body) = req.into_parts();
    let head = Request::from_parts(parts, ());

    let response = state.handler.serve(&head);

    if state.access_log_enabled() {
        let entry = AccessLogEntry::from_exchange(peer_addr, &head, &response, started.elapsed());
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, FallbackConfig};
    use crate::handler::build_chain;
    use crate::redirect::PathUrl;
    use hyper::Method;

    fn state() -> Arc<AppState> {
        let mut config = Config::load_from("/nonexistent/redirector/config").unwrap();
        config.logging.access_log = false;
        config.redirects.paths = vec![PathUrl {
            path: "/urlshort-godoc".to_string(),
            url: "https://godoc.org/github.com/gophercises/urlshort".to_string(),
        }];
        config.redirects.fallback = FallbackConfig::Direct {
            status: 200,
            body: Some("Hello, world!".to_string()),
            content_type: None,
        };
        let handler = build_chain(&config.redirects).unwrap();
        Arc::new(AppState::new(config, handler))
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:50000".parse().unwrap()
    }

    #[tokio::test]
    async fn test_mapped_path_redirects() {
        let req = Request::builder()
            .uri("/urlshort-godoc")
            .body("ignored body")
            .unwrap();
        let resp = handle_request(req, peer(), state()).await.unwrap();
        assert_eq!(resp.status(), 302);
        assert_eq!(
            resp.headers().get("Location").unwrap(),
            "https://godoc.org/github.com/gophercises/urlshort"
        );
    }

    #[tokio::test]
    async fn test_any_method_is_resolved() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/urlshort-godoc")
            .body(())
            .unwrap();
        let resp = handle_request(req, peer(), state()).await.unwrap();
        assert_eq!(resp.status(), 302);
    }

    #[tokio::test]
    async fn test_unmapped_path_uses_fallback() {
        let req = Request::builder().uri("/").body(()).unwrap();
        let resp = handle_request(req, peer(), state()).await.unwrap();
        assert_eq!(resp.status(), 200);
        assert!(resp.headers().get("Location").is_none());
    }
}
