//! Fallback handlers
//!
//! Answer requests whose path no mapping contains.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::sync::Arc;

use crate::config::FallbackConfig;
use crate::http;
use crate::redirect::Handler;

/// 404 for every request
pub struct NotFound;

impl Handler for NotFound {
    fn serve(&self, req: &Request<()>) -> Response<Full<Bytes>> {
        http::build_404_response(req.method() == Method::HEAD)
    }
}

/// Fixed status and body
pub struct Direct {
    pub status: u16,
    pub body: Option<String>,
    pub content_type: Option<String>,
}

impl Handler for Direct {
    fn serve(&self, req: &Request<()>) -> Response<Full<Bytes>> {
        http::build_direct_response(
            self.status,
            self.body.as_deref(),
            self.content_type.as_deref(),
            req.method() == Method::HEAD,
        )
    }
}

/// Redirect every request to a single target
pub struct RedirectAll {
    pub target: String,
    pub code: u16,
}

impl Handler for RedirectAll {
    fn serve(&self, req: &Request<()>) -> Response<Full<Bytes>> {
        http::build_redirect_response_with_code(
            &self.target,
            self.code,
            req.method(),
        )
    }
}

/// Build the configured fallback and a one-line description for the startup log
pub fn from_config(config: &FallbackConfig) -> (Arc<dyn Handler>, String) {
    match config {
        FallbackConfig::NotFound => (Arc::new(NotFound), "404 Not Found".to_string()),
        FallbackConfig::Direct {
            status,
            body,
            content_type,
        } => (
            Arc::new(Direct {
                status: *status,
                body: body.clone(),
                content_type: content_type.clone(),
            }),
            format!("direct response {status}"),
        ),
        FallbackConfig::Redirect { target, code } => (
            Arc::new(RedirectAll {
                target: target.clone(),
                code: *code,
            }),
            format!("redirect to {target} ({code})"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::body::Body;

    fn get(uri: &str) -> Request<()> {
        Request::builder().uri(uri).body(()).unwrap()
    }

    #[test]
    fn test_not_found() {
        let (handler, description) = from_config(&FallbackConfig::NotFound);
        assert_eq!(description, "404 Not Found");
        assert_eq!(handler.serve(&get("/anything")).status(), 404);
    }

    #[test]
    fn test_direct() {
        let (handler, _) = from_config(&FallbackConfig::Direct {
            status: 200,
            body: Some("<h1>Hello</h1>".to_string()),
            content_type: Some("text/html".to_string()),
        });
        let resp = handler.serve(&get("/"));
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Type").unwrap(), "text/html");
        assert_eq!(resp.body().size_hint().exact(), Some(14));

        let head = Request::builder().method(Method::HEAD).uri("/").body(()).unwrap();
        assert_eq!(handler.serve(&head).body().size_hint().exact(), Some(0));
    }

    #[test]
    fn test_redirect_all() {
        let (handler, description) = from_config(&FallbackConfig::Redirect {
            target: "https://example.com/".to_string(),
            code: 308,
        });
        assert!(description.contains("https://example.com/"));
        let resp = handler.serve(&get("/missing"));
        assert_eq!(resp.status(), 308);
        assert_eq!(resp.headers().get("Location").unwrap(), "https://example.com/");
    }
}
