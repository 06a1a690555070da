//! Mapping-driven request dispatcher
//!
//! `MapHandler` redirects paths found in its mapping and passes everything
//! else to a fallback `Handler`. Since the dispatcher is itself a `Handler`,
//! several mappings can be layered on top of each other.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::sync::Arc;

use super::{resolve, Action, RedirectMap};
use crate::http;
use crate::logger;

/// Anything that can answer a request from its head alone
pub trait Handler: Send + Sync {
    fn serve(&self, req: &Request<()>) -> Response<Full<Bytes>>;
}

/// Redirects mapped paths, delegates the rest
pub struct MapHandler {
    paths: RedirectMap,
    status: u16,
    fallback: Arc<dyn Handler>,
}

impl MapHandler {
    pub fn new(paths: RedirectMap, fallback: Arc<dyn Handler>) -> Self {
        Self {
            paths,
            status: http::DEFAULT_REDIRECT_STATUS,
            fallback,
        }
    }

    /// Override the redirect status code (302 by default)
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub const fn paths(&self) -> &RedirectMap {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Handler for MapHandler {
    fn serve(&self, req: &Request<()>) -> Response<Full<Bytes>> {
        let path = req.uri().path();
        match resolve(path, &self.paths) {
            Action::Redirect(target) => {
                logger::log_debug(&format!("[Resolve] {path} -> {target} ({})", self.status));
                http::build_redirect_response_with_code(
                    target,
                    self.status,
                    req.method(),
                )
            }
            Action::Delegate => {
                logger::log_debug(&format!("[Resolve] {path} -> fallback"));
                self.fallback.serve(req)
            }
        }
    }
}

impl std::fmt::Debug for MapHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapHandler")
            .field("paths", &self.paths)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
