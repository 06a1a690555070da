//! HTTP response building module
//!
//! Builders for the handful of responses the resolver emits: redirects,
//! 404 and configured direct responses.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode};

/// Status used when a mapping does not ask for a specific one (302 Found)
pub const DEFAULT_REDIRECT_STATUS: u16 = 302;

/// Status codes a mapping may redirect with
pub const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

pub fn is_redirect_status(code: u16) -> bool {
    REDIRECT_STATUSES.contains(&code)
}

/// Build a redirect response with the given status code
///
/// GET gets a short HTML link to the target as body; HEAD gets the same
/// headers without it. Other methods get `Location` only.
pub fn build_redirect_response_with_code(
    target: &str,
    code: u16,
    method: &Method,
) -> Response<Full<Bytes>> {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::FOUND);
    let reason = status.canonical_reason().unwrap_or("Found");
    let body = if *method == Method::GET {
        Bytes::from(format!("<a href=\"{}\">{reason}</a>.\n", escape_html(target)))
    } else {
        Bytes::new()
    };

    let mut builder = Response::builder()
        .status(status)
        .header("Location", target);
    if *method == Method::GET || *method == Method::HEAD {
        builder = builder.header("Content-Type", "text/html; charset=utf-8");
    }

    builder
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            let mut resp = Response::new(Full::new(Bytes::new()));
            *resp.status_mut() = status;
            resp
        })
}

/// Build 404 Not Found response
pub fn build_404_response(is_head: bool) -> Response<Full<Bytes>> {
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from("404 page not found\n")
    };

    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            let mut resp = Response::new(Full::new(Bytes::new()));
            *resp.status_mut() = StatusCode::NOT_FOUND;
            resp
        })
}

/// Build a fixed response (status, optional body and content type)
pub fn build_direct_response(
    status: u16,
    body: Option<&str>,
    content_type: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let bytes = match body {
        Some(text) if !is_head => Bytes::from(text.to_owned()),
        _ => Bytes::new(),
    };

    let mut builder = Response::builder().status(status);
    if body.is_some() {
        builder = builder.header(
            "Content-Type",
            content_type.unwrap_or("text/plain; charset=utf-8"),
        );
    }

    builder.body(Full::new(bytes)).unwrap_or_else(|e| {
        log_build_error(&status.to_string(), &e);
        Response::new(Full::new(Bytes::new()))
    })
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
