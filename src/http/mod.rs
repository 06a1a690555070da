//! HTTP protocol layer module
//!
//! Response builders shared by the redirect dispatcher and the fallback handlers.

pub mod response;

pub use response::{
    build_404_response, build_direct_response, build_redirect_response_with_code,
    is_redirect_status, DEFAULT_REDIRECT_STATUS,
};
