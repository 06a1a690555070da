//! Request handler module
//!
//! Builds the dispatcher chain from configuration and serves requests through it.

pub mod chain;
pub mod fallback;
pub mod router;

pub use chain::build_chain;
pub use router::handle_request;
