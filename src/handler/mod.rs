//! Request handler module
//!
//! Responsible for request routing dispatch and the three endpoint behaviors:
//! the static page, the liveness check and the upstream proxy.

pub mod proxy;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
