//! Upstream Messages API module
//!
//! Shapes inbound generation requests into the fixed upstream payload and
//! performs the single outbound call per proxied request.

mod client;
mod payload;

pub use client::UpstreamClient;
