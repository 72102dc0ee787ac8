// Application state module
// Immutable per-process state shared by every connection

use super::types::Config;
use crate::upstream::UpstreamClient;

/// Application state
///
/// Built once at startup and shared behind an `Arc`; nothing in it is mutated
/// while serving, so concurrent requests need no locking.
pub struct AppState {
    pub config: Config,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        Ok(Self { config, upstream })
    }
}
