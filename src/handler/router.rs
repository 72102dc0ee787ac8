//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: flat dispatch on method + request target,
//! CORS headers on every response, one access log line per request.

use crate::config::AppState;
use crate::handler::{proxy, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Endpoints served by the router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Preflight,
    Index,
    Health,
    Generate,
    NotFound,
}

impl Route {
    /// Match on method and the full request target. A query string is part
    /// of the target, so `/health?x=1` is not `/health`.
    pub fn resolve(method: &Method, target: &str) -> Self {
        match (method, target) {
            (&Method::OPTIONS, _) => Self::Preflight,
            (&Method::GET, "/" | "/index.html") => Self::Index,
            (&Method::GET, "/health") => Self::Health,
            (&Method::POST, "/api/generate") => Self::Generate,
            _ => Self::NotFound,
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let access_log = state.config.logging.access_log;
    let mut entry = access_log.then(|| AccessLogEntry::from_request(&req, peer_addr));

    let target = req.uri().path_and_query().map_or("/", |pq| pq.as_str());
    let route = Route::resolve(req.method(), target);
    let mut response = match route {
        Route::Preflight => http::build_options_response(),
        Route::Index => static_files::serve_index(&state.config.static_files.index_file).await,
        Route::Health => http::build_health_response(),
        Route::Generate => proxy::handle_generate(req, &state).await,
        Route::NotFound => http::build_404_response(),
    };

    http::apply_cors_headers(response.headers_mut());

    if let Some(entry) = entry.as_mut() {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}
