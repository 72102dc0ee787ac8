//! Proxy error types
//!
//! Every failure on the proxy path ends the request with exactly one local
//! response; none is retried.

use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("invalid JSON body: {0}")]
    InvalidJson(serde_json::Error),

    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: u64 },

    #[error("failed to read request body: {0}")]
    BodyRead(String),

    #[error("failed to encode upstream payload: {0}")]
    Encode(serde_json::Error),

    #[error("upstream request failed: {0}")]
    Upstream(#[source] reqwest::Error),
}

impl ProxyError {
    pub fn into_response(self) -> Response<Full<Bytes>> {
        match self {
            Self::InvalidJson(_) => http::json_response(
                StatusCode::BAD_REQUEST,
                &json!({ "error": "Invalid JSON" }),
            ),
            Self::BodyTooLarge { .. } => http::build_413_response(),
            Self::BodyRead(ref reason) => {
                logger::log_warning(&format!("Dropping proxy request: {reason}"));
                http::build_400_response()
            }
            Self::Encode(ref e) => {
                logger::log_error(&format!("Failed to encode upstream payload: {e}"));
                http::json_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &json!({ "error": "Internal server error" }),
                )
            }
            Self::Upstream(ref e) => {
                logger::log_upstream_failure(e);
                http::json_response(
                    StatusCode::BAD_GATEWAY,
                    &json!({ "error": { "message": "Failed to reach Anthropic API" } }),
                )
            }
        }
    }
}
