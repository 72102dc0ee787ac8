//! Generation proxy module
//!
//! `POST /api/generate`: read the body, reshape it, make one upstream call,
//! relay whatever comes back.

use crate::config::AppState;
use crate::error::ProxyError;
use crate::http;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::CONTENT_LENGTH;
use hyper::{HeaderMap, Request, Response};
use serde_json::Value;

/// Proxy a generation request; failures become their local error response
pub async fn handle_generate<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match proxy_generate(req, state).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

async fn proxy_generate<B>(
    req: Request<B>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, ProxyError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = state.config.http.max_body_size;
    check_declared_length(req.headers(), limit)?;

    let body = read_body(req.into_body(), limit).await?;
    let request: Value = serde_json::from_slice(&body).map_err(ProxyError::InvalidJson)?;

    let payload = state.upstream.payload_for(&request);
    let reply = state.upstream.send(&payload).await?;

    Ok(http::build_relay_response(reply.status, reply.body))
}

/// Refuse early when Content-Length already exceeds the limit
fn check_declared_length(headers: &HeaderMap, limit: u64) -> Result<(), ProxyError> {
    let declared = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    match declared {
        Some(size) if size > limit => Err(ProxyError::BodyTooLarge { limit }),
        _ => Ok(()),
    }
}

/// Collect the whole body, stopping once it grows past the limit
async fn read_body<B>(body: B, limit: u64) -> Result<Bytes, ProxyError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit_usize = usize::try_from(limit).unwrap_or(usize::MAX);
    match Limited::new(body, limit_usize).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(ProxyError::BodyTooLarge { limit })
        }
        Err(e) => Err(ProxyError::BodyRead(e.to_string())),
    }
}
