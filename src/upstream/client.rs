//! Outbound HTTPS client
//!
//! One `reqwest::Client` per process; connection pooling and TLS come from it.

use super::payload::MessagesPayload;
use crate::config::UpstreamConfig;
use crate::error::ProxyError;
use hyper::body::Bytes;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

const API_KEY_HEADER: &str = "x-api-key";
const API_VERSION_HEADER: &str = "anthropic-version";

/// Raw upstream answer, relayed to the caller untouched
#[derive(Debug)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Client for the upstream messages endpoint
pub struct UpstreamClient {
    client: Client,
    messages_url: String,
    api_key: String,
    api_version: String,
    default_model: String,
    default_max_tokens: u64,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }

        Ok(Self {
            client: builder.build()?,
            messages_url: config.messages_url(),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
            default_model: config.default_model.clone(),
            default_max_tokens: config.default_max_tokens,
        })
    }

    /// Shape an inbound request into the upstream payload using the configured defaults
    pub fn payload_for(&self, request: &Value) -> MessagesPayload {
        MessagesPayload::from_request(request, &self.default_model, self.default_max_tokens)
    }

    /// Send the payload once. Any transport failure, including one while
    /// reading the response body, is reported as `ProxyError::Upstream`.
    pub async fn send(&self, payload: &MessagesPayload) -> Result<UpstreamReply, ProxyError> {
        let body = payload.to_bytes().map_err(ProxyError::Encode)?;

        let response = self
            .client
            .post(&self.messages_url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .header(API_VERSION_HEADER, &self.api_version)
            .header(CONTENT_LENGTH, body.len())
            .body(body)
            .send()
            .await
            .map_err(ProxyError::Upstream)?;

        let status = response.status();
        let body = response.bytes().await.map_err(ProxyError::Upstream)?;

        Ok(UpstreamReply { status, body })
    }
}
