// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(rename = "static")]
    pub static_files: StaticConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub upstream: UpstreamConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Static page configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StaticConfig {
    /// HTML document served for `/` and `/index.html`, read on every request
    pub index_file: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common or json)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Seconds in-flight connections may run after a shutdown signal
    pub shutdown_grace_secs: u64,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub max_body_size: u64,
}

/// Upstream Messages API configuration
#[derive(Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Scheme and host of the upstream, without trailing path
    pub base_url: String,
    pub api_key: String,
    pub api_version: String,
    pub default_model: String,
    pub default_max_tokens: u64,
    /// Whole-request timeout; 0 leaves it to the transport
    pub timeout_secs: u64,
}

// Keep the credential out of debug output and logs
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("default_model", &self.default_model)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl UpstreamConfig {
    /// Full URL of the messages endpoint
    pub fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(base_url: &str) -> UpstreamConfig {
        UpstreamConfig {
            base_url: base_url.to_string(),
            api_key: "sk-secret".to_string(),
            api_version: "2023-06-01".to_string(),
            default_model: "claude-sonnet-4-20250514".to_string(),
            default_max_tokens: 1024,
            timeout_secs: 0,
        }
    }

    #[test]
    fn test_messages_url() {
        assert_eq!(
            upstream("https://api.anthropic.com").messages_url(),
            "https://api.anthropic.com/v1/messages"
        );
        assert_eq!(
            upstream("http://127.0.0.1:9000/").messages_url(),
            "http://127.0.0.1:9000/v1/messages"
        );
    }

    #[test]
    fn test_debug_redacts_credential() {
        let debug = format!("{:?}", upstream("https://api.anthropic.com"));
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
