// Configuration module entry point
// Loads layered configuration and holds the per-process application state

mod state;
mod types;

use config::builder::DefaultState;
use config::ConfigBuilder;
use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, LoggingConfig, UpstreamConfig};

/// Default config file (without extension), looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment prefix for nested overrides, e.g. `ARTIST_BIO__LOGGING__ACCESS_LOG`
const ENV_PREFIX: &str = "ARTIST_BIO";

/// Platform variable carrying the listen port
const PORT_VAR: &str = "PORT";

/// Platform variable carrying the upstream credential
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("missing ANTHROPIC_API_KEY environment variable")]
    MissingCredential,

    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        source: std::net::AddrParseError,
    },
}

impl Config {
    /// Load configuration from the given file path (without extension),
    /// the `ARTIST_BIO__*` environment and the platform variables.
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option(
                "server.port",
                std::env::var(PORT_VAR).ok().filter(|p| !p.is_empty()),
            )?
            .set_override_option("upstream.api_key", std::env::var(API_KEY_VAR).ok())?;

        Self::build(builder)
    }

    /// Apply defaults to the given sources, deserialize and validate.
    pub fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings = builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("static.index_file", "index.html")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("performance.keep_alive", true)?
            .set_default("performance.shutdown_grace_secs", 10)?
            .set_default("upstream.base_url", "https://api.anthropic.com")?
            .set_default("upstream.api_key", "")?
            .set_default("upstream.api_version", "2023-06-01")?
            .set_default("upstream.default_model", "claude-sonnet-4-20250514")?
            .set_default("upstream.default_max_tokens", 1024)?
            .set_default("upstream.timeout_secs", 0)?
            .build()?;

        let config: Self = settings.try_deserialize()?;
        if config.upstream.api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential);
        }
        Ok(config)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| ConfigError::InvalidAddress { addr, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder_with_key(key: &str) -> ConfigBuilder<DefaultState> {
        config::Config::builder()
            .set_override("upstream.api_key", key)
            .unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let cfg = Config::build(builder_with_key("sk-test")).unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.static_files.index_file, "index.html");
        assert_eq!(cfg.upstream.base_url, "https://api.anthropic.com");
        assert_eq!(cfg.upstream.api_version, "2023-06-01");
        assert_eq!(cfg.upstream.default_model, "claude-sonnet-4-20250514");
        assert_eq!(cfg.upstream.default_max_tokens, 1024);
        assert_eq!(cfg.upstream.timeout_secs, 0);
        assert!(cfg.performance.keep_alive);
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "0.0.0.0:3000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_missing_credential_is_fatal() {
        let err = Config::build(config::Config::builder()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential));

        let err = Config::build(builder_with_key("   ")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential));
    }

    #[test]
    fn test_port_override_from_string() {
        // PORT arrives as a string from the environment
        let builder = builder_with_key("sk-test")
            .set_override("server.port", "8081")
            .unwrap();
        let cfg = Config::build(builder).unwrap();
        assert_eq!(cfg.server.port, 8081);
    }

    #[test]
    fn test_invalid_host_rejected() {
        let builder = builder_with_key("sk-test")
            .set_override("server.host", "not a host")
            .unwrap();
        let cfg = Config::build(builder).unwrap();
        assert!(matches!(
            cfg.get_socket_addr(),
            Err(ConfigError::InvalidAddress { .. })
        ));
    }
}
