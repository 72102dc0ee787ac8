//! Logger module
//!
//! Provides logging utilities for the server including:
//! - Server lifecycle logging
//! - Access logging in combined, common or json format
//! - Error and warning logging, including upstream failures
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::{Config, ConfigError, LoggingConfig, API_KEY_VAR};
use std::net::SocketAddr;
use writer::Level;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    writer::init(
        config.access_log_file.as_deref(),
        config.error_log_file.as_deref(),
        Level::parse(&config.level),
    )
}

fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

fn write_warning(message: &str) {
    match writer::get() {
        Some(w) => w.write_warning(message),
        None => eprintln!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

fn debug_enabled() -> bool {
    writer::get().is_some_and(|w| w.enabled(Level::Debug))
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Artist Bio Generator started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Static page: {}", config.static_files.index_file));
    write_info(&format!("Upstream: {}", config.upstream.messages_url()));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

/// Report a fatal configuration problem before the process exits
pub fn log_config_error(err: &ConfigError) {
    write_error(&format!("\n[FATAL] {err}\n"));
    if matches!(err, ConfigError::MissingCredential) {
        write_error("  In production: set it in the platform's environment variables");
        write_error(&format!("  Locally:       export {API_KEY_VAR}=sk-ant-your-key-here\n"));
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    if debug_enabled() {
        write_info(&format!("[Connection] Accepted from: {peer_addr}"));
    }
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_warning(&format!("[WARN] {message}"));
}

/// Upstream could not be reached; the reason is kept for operators
pub fn log_upstream_failure(err: &reqwest::Error) {
    write_error(&upstream_failure_message(err));
}

fn upstream_failure_message(err: &reqwest::Error) -> String {
    let kind = if err.is_connect() {
        "connect"
    } else if err.is_timeout() {
        "timeout"
    } else if err.is_body() || err.is_decode() {
        "body"
    } else {
        "request"
    };
    format!("[PROXY] API request failed ({kind}): {err}")
}

pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_shutdown_requested(signal: &str) {
    write_info(&format!("\n[SIGNAL] {signal} received, shutting down"));
}

pub fn log_shutdown_complete(drained: bool, grace_secs: u64) {
    if drained {
        write_info("[SHUTDOWN] All connections closed");
    } else {
        write_warning(&format!(
            "[SHUTDOWN] Connections still open after {grace_secs}s, exiting anyway"
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upstream_failure_names_connect_errors() {
        let err = reqwest::Client::new()
            .post("http://127.0.0.1:1/v1/messages")
            .send()
            .await
            .unwrap_err();

        let message = upstream_failure_message(&err);
        assert!(
            message.starts_with("[PROXY] API request failed (connect): "),
            "{message}"
        );
    }
}
