// Server loop module
// Accepts connections until a shutdown signal, then drains them

use std::sync::Arc;
use std::time::Duration;

use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config::AppState;
use crate::logger;

/// Run the accept loop on `listener`.
///
/// Every connection runs on its own local task, so one slow upstream call
/// never holds up another request. On shutdown the listener is closed first,
/// then live connections get `performance.shutdown_grace_secs` to finish.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    signals: Arc<SignalHandler>,
) -> Result<(), Box<dyn std::error::Error>> {
    let graceful = GracefulShutdown::new();

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &graceful);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.shutdown.notified() => break,
        }
    }

    drop(listener);

    let grace_secs = state.config.performance.shutdown_grace_secs;
    let drained = tokio::time::timeout(Duration::from_secs(grace_secs), graceful.shutdown())
        .await
        .is_ok();
    logger::log_shutdown_complete(drained, grace_secs);

    Ok(())
}
