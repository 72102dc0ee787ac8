// Connection handling module
// Serves one accepted TCP connection on its own local task

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use hyper_util::server::graceful::GracefulShutdown;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve an accepted connection in a spawned task.
///
/// The connection is registered with `graceful` so a shutdown can ask it to
/// finish its in-flight request and close.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address, used for access logging
/// * `state` - Shared application state
/// * `graceful` - Shutdown coordinator watching all live connections
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    graceful: &GracefulShutdown,
) {
    logger::log_connection_accepted(&peer_addr);

    let io = TokioIo::new(stream);

    let mut builder = http1::Builder::new();
    builder.keep_alive(state.config.performance.keep_alive);

    let state = Arc::clone(state);
    let conn = builder.serve_connection(
        io,
        service_fn(move |req| {
            let state = Arc::clone(&state);
            async move { handler::handle_request(req, state, peer_addr).await }
        }),
    );
    let conn = graceful.watch(conn);

    tokio::task::spawn_local(async move {
        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
