use std::sync::Arc;

mod config;
mod error;
mod handler;
mod http;
mod logger;
mod server;
mod upstream;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());

    let cfg = match config::Config::load_from(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            logger::log_config_error(&e);
            std::process::exit(1);
        }
    };

    logger::init(&cfg.logging)?;

    // One thread drives every connection; requests interleave at await points
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(config::AppState::new(cfg)?);
    let signals = Arc::new(server::SignalHandler::new());

    // LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async move {
            server::start_signal_handler(Arc::clone(&signals));
            server::start_server_loop(listener, state, signals).await
        })
        .await
}
