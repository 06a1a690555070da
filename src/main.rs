use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

mod config;
mod error;
mod handler;
mod http;
mod logger;
mod redirect;
mod server;

use error::StartupError;

/// Config file used when none is given on the command line (extension optional)
const DEFAULT_CONFIG_PATH: &str = "config";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let cfg = config::Config::load_from(&config_path).map_err(StartupError::from)?;
    cfg.validate().map_err(StartupError::InvalidConfig)?;
    logger::init(&cfg).map_err(StartupError::Logger)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr().map_err(StartupError::Address)?;

    let chain = handler::build_chain(&cfg.redirects)?;

    let listener = server::create_reusable_listener(addr)
        .map_err(|source| StartupError::Bind { addr, source })?;

    logger::log_server_start(&addr, &cfg);
    let state = Arc::new(config::AppState::new(cfg, chain));
    let connections = Arc::new(AtomicUsize::new(0));

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    // Connections are served with spawn_local
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(
            listener,
            state,
            connections,
            signals,
        ))
        .await
}
