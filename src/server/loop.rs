// Server loop module
// Accepts connections until shutdown is requested, then drains

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::{accept_connection, connection_timeout};
use super::signal::SignalHandler;
use crate::config::AppState;
use crate::logger;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the accept loop on the current `LocalSet`
///
/// Returns once a shutdown signal arrived and open connections finished
/// or the drain period (the per-connection timeout) ran out.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
    signals: Arc<SignalHandler>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.shutdown.notified() => {
                break;
            }
        }
    }

    // Stop accepting before waiting on the stragglers
    drop(listener);

    let drain = connection_timeout(&state.config.performance);
    let remaining = wait_for_drain(&active_connections, drain).await;
    logger::log_shutdown_complete(remaining);
    Ok(())
}

/// Wait until no connection is open or `limit` elapsed; returns how many are left
pub async fn wait_for_drain(active_connections: &AtomicUsize, limit: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + limit;

    loop {
        let open = active_connections.load(Ordering::SeqCst);
        if open == 0 || tokio::time::Instant::now() >= deadline {
            return open;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
