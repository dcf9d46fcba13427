use tokio::signal;
use tracing::warn;

/// Resolves on Ctrl+C.
pub async fn listen_for_shutdown() {
    signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
    warn!("Shutdown signal received, stopping the server...");
}
