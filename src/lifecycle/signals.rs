//! OS signal handling.

use tokio::signal;

/// Wait for Ctrl+C or SIGTERM.
#[cfg(unix)]
pub async fn wait_for_signal() -> std::io::Result<()> {
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    tokio::select! {
        result = signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

/// Wait for Ctrl+C.
#[cfg(not(unix))]
pub async fn wait_for_signal() -> std::io::Result<()> {
    signal::ctrl_c().await
}
