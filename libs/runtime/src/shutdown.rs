//! Process signals that end the server.

use anyhow::{Context, Result};

/// Resolve on the first SIGTERM or SIGINT (Ctrl+C elsewhere). The binary
/// cancels the HTTP server's `CancellationToken` when this returns, letting
/// in-flight requests finish before the pool is closed.
pub async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut term = signal(SignalKind::terminate()).context("install SIGTERM handler")?;
        let mut int = signal(SignalKind::interrupt()).context("install SIGINT handler")?;
        let name = tokio::select! {
            _ = term.recv() => "SIGTERM",
            _ = int.recv() => "SIGINT",
        };
        tracing::info!(signal = name, "shutdown requested");
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .context("install Ctrl+C handler")?;
        tracing::info!(signal = "ctrl_c", "shutdown requested");
    }

    Ok(())
}
