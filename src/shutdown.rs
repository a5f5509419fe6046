//! Signal handling for the interactive shell.
//!
//! One-shot commands finish on their own; only the shell needs to be told
//! to stop. A signal stops every component actor first, then wakes the
//! shell loop so it can print its goodbye and return.

use crate::components::ComponentManager;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{error, info};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
#[cfg(windows)]
use tokio::signal::windows::{ctrl_break, ctrl_c};

/// Wait for a termination signal, stop the components and close the shell
/// through `stop_shell`.
///
/// If the handlers cannot be installed the shell keeps running until
/// `quit` or end of input.
pub async fn handle_signals(stop_shell: oneshot::Sender<()>, components: Arc<ComponentManager>) {
    let received = match wait_for_signal().await {
        Ok(name) => name,
        Err(e) => {
            error!("Failed to install signal handlers: {}", e);
            return;
        }
    };
    info!("Received {}, leaving the shell", received);

    if let Err(e) = components.shutdown_all().await {
        error!("Error stopping components: {:?}", e);
    }

    // The shell may already be gone if the user quit at the same moment
    if stop_shell.send(()).is_err() {
        info!("Shell already closed");
    }
}

/// Name of the signal that arrived
#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<&'static str> {
    let mut terminate = signal(SignalKind::terminate())?;
    let mut interrupt = signal(SignalKind::interrupt())?;

    Ok(tokio::select! {
        _ = terminate.recv() => "SIGTERM",
        _ = interrupt.recv() => "SIGINT",
    })
}

/// Name of the signal that arrived
#[cfg(windows)]
async fn wait_for_signal() -> std::io::Result<&'static str> {
    let mut interrupt = ctrl_c()?;
    let mut brk = ctrl_break()?;

    Ok(tokio::select! {
        _ = interrupt.recv() => "Ctrl+C",
        _ = brk.recv() => "Ctrl+Break",
    })
}
