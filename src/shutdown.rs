use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Cooperative cancellation flag shared by the engine and its callers.
///
/// Clones observe the same flag. Cancelling more than once is a no-op.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelSignal {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once [`CancelSignal::cancel`] has been called.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this only returns once set.
        drop(rx.wait_for(|cancelled| *cancelled).await);
    }
}

/// Cancels `cancel` on Ctrl+C or SIGTERM. The task ends once the signal is
/// cancelled from anywhere.
pub fn setup_signal_handler(cancel: &CancelSignal) -> tokio::task::JoinHandle<()> {
    let cancel = cancel.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };

        #[cfg(unix)]
        {
            tokio::select! {
                () = cancel.cancelled() => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Ctrl+C received, stopping after in-flight requests");
                    cancel.cancel();
                }
                () = async {
                    if let Some(signal) = term_signal.as_mut() {
                        signal.recv().await;
                    } else {
                        std::future::pending::<()>().await;
                    }
                } => {
                    info!("SIGTERM received, stopping after in-flight requests");
                    cancel.cancel();
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                () = cancel.cancelled() => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Ctrl+C received, stopping after in-flight requests");
                    cancel.cancel();
                }
            }
        }
    })
}
