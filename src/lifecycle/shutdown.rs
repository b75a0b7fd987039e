//! Shutdown coordination.

use std::future::Future;

use tokio::sync::watch;

/// Stop flag shared by the signal task and every chain service in the process.
///
/// Backed by a `watch` channel: a service that starts waiting after
/// [`Shutdown::trigger`] still sees the flag and stops at once.
#[derive(Clone)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Future that resolves once the flag is raised. Handed to `ChainServer::run`.
    pub fn signalled(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            // Sender dropped means nothing can trigger any more; treat it as a stop.
            let _ = rx.wait_for(|stopping| *stopping).await;
        }
    }

    /// Ask every service to stop accepting and drain. Idempotent.
    pub fn trigger(&self) {
        let first = self.tx.send_if_modified(|stopping| !std::mem::replace(stopping, true));
        if first {
            tracing::debug!(services = self.listeners(), "Shutdown triggered");
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Number of services still waiting on the flag.
    pub fn listeners(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
