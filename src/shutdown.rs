use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::sync::Notify;

/// Process-wide shutdown state: a one-way flag plus a count of live sessions.
pub struct ShutdownManager {
    shutdown: AtomicBool,
    active_sessions: AtomicUsize,
    notify: Notify,
}

impl ShutdownManager {
    pub fn new() -> Self {
        Self {
            shutdown: AtomicBool::new(false),
            active_sessions: AtomicUsize::new(0),
            notify: Notify::new(),
        }
    }

    /// Resolve on SIGINT, SIGTERM (Ctrl+C off unix) or [`signal_shutdown`].
    ///
    /// [`signal_shutdown`]: Self::signal_shutdown
    pub async fn wait_for_shutdown(&self) -> std::io::Result<()> {
        // Register with Notify before checking the flag, otherwise a
        // signal_shutdown() between the two would be lost.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_shutting_down() {
            return Ok(());
        }

        #[cfg(unix)]
        {
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
            tokio::select! {
                _ = signal::ctrl_c() => {},
                _ = sigterm.recv() => {},
                _ = &mut notified => {},
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                _ = signal::ctrl_c() => {},
                _ = &mut notified => {},
            }
        }

        self.shutdown.store(true, Ordering::SeqCst);
        tracing::info!("Shutting down gracefully...");
        Ok(())
    }

    pub fn signal_shutdown(&self) {
        if !self.shutdown.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    pub fn active_sessions(&self) -> usize {
        self.active_sessions.load(Ordering::SeqCst)
    }

    /// Count a session as live until the returned guard is dropped.
    pub fn track_session(self: &Arc<Self>) -> SessionGuard {
        self.active_sessions.fetch_add(1, Ordering::SeqCst);
        scopeguard::guard(Arc::clone(self), release_session as fn(Arc<ShutdownManager>))
    }

    /// Wait until every session has ended or `timeout` elapses.
    ///
    /// Returns the number of sessions still running; zero means a clean drain.
    pub async fn wait_for_sessions(&self, timeout: Duration) -> usize {
        let active = self.active_sessions();
        tracing::info!("Waiting for {} active sessions...", active);

        let start = tokio::time::Instant::now();
        while start.elapsed() < timeout {
            if self.active_sessions() == 0 {
                tracing::info!("All sessions closed");
                return 0;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let remaining = self.active_sessions();
        if remaining == 0 {
            return 0;
        }
        tracing::warn!("Gave up waiting after {:?} ({} sessions remain)", timeout, remaining);
        remaining
    }
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}

fn release_session(manager: Arc<ShutdownManager>) {
    manager.active_sessions.fetch_sub(1, Ordering::SeqCst);
}

pub type SessionGuard = scopeguard::ScopeGuard<Arc<ShutdownManager>, fn(Arc<ShutdownManager>)>;
