//! Network-state monitor
//!
//! Tracks the platform connectivity signal as a single boolean. The download
//! admission check reads the current value; UI affordances can subscribe for
//! transition notifications. Event-driven only, no polling.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Shared online/offline state with change notification
#[derive(Debug, Clone)]
pub struct NetworkMonitor {
    state: Arc<watch::Sender<bool>>,
}

impl NetworkMonitor {
    /// Create a monitor seeded with the platform's current connectivity
    pub fn new(initially_online: bool) -> Self {
        let (tx, _rx) = watch::channel(initially_online);
        Self {
            state: Arc::new(tx),
        }
    }

    /// Current connectivity
    pub fn is_online(&self) -> bool {
        *self.state.borrow()
    }

    /// Apply a connectivity transition event.
    ///
    /// Subscribers are only notified on actual transitions, not on repeated
    /// reports of the same state.
    pub fn set_online(&self, online: bool) {
        let changed = self.state.send_if_modified(|current| {
            if *current != online {
                *current = online;
                true
            } else {
                false
            }
        });

        if changed {
            info!(
                "Network state changed: {}",
                if online { "online" } else { "offline" }
            );
        }
    }

    /// Subscribe to connectivity transitions
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }
}

impl Default for NetworkMonitor {
    fn default() -> Self {
        // Absent a platform signal, assume connectivity until told otherwise
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_preserved() {
        assert!(NetworkMonitor::new(true).is_online());
        assert!(!NetworkMonitor::new(false).is_online());
    }

    #[tokio::test]
    async fn test_subscriber_sees_transition() {
        let monitor = NetworkMonitor::new(true);
        let mut rx = monitor.subscribe();

        monitor.set_online(false);
        rx.changed().await.unwrap();
        assert!(!*rx.borrow());
    }

    #[tokio::test]
    async fn test_repeated_state_does_not_notify() {
        let monitor = NetworkMonitor::new(true);
        let rx = monitor.subscribe();

        monitor.set_online(true);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_clones_share_state() {
        let monitor = NetworkMonitor::new(true);
        let clone = monitor.clone();

        monitor.set_online(false);
        assert!(!clone.is_online());
    }
}
