//! Connectivity state
//!
//! Tracks whether the client believes it is online. The platform layer
//! feeds transitions in; pages and the router react through subscriptions.

use crossbeam_channel::Receiver;
use velinstore::Store;

/// Observable online/offline flag, starts online
#[derive(Clone)]
pub struct NetworkMonitor {
    online: Store<bool>,
}

impl NetworkMonitor {
    pub fn new() -> Self {
        Self {
            online: Store::new(true),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.get()
    }

    /// Record a connectivity transition
    ///
    /// Setting the current value again does not notify subscribers.
    pub fn set_online(&self, online: bool) {
        if self.online.get() != online {
            if online {
                tracing::info!("Connectivity restored");
            } else {
                tracing::warn!("Connectivity lost");
            }
            self.online.set(online);
        }
    }

    pub fn subscribe(&self) -> Receiver<bool> {
        self.online.subscribe()
    }
}

impl Default for NetworkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_online() {
        assert!(NetworkMonitor::new().is_online());
    }

    #[test]
    fn test_transitions_notify_once() {
        let monitor = NetworkMonitor::new();
        let rx = monitor.subscribe();

        monitor.set_online(false);
        monitor.set_online(false);
        monitor.set_online(true);

        assert!(!rx.recv().unwrap());
        assert!(rx.recv().unwrap());
        assert!(rx.try_recv().is_err());
    }
}
