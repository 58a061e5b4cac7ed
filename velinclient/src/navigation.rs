//! Navigation state
//!
//! The [`Navigator`] owns the current location as an observable store.
//! Detached components (the playback surface, share handling) navigate
//! through a [`NavigationBridge`], a weak handle that goes inert when the
//! navigator is torn down instead of keeping it alive or panicking.

use crate::router::normalize_path;
use crossbeam_channel::Receiver;
use std::sync::{Arc, Weak};
use tracing::debug;
use velinstore::Store;

struct NavigatorInner {
    location: Store<String>,
}

/// Owner of the current location
#[derive(Clone)]
pub struct Navigator {
    inner: Arc<NavigatorInner>,
}

impl Navigator {
    /// Create a navigator starting at `/`
    pub fn new() -> Self {
        Self::starting_at("/")
    }

    /// Create a navigator at a given location
    pub fn starting_at(path: &str) -> Self {
        Self {
            inner: Arc::new(NavigatorInner {
                location: Store::new(normalize_path(path)),
            }),
        }
    }

    /// Current location path
    pub fn location(&self) -> String {
        self.inner.location.get()
    }

    /// Navigate to a path
    ///
    /// Navigating to the current location is a no-op, subscribers are not
    /// re-notified.
    pub fn navigate(&self, path: &str) {
        let path = normalize_path(path);
        if self.inner.location.get() == path {
            return;
        }
        debug!("Navigating to {}", path);
        self.inner.location.set(path);
    }

    /// Subscribe to location changes
    pub fn subscribe(&self) -> Receiver<String> {
        self.inner.location.subscribe()
    }

    /// Create a weak navigation handle for detached components
    pub fn bridge(&self) -> NavigationBridge {
        NavigationBridge {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

/// Weak handle to a [`Navigator`]
///
/// Navigation requests through a bridge whose navigator is gone are dropped
/// silently; the bridge reports whether it is still connected.
#[derive(Clone)]
pub struct NavigationBridge {
    inner: Weak<NavigatorInner>,
}

impl NavigationBridge {
    /// Navigate through the bridge; returns false when the navigator is gone
    pub fn navigate(&self, path: &str) -> bool {
        match self.inner.upgrade() {
            Some(inner) => {
                let path = normalize_path(path);
                if inner.location.get() != path {
                    debug!("Navigating to {} (via bridge)", path);
                    inner.location.set(path);
                }
                true
            }
            None => {
                debug!("Navigation bridge is disconnected, dropping {}", path);
                false
            }
        }
    }

    /// Whether the navigator behind this bridge still exists
    pub fn is_connected(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_and_observe() {
        let nav = Navigator::new();
        let rx = nav.subscribe();

        nav.navigate("/search/jazz");
        assert_eq!(nav.location(), "/search/jazz");
        assert_eq!(rx.recv().unwrap(), "/search/jazz");
    }

    #[test]
    fn test_same_location_is_not_renotified() {
        let nav = Navigator::new();
        let rx = nav.subscribe();

        nav.navigate("/auth");
        nav.navigate("/auth");

        assert_eq!(rx.recv().unwrap(), "/auth");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_bridge_navigates_while_connected() {
        let nav = Navigator::new();
        let bridge = nav.bridge();

        assert!(bridge.is_connected());
        assert!(bridge.navigate("/podcast/abc"));
        assert_eq!(nav.location(), "/podcast/abc");
    }

    #[test]
    fn test_bridge_goes_inert_after_teardown() {
        let bridge = {
            let nav = Navigator::new();
            nav.bridge()
        };

        assert!(!bridge.is_connected());
        assert!(!bridge.navigate("/podcast/abc"));
    }
}
