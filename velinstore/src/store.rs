//! Generic observable state cell
//!
//! A `Store<T>` holds one value behind a mutex and broadcasts every change
//! to its subscribers. Subscribers receive values over an unbounded channel;
//! a subscriber that dropped its receiver is pruned on the next broadcast.

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Observable container for a single state value
#[derive(Clone)]
pub struct Store<T: Clone> {
    value: Arc<Mutex<T>>,
    subscribers: Arc<Mutex<Vec<Sender<T>>>>,
}

impl<T: Clone> Store<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T {
        self.value.lock().unwrap().clone()
    }

    /// Replace the value and notify subscribers
    pub fn set(&self, new_value: T) {
        {
            let mut value = self.value.lock().unwrap();
            *value = new_value.clone();
        }
        self.broadcast(new_value);
    }

    /// Mutate the value in place and notify subscribers
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let snapshot = {
            let mut value = self.value.lock().unwrap();
            f(&mut value);
            value.clone()
        };
        self.broadcast(snapshot);
    }

    /// Conditionally mutate the value in place
    ///
    /// The closure decides under the lock whether to commit; subscribers are
    /// notified only when it returns true. Returns whether a commit happened.
    pub fn update_if<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T) -> bool,
    {
        let snapshot = {
            let mut value = self.value.lock().unwrap();
            if !f(&mut value) {
                return false;
            }
            value.clone()
        };
        self.broadcast(snapshot);
        true
    }

    /// Subscribe to state changes
    ///
    /// The receiver gets every value set after this call. It does not get
    /// the current value; call [`Store::get`] for that.
    pub fn subscribe(&self) -> Receiver<T> {
        let (tx, rx) = unbounded::<T>();
        {
            let mut subscribers = self.subscribers.lock().unwrap();
            subscribers.push(tx);
        }
        rx
    }

    fn broadcast(&self, value: T) {
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|tx| tx.send(value.clone()).is_ok());
    }
}

impl<T: Clone + Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let store = Store::new(1u32);
        assert_eq!(store.get(), 1);
        store.set(5);
        assert_eq!(store.get(), 5);
    }

    #[test]
    fn test_subscribers_receive_changes() {
        let store = Store::new("a".to_string());
        let rx = store.subscribe();

        store.set("b".to_string());
        store.update(|v| v.push('c'));

        assert_eq!(rx.recv().unwrap(), "b");
        assert_eq!(rx.recv().unwrap(), "bc");
    }

    #[test]
    fn test_update_if_refusal_is_silent() {
        let store = Store::new(1u32);
        let rx = store.subscribe();

        assert!(!store.update_if(|_| false));
        assert_eq!(store.get(), 1);
        assert!(rx.try_recv().is_err());

        assert!(store.update_if(|v| {
            *v = 2;
            true
        }));
        assert_eq!(rx.recv().unwrap(), 2);
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let store = Store::new(0u32);
        let rx = store.subscribe();
        drop(rx);

        // Must not panic or error
        store.set(1);
        assert_eq!(store.get(), 1);
    }

    #[test]
    fn test_clone_shares_state() {
        let store = Store::new(0u32);
        let other = store.clone();
        other.set(7);
        assert_eq!(store.get(), 7);
    }
}
