//! Authentication state store
//!
//! Tracks whether a user is signed in. The session is persisted through
//! [`StoreConfigExt`](crate::StoreConfigExt), token encrypted at rest, and
//! restored on construction so a restart keeps the user signed in.

use crate::config_ext::StoreConfigExt;
use crate::store::Store;
use crossbeam_channel::Receiver;
use std::sync::Arc;
use velinconfig::Config;

/// Authentication state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub authenticated: bool,
    pub username: Option<String>,
}

/// Observable auth store with persistence
#[derive(Clone)]
pub struct AuthStore {
    state: Store<AuthState>,
    config: Arc<Config>,
}

impl AuthStore {
    /// Create the store, restoring any persisted session
    pub fn new(config: Arc<Config>) -> Self {
        let initial = match config.get_auth_session() {
            Ok(Some((username, _token))) => AuthState {
                authenticated: true,
                username: Some(username),
            },
            Ok(None) => AuthState::default(),
            Err(e) => {
                tracing::warn!("Could not restore auth session: {}", e);
                AuthState::default()
            }
        };

        Self {
            state: Store::new(initial),
            config,
        }
    }

    pub fn get(&self) -> AuthState {
        self.state.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.get().authenticated
    }

    pub fn subscribe(&self) -> Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Sign in and persist the session
    pub fn login(&self, username: &str, token: &str) -> anyhow::Result<()> {
        self.config.set_auth_session(username, token)?;
        self.state.set(AuthState {
            authenticated: true,
            username: Some(username.to_string()),
        });
        Ok(())
    }

    /// Sign out and drop the persisted session
    pub fn logout(&self) -> anyhow::Result<()> {
        self.config.clear_auth_session()?;
        self.state.set(AuthState::default());
        Ok(())
    }
}
