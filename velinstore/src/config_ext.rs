//! Configuration extension for persisted client state
//!
//! Extends `velinconfig::Config` with the values the stores persist across
//! restarts: the auth session, the theme choice and the last playback
//! snapshot. The auth token is stored encrypted with the machine-derived
//! key from `velinconfig::encryption`.
//!
//! # Example
//!
//! ```no_run
//! use velinconfig::get_config;
//! use velinstore::StoreConfigExt;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = get_config();
//!
//! config.set_auth_session("alice", "session-token")?;
//! if let Some((user, _token)) = config.get_auth_session()? {
//!     println!("restored session for {}", user);
//! }
//! # Ok(())
//! # }
//! ```

use crate::player::PlaybackSnapshot;
use anyhow::Result;
use serde_yaml::Value;
use velinconfig::encryption::{encrypt_secret, get_secret};
use velinconfig::Config;

/// Extension trait persisting store state in the configuration
///
/// Getters return `Ok(None)` when nothing was persisted yet; setters write
/// through to disk immediately.
pub trait StoreConfigExt {
    // ========================================================================
    // Auth session
    // ========================================================================

    /// Persist the authenticated session (token stored encrypted)
    fn set_auth_session(&self, username: &str, token: &str) -> Result<()>;

    /// Restore the persisted session as `(username, token)`
    fn get_auth_session(&self) -> Result<Option<(String, String)>>;

    /// Drop the persisted session
    fn clear_auth_session(&self) -> Result<()>;

    // ========================================================================
    // Theme
    // ========================================================================

    /// Get the persisted theme label ("light", "dark" or "system")
    fn get_theme(&self) -> Result<Option<String>>;

    /// Persist the theme label
    fn set_theme(&self, theme: &str) -> Result<()>;

    // ========================================================================
    // Playback snapshot
    // ========================================================================

    /// Get the last persisted playback snapshot
    fn get_playback_snapshot(&self) -> Result<Option<PlaybackSnapshot>>;

    /// Persist the playback snapshot
    fn set_playback_snapshot(&self, snapshot: &PlaybackSnapshot) -> Result<()>;

    /// Drop the persisted playback snapshot
    fn clear_playback_snapshot(&self) -> Result<()>;
}

impl StoreConfigExt for Config {
    fn set_auth_session(&self, username: &str, token: &str) -> Result<()> {
        let encrypted = encrypt_secret(token)?;
        self.set_value(
            &["client", "auth", "username"],
            Value::String(username.to_string()),
        )?;
        self.set_value(&["client", "auth", "token"], Value::String(encrypted))
    }

    fn get_auth_session(&self) -> Result<Option<(String, String)>> {
        let username = match self.get_value(&["client", "auth", "username"]) {
            Ok(Value::String(u)) if !u.is_empty() => u,
            _ => return Ok(None),
        };

        let token = match self.get_value(&["client", "auth", "token"]) {
            Ok(Value::String(t)) if !t.is_empty() => get_secret(&t)?,
            _ => return Ok(None),
        };

        Ok(Some((username, token)))
    }

    fn clear_auth_session(&self) -> Result<()> {
        self.set_value(&["client", "auth", "username"], Value::Null)?;
        self.set_value(&["client", "auth", "token"], Value::Null)
    }

    fn get_theme(&self) -> Result<Option<String>> {
        match self.get_value(&["client", "theme"]) {
            Ok(Value::String(t)) if !t.is_empty() => Ok(Some(t)),
            _ => Ok(None),
        }
    }

    fn set_theme(&self, theme: &str) -> Result<()> {
        self.set_value(&["client", "theme"], Value::String(theme.to_string()))
    }

    fn get_playback_snapshot(&self) -> Result<Option<PlaybackSnapshot>> {
        match self.get_value(&["client", "playback"]) {
            Ok(Value::Null) | Err(_) => Ok(None),
            Ok(value) => match serde_yaml::from_value::<PlaybackSnapshot>(value) {
                Ok(snapshot) => Ok(Some(snapshot)),
                Err(e) => {
                    // A stale or hand-edited snapshot must not block startup
                    tracing::warn!("Discarding unreadable playback snapshot: {}", e);
                    Ok(None)
                }
            },
        }
    }

    fn set_playback_snapshot(&self, snapshot: &PlaybackSnapshot) -> Result<()> {
        let value = serde_yaml::to_value(snapshot)?;
        self.set_value(&["client", "playback"], value)
    }

    fn clear_playback_snapshot(&self) -> Result<()> {
        self.set_value(&["client", "playback"], Value::Null)
    }
}
