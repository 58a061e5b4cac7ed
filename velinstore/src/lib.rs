//! Application state stores for Velin
//!
//! Each store wraps a [`Store`] cell: one mutex-guarded
//! value plus change broadcasting over crossbeam channels. Stores that
//! outlive a restart (auth session, theme, playback snapshot) persist
//! through the [`StoreConfigExt`] extension on `velinconfig::Config`.
//!
//! # Stores
//!
//! - [`AuthStore`]: sign-in state, session persisted with the token
//!   encrypted at rest
//! - [`PlayerStore`]: current episode, resolved streams, playing and
//!   video-mode flags
//! - [`SearchStore`]: last query and results, with stale-result protection
//! - [`ThemeStore`]: light/dark/system choice and effective resolution
//! - [`ShareStore`]: share link construction and last shared episode

pub mod auth;
pub mod config_ext;
pub mod player;
pub mod search;
pub mod share;
pub mod store;
pub mod theme;

pub use auth::{AuthState, AuthStore};
pub use config_ext::StoreConfigExt;
pub use player::{PlaybackSnapshot, PlayerState, PlayerStore};
pub use search::{SearchState, SearchStore};
pub use share::{ShareState, ShareStore};
pub use store::Store;
pub use theme::{Theme, ThemeStore};
