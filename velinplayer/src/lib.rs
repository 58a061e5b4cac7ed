//! Playback session control for Velin
//!
//! This crate owns the rules of playback: what happens when an episode is
//! selected, when play/pause toggles, and when the user switches between
//! audio and video presentation. State itself lives in
//! `velinstore::PlayerStore`; this crate is the only writer.

pub mod session;

pub use session::{PlaybackController, PlaybackSession};
