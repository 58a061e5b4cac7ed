//! Player state store
//!
//! Holds the currently selected episode, its resolved streams and the
//! playing/video-mode flags. The playback controller mutates this store;
//! UI surfaces subscribe to it.

use crate::config_ext::StoreConfigExt;
use crate::store::Store;
use chrono::{DateTime, Utc};
use crossbeam_channel::Receiver;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use velinbackend::{AudioStream, Podcast, VideoStream};
use velinconfig::Config;

/// Complete player state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerState {
    pub current: Option<Podcast>,
    pub audio_stream: Option<AudioStream>,
    pub video_stream: Option<VideoStream>,
    pub is_playing: bool,
    pub is_video_mode: bool,
}

/// What survives a restart: the episode and the video-mode preference
///
/// Streams are deliberately not persisted, they expire and must be resolved
/// again on the next launch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    pub podcast: Podcast,
    pub is_video_mode: bool,
    pub saved_at: DateTime<Utc>,
}

/// Observable player store
#[derive(Clone, Default)]
pub struct PlayerStore {
    state: Store<PlayerState>,
}

impl PlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store hydrated from the persisted snapshot, if any
    ///
    /// The restored episode comes back paused with no streams; resolution
    /// happens when the user hits play again.
    pub fn hydrated(config: &Arc<Config>) -> Self {
        let store = Self::new();

        if let Ok(Some(snapshot)) = config.get_playback_snapshot() {
            store.state.set(PlayerState {
                current: Some(snapshot.podcast),
                audio_stream: None,
                video_stream: None,
                is_playing: false,
                is_video_mode: snapshot.is_video_mode,
            });
        }

        store
    }

    pub fn get(&self) -> PlayerState {
        self.state.get()
    }

    pub fn subscribe(&self) -> Receiver<PlayerState> {
        self.state.subscribe()
    }

    pub fn set_current_podcast(&self, podcast: Option<Podcast>) {
        self.state.update(|s| s.current = podcast);
    }

    pub fn set_audio_stream(&self, stream: Option<AudioStream>) {
        self.state.update(|s| s.audio_stream = stream);
    }

    pub fn set_video_stream(&self, stream: Option<VideoStream>) {
        self.state.update(|s| s.video_stream = stream);
    }

    /// Attach a resolved video stream if `permitted` still holds
    ///
    /// The check runs under the state lock, so a selection committed
    /// concurrently cannot slip in between the check and the attach.
    /// Returns whether the stream was attached.
    pub fn attach_video_stream<F>(&self, stream: VideoStream, permitted: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        self.state.update_if(|s| {
            if permitted() {
                s.video_stream = Some(stream);
                true
            } else {
                false
            }
        })
    }

    pub fn set_is_playing(&self, playing: bool) {
        self.state.update(|s| s.is_playing = playing);
    }

    pub fn set_video_mode(&self, video_mode: bool) {
        self.state.update(|s| s.is_video_mode = video_mode);
    }

    /// Apply all the state changes of starting a new episode at once
    ///
    /// Sets the episode and its audio stream, marks playback active, and
    /// clears any previous video stream and video mode. Subscribers see a
    /// single consistent update.
    pub fn begin_playback(&self, podcast: Podcast, audio: AudioStream) {
        self.state.update(|s| {
            s.current = Some(podcast);
            s.audio_stream = Some(audio);
            s.is_playing = true;
            s.video_stream = None;
            s.is_video_mode = false;
        });
    }

    /// Persist the current episode and video-mode flag
    ///
    /// Does nothing when no episode is selected.
    pub fn save_snapshot(&self, config: &Arc<Config>) -> anyhow::Result<()> {
        let state = self.get();
        match state.current {
            Some(podcast) => config.set_playback_snapshot(&PlaybackSnapshot {
                podcast,
                is_video_mode: state.is_video_mode,
                saved_at: Utc::now(),
            }),
            None => Ok(()),
        }
    }
}
