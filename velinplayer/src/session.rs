//! Playback session control
//!
//! The controller is the single writer of the player store. Selecting an
//! episode commits the audible state synchronously, then resolves the
//! optional video variant in the background. Each selection bumps a
//! generation counter; a resolution that finishes after a newer selection
//! is discarded, so a slow lookup can never attach its video to the wrong
//! episode.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};
use velinbackend::{extract_video_id_from_url, AudioStream, Podcast, VideoResolver};
use velinstore::{PlayerState, PlayerStore};

/// Read-only view of the current session
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    pub podcast: Option<Podcast>,
    pub is_playing: bool,
    pub is_video_mode: bool,
    pub has_video: bool,
}

impl From<PlayerState> for PlaybackSession {
    fn from(state: PlayerState) -> Self {
        Self {
            podcast: state.current,
            is_playing: state.is_playing,
            is_video_mode: state.is_video_mode,
            has_video: state.video_stream.is_some(),
        }
    }
}

/// Drives episode selection and playback flags on the player store
#[derive(Clone)]
pub struct PlaybackController {
    store: PlayerStore,
    resolver: Arc<dyn VideoResolver>,
    generation: Arc<AtomicU64>,
}

impl PlaybackController {
    pub fn new(store: PlayerStore, resolver: Arc<dyn VideoResolver>) -> Self {
        Self {
            store,
            resolver,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Access the underlying store
    pub fn store(&self) -> &PlayerStore {
        &self.store
    }

    /// Current session view
    pub fn session(&self) -> PlaybackSession {
        self.store.get().into()
    }

    /// Select an episode and start playing it
    ///
    /// The audible state (episode, audio stream, playing flag) commits
    /// before this returns; previous video state is cleared in the same
    /// update. Video resolution runs in a background task and commits only
    /// if no newer selection happened in the meantime. A failed or empty
    /// resolution is logged and otherwise ignored, audio keeps playing.
    pub fn select_and_play(&self, podcast: Podcast, audio: AudioStream) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let video_id = podcast
            .url
            .as_deref()
            .and_then(extract_video_id_from_url)
            .or_else(|| extract_video_id_from_url(&podcast.id));

        self.store.begin_playback(podcast, audio);

        let Some(video_id) = video_id else {
            debug!("No video id for selected episode, staying audio-only");
            return;
        };

        let store = self.store.clone();
        let resolver = self.resolver.clone();
        let guard = self.generation.clone();

        tokio::spawn(async move {
            match resolver.resolve_video(&video_id).await {
                Ok(Some(video)) => {
                    // Checked under the store lock so a concurrent selection
                    // cannot land between the check and the commit
                    let committed = store.attach_video_stream(video, || {
                        guard.load(Ordering::SeqCst) == generation
                    });
                    if !committed {
                        debug!("Discarding stale video resolution for {}", video_id);
                    }
                }
                Ok(None) => {
                    debug!("No video variant available for {}", video_id);
                }
                Err(e) => {
                    warn!("Video resolution failed for {}: {}", video_id, e);
                }
            }
        });
    }

    /// Toggle the playing flag
    ///
    /// No-op while no episode is selected.
    pub fn toggle_play(&self) {
        let state = self.store.get();
        if state.current.is_some() {
            self.store.set_is_playing(!state.is_playing);
        }
    }

    /// Toggle between audio and video presentation
    ///
    /// Only possible once a video stream has been resolved; returns whether
    /// video mode is now active.
    pub fn toggle_video_mode(&self) -> bool {
        let state = self.store.get();
        if state.video_stream.is_none() {
            return false;
        }
        let next = !state.is_video_mode;
        self.store.set_video_mode(next);
        next
    }
}
