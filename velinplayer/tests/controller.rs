//! Playback controller behavior tests
//!
//! Video resolution is mocked with configurable delays so the stale-commit
//! protection can be exercised deterministically.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use velinbackend::{AudioStream, Podcast, Result, VideoResolver, VideoStream};
use velinplayer::PlaybackController;
use velinstore::PlayerStore;

struct MockResolver {
    delay: Duration,
    fail: bool,
}

#[async_trait]
impl VideoResolver for MockResolver {
    async fn resolve_video(&self, video_id: &str) -> Result<Option<VideoStream>> {
        sleep(self.delay).await;
        if self.fail {
            return Err(velinbackend::Error::other("resolver down"));
        }
        Ok(Some(VideoStream::from_resolution(
            format!("https://cdn.example/{}.mp4", video_id),
            Some("720p"),
        )))
    }
}

fn podcast(id: &str) -> Podcast {
    Podcast {
        id: id.to_string(),
        title: format!("Episode {}", id),
        author: None,
        thumbnail: None,
        duration: None,
        url: Some(format!("https://www.youtube.com/watch?v={}", id)),
    }
}

fn audio(url: &str) -> AudioStream {
    AudioStream {
        url: url.to_string(),
        mime_type: Some("audio/mp4".to_string()),
        bitrate: None,
    }
}

/// Poll the store until the predicate holds or the deadline passes
async fn wait_for<F>(store: &PlayerStore, predicate: F) -> bool
where
    F: Fn(&velinstore::PlayerState) -> bool,
{
    for _ in 0..100 {
        if predicate(&store.get()) {
            return true;
        }
        sleep(Duration::from_millis(10)).await;
    }
    false
}

#[tokio::test]
async fn audible_state_commits_synchronously() {
    let store = PlayerStore::new();
    let controller = PlaybackController::new(
        store.clone(),
        Arc::new(MockResolver {
            delay: Duration::from_secs(10),
            fail: false,
        }),
    );

    controller.select_and_play(podcast("aaaaaaaaaaa"), audio("https://cdn.example/a.m4a"));

    // Before the resolver finishes, audio is already playing and video is clear
    let state = store.get();
    assert!(state.is_playing);
    assert_eq!(state.current.as_ref().unwrap().id, "aaaaaaaaaaa");
    assert!(state.video_stream.is_none());
    assert!(!state.is_video_mode);
}

#[tokio::test]
async fn video_resolution_commits_in_background() {
    let store = PlayerStore::new();
    let controller = PlaybackController::new(
        store.clone(),
        Arc::new(MockResolver {
            delay: Duration::from_millis(20),
            fail: false,
        }),
    );

    controller.select_and_play(podcast("aaaaaaaaaaa"), audio("https://cdn.example/a.m4a"));

    assert!(wait_for(&store, |s| s.video_stream.is_some()).await);
    let video = store.get().video_stream.unwrap();
    assert!(video.url.contains("aaaaaaaaaaa"));
}

#[tokio::test]
async fn stale_resolution_is_discarded() {
    let store = PlayerStore::new();

    // Both selections resolve after the same delay; only the newest
    // generation is allowed to commit.
    let slow = PlaybackController::new(
        store.clone(),
        Arc::new(MockResolver {
            delay: Duration::from_millis(200),
            fail: false,
        }),
    );

    slow.select_and_play(podcast("aaaaaaaaaaa"), audio("https://cdn.example/a.m4a"));
    slow.select_and_play(podcast("bbbbbbbbbbb"), audio("https://cdn.example/b.m4a"));

    // Let both resolutions finish
    sleep(Duration::from_millis(400)).await;

    let state = store.get();
    assert_eq!(state.current.as_ref().unwrap().id, "bbbbbbbbbbb");
    // Only the newest selection's video may be attached
    let video = state.video_stream.expect("newest video should commit");
    assert!(video.url.contains("bbbbbbbbbbb"));
}

#[tokio::test]
async fn failed_resolution_keeps_audio_playing() {
    let store = PlayerStore::new();
    let controller = PlaybackController::new(
        store.clone(),
        Arc::new(MockResolver {
            delay: Duration::from_millis(10),
            fail: true,
        }),
    );

    controller.select_and_play(podcast("aaaaaaaaaaa"), audio("https://cdn.example/a.m4a"));
    sleep(Duration::from_millis(100)).await;

    let state = store.get();
    assert!(state.is_playing);
    assert!(state.video_stream.is_none());
}

#[tokio::test]
async fn toggle_play_requires_selection() {
    let store = PlayerStore::new();
    let controller = PlaybackController::new(
        store.clone(),
        Arc::new(MockResolver {
            delay: Duration::from_millis(1),
            fail: false,
        }),
    );

    controller.toggle_play();
    assert!(!store.get().is_playing);

    controller.select_and_play(podcast("aaaaaaaaaaa"), audio("https://cdn.example/a.m4a"));
    assert!(store.get().is_playing);

    controller.toggle_play();
    assert!(!store.get().is_playing);
}

#[tokio::test]
async fn video_mode_requires_resolved_video() {
    let store = PlayerStore::new();
    let controller = PlaybackController::new(
        store.clone(),
        Arc::new(MockResolver {
            delay: Duration::from_millis(20),
            fail: false,
        }),
    );

    controller.select_and_play(podcast("aaaaaaaaaaa"), audio("https://cdn.example/a.m4a"));

    // No video yet: toggling must refuse
    assert!(!controller.toggle_video_mode());
    assert!(!store.get().is_video_mode);

    assert!(wait_for(&store, |s| s.video_stream.is_some()).await);

    assert!(controller.toggle_video_mode());
    assert!(store.get().is_video_mode);
    assert!(!controller.toggle_video_mode());
}

#[tokio::test]
async fn new_selection_resets_video_mode() {
    let store = PlayerStore::new();
    let controller = PlaybackController::new(
        store.clone(),
        Arc::new(MockResolver {
            delay: Duration::from_millis(10),
            fail: false,
        }),
    );

    controller.select_and_play(podcast("aaaaaaaaaaa"), audio("https://cdn.example/a.m4a"));
    assert!(wait_for(&store, |s| s.video_stream.is_some()).await);
    controller.toggle_video_mode();
    assert!(store.get().is_video_mode);

    controller.select_and_play(podcast("bbbbbbbbbbb"), audio("https://cdn.example/b.m4a"));
    let state = store.get();
    assert!(!state.is_video_mode);
    assert!(state.video_stream.is_none());
}
