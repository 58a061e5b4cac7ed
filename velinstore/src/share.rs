//! Share state store
//!
//! Builds share links for episodes and remembers the last shared one so the
//! UI can confirm the action.

use crate::store::Store;
use crossbeam_channel::Receiver;
use std::sync::Arc;
use velinbackend::Podcast;
use velinconfig::Config;

/// Share state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShareState {
    pub last_shared: Option<Podcast>,
    pub last_link: Option<String>,
}

/// Observable share store
#[derive(Clone)]
pub struct ShareStore {
    state: Store<ShareState>,
    config: Arc<Config>,
}

impl ShareStore {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            state: Store::new(ShareState::default()),
            config,
        }
    }

    pub fn get(&self) -> ShareState {
        self.state.get()
    }

    pub fn subscribe(&self) -> Receiver<ShareState> {
        self.state.subscribe()
    }

    /// Build the share link for an episode
    ///
    /// The link points at the public origin with a `share` query parameter;
    /// the client resolves it into the episode page on load.
    pub fn share_link(&self, podcast: &Podcast) -> String {
        let base = self.config.get_public_base_url();
        format!("{}/?share={}", base.trim_end_matches('/'), podcast.id)
    }

    /// Record the episode as shared and return its link
    pub fn share(&self, podcast: &Podcast) -> String {
        let link = self.share_link(podcast);
        let shared = podcast.clone();
        let link_clone = link.clone();
        self.state.update(|s| {
            s.last_shared = Some(shared);
            s.last_link = Some(link_clone);
        });
        link
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config() -> (Arc<Config>, TempDir) {
        let dir = TempDir::new().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        (Arc::new(config), dir)
    }

    fn podcast(id: &str) -> Podcast {
        Podcast {
            id: id.to_string(),
            title: "Shared".to_string(),
            author: None,
            thumbnail: None,
            duration: None,
            url: None,
        }
    }

    #[test]
    fn test_share_link_shape() {
        let (config, _dir) = test_config();
        config.set_public_base_url("https://velin.example").unwrap();

        let store = ShareStore::new(config);
        let link = store.share_link(&podcast("dQw4w9WgXcQ"));
        assert_eq!(link, "https://velin.example/?share=dQw4w9WgXcQ");
    }

    #[test]
    fn test_share_records_last() {
        let (config, _dir) = test_config();
        config.set_public_base_url("https://velin.example").unwrap();

        let store = ShareStore::new(config);
        let link = store.share(&podcast("abcdefghijk"));

        let state = store.get();
        assert_eq!(state.last_link.as_deref(), Some(link.as_str()));
        assert_eq!(state.last_shared.unwrap().id, "abcdefghijk");
    }
}
