//! Incoming share link resolution
//!
//! A share link carries the episode id in a `share` query parameter. On
//! startup the resolver inspects the launch URL once and navigates to the
//! episode page; repeated calls and malformed URLs are ignored so a bad
//! link can never break the launch.

use crate::navigation::NavigationBridge;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;
use url::Url;

/// One-shot resolver for `?share=` launch URLs
pub struct ShareLinkResolver {
    bridge: NavigationBridge,
    consumed: AtomicBool,
}

impl ShareLinkResolver {
    pub fn new(bridge: NavigationBridge) -> Self {
        Self {
            bridge,
            consumed: AtomicBool::new(false),
        }
    }

    /// Extract the shared episode id from a launch URL
    pub fn extract_share_id(launch_url: &str) -> Option<String> {
        let url = Url::parse(launch_url).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "share")
            .map(|(_, value)| value.into_owned())
            .filter(|id| !id.is_empty())
    }

    /// Resolve the launch URL, navigating at most once
    ///
    /// Returns the shared id when navigation happened. Malformed URLs are
    /// logged and swallowed.
    pub fn resolve(&self, launch_url: &str) -> Option<String> {
        if self.consumed.swap(true, Ordering::SeqCst) {
            return None;
        }

        match Self::extract_share_id(launch_url) {
            Some(id) => {
                self.bridge.navigate(&format!("/podcast/{}", id));
                Some(id)
            }
            None => {
                if !launch_url.is_empty() && Url::parse(launch_url).is_err() {
                    warn!("Ignoring malformed launch URL: {}", launch_url);
                }
                None
            }
        }
    }
}
