//! Data models for the podcast backend
//!
//! Most proxy endpoints forward the upstream JSON verbatim as
//! `serde_json::Value`; the typed models here cover the pieces the rest of
//! the application needs to reason about, chiefly playback.

use serde::{Deserialize, Serialize};

/// A podcast episode as surfaced by search and channel listings
///
/// Only the fields the player and the stores care about are typed; any extra
/// upstream fields are dropped on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Podcast {
    /// Upstream video id (11-character identifier)
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<u64>,
    /// Original watch URL, when the upstream provides one
    #[serde(default)]
    pub url: Option<String>,
}

/// A resolved audio stream for an episode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AudioStream {
    pub url: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub bitrate: Option<u64>,
}

/// Raw response of the upstream video resolution endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoStreamResponse {
    pub status: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
}

/// A playable video stream with derived display properties
///
/// The upstream only reports a URL and a quality label; the dimensions,
/// codec and bitrate are derived locally so the player always has a
/// complete description to work with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoStream {
    pub url: String,
    pub quality: String,
    pub width: u32,
    pub height: u32,
    pub bitrate: u64,
    pub content_length: u64,
    pub mime_type: String,
    pub codec: String,
}

impl VideoStream {
    /// Default quality label used when the upstream omits one
    pub const DEFAULT_QUALITY: &'static str = "480p";

    /// Build a stream description from a URL and an optional quality label
    ///
    /// The height is parsed from the quality label ("720p" -> 720) and the
    /// width derived assuming a 16:9 aspect ratio, rounded to the nearest
    /// even pixel (480p -> 854, the conventional width).
    pub fn from_resolution(url: impl Into<String>, quality: Option<&str>) -> Self {
        let quality = quality
            .filter(|q| !q.is_empty())
            .unwrap_or(Self::DEFAULT_QUALITY)
            .to_string();

        let height: u32 = quality
            .trim_end_matches('p')
            .parse()
            .unwrap_or(480);
        let width = ((height as f64 * 16.0 / 9.0) / 2.0).round() as u32 * 2;

        Self {
            url: url.into(),
            quality,
            width,
            height,
            bitrate: 1_000_000,
            content_length: 0,
            mime_type: "video/mp4".to_string(),
            codec: "h264".to_string(),
        }
    }
}
