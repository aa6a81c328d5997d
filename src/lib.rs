pub mod config;
pub mod error;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod summarize;
pub mod youtube;

use std::sync::LazyLock;

use regex::Regex;

pub use error::{Error, FetchTarget, GenerationFailure, Result};

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)")
        .expect("video id pattern is a valid regex")
});

/// Opaque token naming one hosted video
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Title, creator and thumbnail of a video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub author: String,
    pub thumbnail_url: String,
}

/// Text of a single caption cue; timing is not kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
}

/// Caption text for a video, fragments joined in order with timing dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript(String);

impl Transcript {
    pub fn from_segments(segments: &[Segment]) -> Self {
        Transcript(
            segments
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Transcript {
    fn from(s: &str) -> Self {
        Transcript(s.to_string())
    }
}

/// Generated Markdown summary, returned exactly as the model wrote it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary(String);

impl Summary {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Summary {
    fn from(s: String) -> Self {
        Summary(s)
    }
}

/// Credential for the text-generation service. Never logged.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for an empty or whitespace-only key
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        let key = key.trim();
        if key.is_empty() {
            None
        } else {
            Some(ApiKey(key.to_string()))
        }
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// Extract video ID from standard watch, short and embed YouTube URLs
pub fn extract_video_id(input: &str) -> Result<VideoId> {
    VIDEO_ID_RE
        .captures(input)
        .map(|caps| VideoId(caps[1].to_string()))
        .ok_or_else(|| Error::InvalidInput {
            input: input.to_string(),
        })
}
