use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod youtube;

pub use youtube::YoutubeTranscriptFetcher;

/// One timed unit of caption text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    /// Caption text
    pub text: String,

    /// Start time in seconds
    pub start: f64,

    /// Duration in seconds
    pub duration: f64,
}

/// An ordered caption transcript for one video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Video the transcript belongs to
    pub video_id: String,

    /// Language code of the caption track, if known
    pub language: Option<String>,

    /// Caption snippets in original order
    pub snippets: Vec<Snippet>,
}

impl Transcript {
    /// Join all snippet texts with single spaces, preserving order
    pub fn text(&self) -> String {
        self.snippets
            .iter()
            .map(|snippet| snippet.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

/// Errors from transcript acquisition
#[derive(thiserror::Error, Debug)]
pub enum TranscriptError {
    #[error("Video not found: {0}")]
    NotFound(String),

    #[error("Captions are disabled for video: {0}")]
    CaptionsDisabled(String),

    #[error("Video {video_id} is unavailable: {reason}")]
    Unavailable { video_id: String, reason: String },

    #[error("Transcript request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected transcript payload: {0}")]
    Malformed(String),
}

/// Trait for fetching transcripts, so the orchestrator can be tested
/// against a double instead of the network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript for a video id
    async fn fetch(&self, video_id: &str) -> Result<Transcript, TranscriptError>;
}
