use chrono::{DateTime, Local};
use log::{debug, info};

use crate::config::Endpoints;
use crate::{ApiKey, Result, Summary, Transcript, VideoId, VideoMetadata};
use crate::{extract_video_id, metadata, summarize, youtube};

/// Everything produced by one run for one video
#[derive(Debug, Clone)]
pub struct Report {
    pub video_id: VideoId,
    pub source_url: String,
    pub metadata: VideoMetadata,
    pub transcript: Transcript,
    pub summary: Summary,
    pub processed_at: DateTime<Local>,
}

/// URL in, summary out. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct Summarizer {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl Summarizer {
    pub fn new(client: reqwest::Client, endpoints: Endpoints) -> Self {
        Summarizer { client, endpoints }
    }

    /// Run the whole pipeline. The first failure ends the run.
    ///
    /// Metadata and transcript are fetched concurrently, but the metadata
    /// result is checked first so it decides which error is reported.
    pub async fn run(&self, url: &str, credential: Option<&ApiKey>) -> Result<Report> {
        let video_id = extract_video_id(url)?;
        info!("Processing video {video_id}");

        let (metadata, transcript) = tokio::join!(
            metadata::fetch_metadata(&self.client, &self.endpoints, &video_id),
            youtube::fetch_transcript(&self.client, &self.endpoints, &video_id),
        );
        let metadata = metadata?;
        let transcript = transcript?;
        debug!(
            "Fetched \"{}\" by {}: {} transcript chars",
            metadata.title,
            metadata.author,
            transcript.as_str().chars().count()
        );

        let summary = summarize::generate(&self.client, &self.endpoints, &transcript, credential).await?;
        info!("Generated summary for {video_id}");

        Ok(Report {
            video_id,
            source_url: url.to_string(),
            metadata,
            transcript,
            summary,
            processed_at: Local::now(),
        })
    }
}
