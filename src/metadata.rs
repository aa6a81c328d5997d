use log::{debug, warn};
use serde::Deserialize;

use crate::config::Endpoints;
use crate::{Error, FetchTarget, Result, VideoId, VideoMetadata};

const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_AUTHOR: &str = "Unknown Author";

#[derive(Debug, Deserialize)]
struct EmbedInfo {
    title: Option<String>,
    author_name: Option<String>,
}

/// Fetch title and creator from the noembed oEmbed proxy.
///
/// The HTTP status is not checked: noembed reports unknown videos as a JSON
/// body with an `error` field, which resolves to the placeholder strings.
pub async fn fetch_metadata(client: &reqwest::Client, endpoints: &Endpoints, video_id: &VideoId) -> Result<VideoMetadata> {
    let url = format!("{}/embed", endpoints.noembed.trim_end_matches('/'));
    debug!("Fetching video info: {url} for {video_id}");

    let body = get_body(client, &url, video_id).await.map_err(|e| {
        warn!("Metadata request failed for {video_id}: {e}");
        Error::fetch(FetchTarget::Metadata, e)
    })?;

    let info = parse_embed_info(&body).map_err(|e| {
        warn!("Metadata response for {video_id} was not valid JSON: {e}");
        Error::fetch(FetchTarget::Metadata, e)
    })?;

    Ok(build_metadata(video_id, info))
}

async fn get_body(client: &reqwest::Client, url: &str, video_id: &VideoId) -> reqwest::Result<String> {
    let resp = client.get(url).query(&[("url", video_id.watch_url())]).send().await?;
    debug!("noembed responded {}", resp.status());
    resp.text().await
}

fn parse_embed_info(body: &str) -> serde_json::Result<EmbedInfo> {
    serde_json::from_str(body)
}

fn build_metadata(video_id: &VideoId, info: EmbedInfo) -> VideoMetadata {
    VideoMetadata {
        title: info.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        author: info.author_name.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        thumbnail_url: thumbnail_url(video_id),
    }
}

/// Max-resolution thumbnail; existence is not checked
pub fn thumbnail_url(video_id: &VideoId) -> String {
    format!("https://img.youtube.com/vi/{video_id}/maxresdefault.jpg")
}
