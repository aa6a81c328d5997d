use std::sync::LazyLock;

use eyre::{bail, eyre};
use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;

use crate::config::Endpoints;
use crate::{Error, FetchTarget, Result, Segment, Transcript, VideoId};

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Only English captions are supported
const CAPTION_LANG: &str = "en";

static API_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""INNERTUBE_API_KEY"\s*:\s*"([^"]+)""#).expect("valid regex"));

static API_KEY_FALLBACK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"innertubeApiKey\s*[=:]\s*"([^"]+)""#).expect("valid regex"));

static FORMATTING_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

#[derive(Debug, Deserialize)]
struct InnerTubePlayerResponse {
    captions: Option<CaptionsData>,
}

#[derive(Debug, Deserialize)]
struct CaptionsData {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    player_captions_tracklist_renderer: Option<CaptionTracklistRenderer>,
}

#[derive(Debug, Deserialize)]
struct CaptionTracklistRenderer {
    #[serde(rename = "captionTracks")]
    caption_tracks: Option<Vec<CaptionTrack>>,
}

#[derive(Debug, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode")]
    language_code: String,
}

/// Fetch the English transcript for a video.
///
/// Every failure (no captions, no English track, network, bad XML) collapses
/// into the same transcript fetch error; the cause is only logged.
pub async fn fetch_transcript(client: &reqwest::Client, endpoints: &Endpoints, video_id: &VideoId) -> Result<Transcript> {
    match fetch_segments(client, endpoints, video_id).await {
        Ok(segments) => {
            debug!("Fetched {} caption segments for {video_id}", segments.len());
            Ok(Transcript::from_segments(&segments))
        }
        Err(e) => {
            warn!("Transcript fetch failed for {video_id}: {e:#}");
            Err(Error::fetch(FetchTarget::Transcript, format!("{e:#}")))
        }
    }
}

async fn fetch_segments(client: &reqwest::Client, endpoints: &Endpoints, video_id: &VideoId) -> eyre::Result<Vec<Segment>> {
    let base = endpoints.youtube.trim_end_matches('/');

    // Step 1: Fetch the watch page to get the InnerTube API key
    let watch_url = format!("{base}/watch");
    debug!("Fetching watch page: {watch_url}?v={video_id}");

    let page_html = client
        .get(&watch_url)
        .query(&[("v", video_id.as_str())])
        .header("User-Agent", USER_AGENT)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let api_key = extract_api_key(&page_html)?;
    debug!("Extracted InnerTube API key: {api_key}");

    // Step 2: Call InnerTube player endpoint
    let player_url = format!("{base}/youtubei/v1/player");

    let body = serde_json::json!({
        "context": {
            "client": {
                "hl": CAPTION_LANG,
                "gl": "US",
                "clientName": "WEB",
                "clientVersion": "2.20241126.01.00"
            }
        },
        "videoId": video_id.as_str()
    });

    let resp: InnerTubePlayerResponse = client
        .post(&player_url)
        .query(&[("key", api_key.as_str()), ("prettyPrint", "false")])
        .header("User-Agent", USER_AGENT)
        .json(&body)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let tracks = resp
        .captions
        .and_then(|c| c.player_captions_tracklist_renderer)
        .and_then(|r| r.caption_tracks)
        .unwrap_or_default();

    if tracks.is_empty() {
        bail!("no captions available for video {video_id}");
    }

    let track = select_track(&tracks)?;
    debug!("Using caption track: lang={}", track.language_code);

    // Step 3: Fetch the caption XML
    let caption_xml = client
        .get(&track.base_url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    parse_caption_xml(&caption_xml)
}

fn select_track(tracks: &[CaptionTrack]) -> eyre::Result<&CaptionTrack> {
    tracks
        .iter()
        .find(|t| t.language_code == CAPTION_LANG)
        .ok_or_else(|| {
            let available = tracks
                .iter()
                .map(|t| t.language_code.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            eyre!("no English caption track (available: {available})")
        })
}

fn extract_api_key(html: &str) -> eyre::Result<String> {
    if let Some(caps) = API_KEY_RE.captures(html) {
        return Ok(caps[1].to_string());
    }

    // Fallback: try the newer pattern
    if let Some(caps) = API_KEY_FALLBACK_RE.captures(html) {
        return Ok(caps[1].to_string());
    }

    bail!("could not extract InnerTube API key from watch page");
}

fn parse_caption_xml(xml: &str) -> eyre::Result<Vec<Segment>> {
    use quick_xml::Reader;
    use quick_xml::events::Event;

    let mut reader = Reader::from_str(xml);
    let mut segments = Vec::new();
    let mut in_cue = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"text" => in_cue = true,
            Ok(Event::Text(ref e)) if in_cue => {
                in_cue = false;
                let raw_text = e.unescape().unwrap_or_default().to_string();
                let text = strip_formatting(&html_escape::decode_html_entities(&raw_text));
                if !text.is_empty() {
                    segments.push(Segment { text });
                }
            }
            Ok(Event::End(_)) => in_cue = false,
            Ok(Event::Eof) => break,
            Err(e) => bail!("error parsing caption XML: {e}"),
            _ => {}
        }
    }

    Ok(segments)
}

/// Drop inline markup such as `<font color=...>` and `<i>` from cue text
fn strip_formatting(text: &str) -> String {
    FORMATTING_TAG_RE.replace_all(text, "").into_owned()
}
