use log::{debug, warn};

use crate::config::Endpoints;
use crate::{ApiKey, Error, GenerationFailure, Result, Summary, Transcript};

pub const MODEL: &str = "gpt-4o-mini-2024-07-18";
pub const MAX_TOKENS: u32 = 1000;
pub const TEMPERATURE: f64 = 0.7;

/// Characters of transcript sent to the model; later text is dropped
pub const TRANSCRIPT_CHAR_LIMIT: usize = 4000;

const SYSTEM_PROMPT: &str = "You are a professional content summarizer skilled in creating well-structured, \
comprehensive summaries with markdown formatting.";

const ARTICLE_PROMPT: &str = "Based on a YouTube transcript, write an eye-catching article for LinkedIn or Medium \
with a question-based title that hooks readers.
Incorporate specific data points, numbers, and structured details to ensure it’s authentic and engaging.
Add your own relevant insights to give the article depth, and use emojis for visual emphasis.
Organize each section to optimize readability and make the entire piece more likely to be shared, bookmarked, and commented on.
Use story telling.
Title and content should be sensational and viral";

/// Generate an article-style summary of a transcript.
///
/// A missing credential fails before any request is made.
pub async fn generate(
    client: &reqwest::Client,
    endpoints: &Endpoints,
    transcript: &Transcript,
    credential: Option<&ApiKey>,
) -> Result<Summary> {
    let Some(api_key) = credential else {
        return Err(Error::Generation {
            reason: GenerationFailure::MissingCredential,
        });
    };

    let body = request_body(transcript);
    let url = format!("{}/v1/chat/completions", endpoints.openai.trim_end_matches('/'));
    debug!("Summarizing via {url} with model {MODEL}");

    let resp = client
        .post(&url)
        .bearer_auth(api_key.expose())
        .json(&body)
        .send()
        .await
        .map_err(|e| {
            warn!("Generation request failed: {e}");
            Error::generation(e)
        })?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        warn!("OpenAI API returned {status}: {body}");
        return Err(Error::generation(format!("OpenAI API returned {status}")));
    }

    let json: serde_json::Value = resp.json().await.map_err(Error::generation)?;
    extract_openai_text(&json).map(Summary::from)
}

fn request_body(transcript: &Transcript) -> serde_json::Value {
    serde_json::json!({
        "model": MODEL,
        "messages": [
            {
                "role": "system",
                "content": SYSTEM_PROMPT
            },
            {
                "role": "user",
                "content": user_message(transcript)
            }
        ],
        "max_tokens": MAX_TOKENS,
        "temperature": TEMPERATURE
    })
}

fn user_message(transcript: &Transcript) -> String {
    format!(
        "{ARTICLE_PROMPT}\n\nTranscript:\n{}",
        truncate_chars(transcript.as_str(), TRANSCRIPT_CHAR_LIMIT)
    )
}

/// First `limit` characters of `s`, never splitting a character
pub fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn extract_openai_text(json: &serde_json::Value) -> Result<String> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|t| t.as_str())
        .map(|text| text.to_string())
        .ok_or_else(|| Error::generation("unexpected OpenAI API response format"))
}
