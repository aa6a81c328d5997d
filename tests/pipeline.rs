use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ytsum::config::Endpoints;
use ytsum::pipeline::Summarizer;
use ytsum::{ApiKey, Error, FetchTarget, GenerationFailure};

const WATCH_PAGE: &str = r#"<html><script>ytcfg.set({"INNERTUBE_API_KEY":"test-key"});</script></html>"#;

async fn mount_metadata(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_captions(server: &MockServer, xml: &str) {
    Mock::given(method("GET"))
        .and(path("/watch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WATCH_PAGE))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/youtubei/v1/player"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "captions": {
                "playerCaptionsTracklistRenderer": {
                    "captionTracks": [
                        { "baseUrl": format!("{}/api/timedtext", server.uri()), "languageCode": "en" }
                    ]
                }
            }
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml))
        .mount(server)
        .await;
}

async fn mount_completion(server: &MockServer, content: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn summarizer(server: &MockServer) -> Summarizer {
    Summarizer::new(reqwest::Client::new(), Endpoints::all(&server.uri()))
}

#[tokio::test]
async fn test_full_run() {
    let server = MockServer::start().await;
    mount_metadata(&server, serde_json::json!({})).await;
    mount_captions(
        &server,
        r#"<transcript><text start="0" dur="1">Hello</text><text start="1" dur="1">world</text></transcript>"#,
    )
    .await;
    mount_completion(&server, "# What did they say?\n\nHello world.", 1).await;

    let key = ApiKey::new("sk-test");
    let report = summarizer(&server)
        .run("https://www.youtube.com/watch?v=abc123&t=5s", key.as_ref())
        .await
        .unwrap();

    assert_eq!(report.video_id.as_str(), "abc123");
    assert_eq!(report.metadata.title, "Unknown Title");
    assert_eq!(report.metadata.author, "Unknown Author");
    assert_eq!(
        report.metadata.thumbnail_url,
        "https://img.youtube.com/vi/abc123/maxresdefault.jpg"
    );
    assert_eq!(report.transcript.as_str(), "Hello world");
    assert_eq!(report.summary.as_str(), "# What did they say?\n\nHello world.");
    assert_eq!(report.source_url, "https://www.youtube.com/watch?v=abc123&t=5s");
}

#[tokio::test]
async fn test_invalid_url_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let key = ApiKey::new("sk-test");
    let err = summarizer(&server)
        .run("https://example.com/video/abc123", key.as_ref())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
}

#[tokio::test]
async fn test_caption_failure_halts_before_generation() {
    let server = MockServer::start().await;
    mount_metadata(&server, serde_json::json!({ "title": "T", "author_name": "A" })).await;
    Mock::given(method("GET"))
        .and(path("/watch"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_completion(&server, "unused", 0).await;

    let key = ApiKey::new("sk-test");
    let err = summarizer(&server)
        .run("https://youtu.be/abc123", key.as_ref())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Fetch {
            what: FetchTarget::Transcript,
            ..
        }
    ));
}

#[tokio::test]
async fn test_metadata_error_reported_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/watch"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_completion(&server, "unused", 0).await;

    let key = ApiKey::new("sk-test");
    let err = summarizer(&server)
        .run("https://www.youtube.com/embed/abc123", key.as_ref())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Fetch {
            what: FetchTarget::Metadata,
            ..
        }
    ));
}

#[tokio::test]
async fn test_missing_credential_skips_generation() {
    let server = MockServer::start().await;
    mount_metadata(&server, serde_json::json!({})).await;
    mount_captions(&server, r#"<transcript><text start="0" dur="1">Hi</text></transcript>"#).await;
    mount_completion(&server, "unused", 0).await;

    let err = summarizer(&server)
        .run("https://youtu.be/abc123", ApiKey::new("  ").as_ref())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Generation {
            reason: GenerationFailure::MissingCredential
        }
    ));
}
