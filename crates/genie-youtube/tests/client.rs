//! Integration tests for `YoutubeClient` using wiremock HTTP mocks.

use genie_youtube::{YoutubeClient, YoutubeError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> YoutubeClient {
    YoutubeClient::with_base_url("test-key", 30, "genie-test", base_url)
        .expect("client construction should not fail")
}

fn thread(id: &str, text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "snippet": {
            "videoId": "vid1",
            "topLevelComment": {
                "id": format!("{id}-c"),
                "snippet": {
                    "textDisplay": text,
                    "authorDisplayName": "someone",
                    "likeCount": 2
                }
            },
            "totalReplyCount": 0
        }
    })
}

#[tokio::test]
async fn get_video_returns_metadata() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [{
            "id": "vid1",
            "snippet": {
                "title": "Launch day",
                "description": "All about it",
                "channelTitle": "Genie Channel"
            },
            "statistics": { "viewCount": "1200", "commentCount": "42" }
        }]
    });

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("key", "test-key"))
        .and(query_param("id", "vid1"))
        .and(query_param("part", "snippet,statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let video = client.get_video("vid1").await.expect("should parse video");

    assert_eq!(video.id, "vid1");
    assert_eq!(video.snippet.title, "Launch day");
    assert_eq!(video.snippet.channel_title, "Genie Channel");
    assert_eq!(video.statistics.comment_count, 42);
}

#[tokio::test]
async fn get_video_with_no_items_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_video("missing").await.unwrap_err();
    assert!(
        matches!(err, YoutubeError::VideoNotFound(ref id) if id == "missing"),
        "expected VideoNotFound, got {err:?}"
    );
}

#[tokio::test]
async fn get_comment_threads_first_page_has_no_token() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "nextPageToken": "page-2",
        "items": [thread("t1", "First!"), thread("t2", "Is this real?")]
    });

    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .and(query_param("videoId", "vid1"))
        .and(query_param("maxResults", "100"))
        .and(query_param("part", "snippet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .get_comment_threads("vid1", None, 250)
        .await
        .expect("should parse page");

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[1].text_display(), "Is this real?");
    assert_eq!(page.next_page_token.as_deref(), Some("page-2"));

    let requests = server.received_requests().await.unwrap();
    assert!(
        !requests[0].url.as_str().contains("pageToken"),
        "first page must not send a pageToken"
    );
}

#[tokio::test]
async fn get_comment_threads_forwards_page_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .and(query_param("pageToken", "page-2"))
        .and(query_param("maxResults", "25"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "items": [thread("t3", "last one")] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .get_comment_threads("vid1", Some("page-2"), 25)
        .await
        .expect("should parse page");

    assert_eq!(page.items.len(), 1);
    assert!(page.next_page_token.is_none());
}

#[tokio::test]
async fn api_error_envelope_is_surfaced() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {
            "code": 403,
            "message": "The video identified by the videoId parameter has disabled comments.",
            "errors": [{ "reason": "commentsDisabled" }]
        }
    });

    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .respond_with(ResponseTemplate::new(403).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .get_comment_threads("vid1", None, 100)
        .await
        .unwrap_err();

    match err {
        YoutubeError::Api { status, message } => {
            assert_eq!(status, 403);
            assert!(message.contains("disabled comments"), "message: {message}");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_video("vid1").await.unwrap_err();
    assert!(
        matches!(err, YoutubeError::Api { status: 502, .. }),
        "expected Api(502), got {err:?}"
    );
}

#[tokio::test]
async fn malformed_success_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .get_comment_threads("vid1", None, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, YoutubeError::Deserialize { .. }), "got {err:?}");
}
