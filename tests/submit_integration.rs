//! End-to-end submission pass tests: real queue files, mock Wayback server.

use std::collections::HashSet;
use std::time::Duration;

use tempfile::TempDir;
use wayback_utils::{SubmitEngine, UrlSetFile, WaybackClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn set_of(urls: &[&str]) -> HashSet<String> {
    urls.iter().map(ToString::to_string).collect()
}

fn availability_body(archived: bool) -> serde_json::Value {
    if archived {
        serde_json::json!({
            "archived_snapshots": {
                "closest": { "available": true, "url": "http://web.archive.org/web/1/x" }
            }
        })
    } else {
        serde_json::json!({ "archived_snapshots": {} })
    }
}

/// Scenario: u1 already archived, u2 submits successfully. Both end up in
/// the submitted history and the queue drains.
#[tokio::test]
async fn test_pass_archives_pending_urls_and_drains_queue() {
    let server = MockServer::start().await;
    let u1 = "https://x/u1";
    let u2 = "https://x/u2";

    Mock::given(method("GET"))
        .and(path("/wayback/available"))
        .and(query_param("url", u1))
        .respond_with(ResponseTemplate::new(200).set_body_json(availability_body(true)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wayback/available"))
        .and(query_param("url", u2))
        .respond_with(ResponseTemplate::new(200).set_body_json(availability_body(false)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/save"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let to_submit = UrlSetFile::new(dir.path().join("urls_to_submit.txt"));
    let submitted = UrlSetFile::new(dir.path().join("urls_submitted.txt"));
    to_submit.save(&set_of(&[u1, u2])).unwrap();

    let archive = WaybackClient::with_base_urls(server.uri(), server.uri()).unwrap();
    let outcome = SubmitEngine::new(&archive, &to_submit, &submitted)
        .with_delay(Duration::ZERO)
        .submit_pending()
        .await
        .unwrap();

    assert_eq!(outcome.submitted, 2);
    assert_eq!(outcome.failed, 0);
    assert_eq!(submitted.load().unwrap(), set_of(&[u1, u2]));
    assert!(to_submit.load().unwrap().is_empty());
}

/// Scenario: the queued URL is already in the submitted history, so the
/// pass makes no remote calls at all.
#[tokio::test]
async fn test_pass_with_fully_submitted_queue_makes_no_calls() {
    let server = MockServer::start().await;
    // Any request reaching the server is a failure.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let to_submit = UrlSetFile::new(dir.path().join("urls_to_submit.txt"));
    let submitted = UrlSetFile::new(dir.path().join("urls_submitted.txt"));
    to_submit.save(&set_of(&["https://x/u1"])).unwrap();
    submitted.save(&set_of(&["https://x/u1"])).unwrap();

    let archive = WaybackClient::with_base_urls(server.uri(), server.uri()).unwrap();
    let outcome = SubmitEngine::new(&archive, &to_submit, &submitted)
        .with_delay(Duration::ZERO)
        .submit_pending()
        .await
        .unwrap();

    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.submitted, 0);
    assert_eq!(submitted.load().unwrap(), set_of(&["https://x/u1"]));
    assert!(to_submit.load().unwrap().is_empty());
}

/// A URL whose save request is rejected stays queued for the next pass.
#[tokio::test]
async fn test_rejected_save_keeps_url_queued() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wayback/available"))
        .respond_with(ResponseTemplate::new(200).set_body_json(availability_body(false)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/save"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let to_submit = UrlSetFile::new(dir.path().join("urls_to_submit.txt"));
    let submitted = UrlSetFile::new(dir.path().join("urls_submitted.txt"));
    to_submit.save(&set_of(&["https://x/u1"])).unwrap();

    let archive = WaybackClient::with_base_urls(server.uri(), server.uri()).unwrap();
    let outcome = SubmitEngine::new(&archive, &to_submit, &submitted)
        .with_delay(Duration::ZERO)
        .submit_pending()
        .await
        .unwrap();

    assert_eq!(outcome.failed, 1);
    assert_eq!(to_submit.load().unwrap(), set_of(&["https://x/u1"]));
    assert!(submitted.load().unwrap().is_empty());
}
