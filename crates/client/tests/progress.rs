//! End-to-end job watching against a mock server.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use srdesk_client::poll::PollEvent;
use srdesk_client::progress::{await_summary, request_summary, watch_embedding, SummaryOutcome};
use srdesk_client::{ApiClient, ClientConfig, ClientError};

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&ClientConfig::new(server.uri(), 5)).unwrap()
}

#[tokio::test]
async fn cached_summary_short_circuits_without_polling() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/wiki/search/summary/7"))
        .and(query_param("forceRegenerate", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documentId": 7,
            "summary": "VPN setup in three steps.",
            "status": "CACHED"
        })))
        .expect(1)
        .mount(&server)
        .await;
    // No status mock is mounted: the ready path must not poll.

    let client = client_for(&server).await;
    let outcome = request_summary(&client, 7, false).await.unwrap();

    let SummaryOutcome::Ready(summary) = outcome else {
        panic!("expected ready summary");
    };
    assert_eq!(summary.summary.as_deref(), Some("VPN setup in three steps."));
}

#[tokio::test]
async fn generating_summary_polls_status_until_done() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/wiki/search/summary/7"))
        .and(query_param("forceRegenerate", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documentId": 7,
            "status": "GENERATING"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wiki/search/summary/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documentId": 7,
            "status": "GENERATING"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wiki/search/summary/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documentId": 7,
            "summary": "Fresh summary.",
            "status": "GENERATED"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let outcome = request_summary(&client, 7, true).await.unwrap();

    let SummaryOutcome::Generating(subscription) = outcome else {
        panic!("expected generating outcome");
    };
    let summary = await_summary(subscription).await.unwrap();
    assert_eq!(summary.summary.as_deref(), Some("Fresh summary."));
}

#[tokio::test]
async fn failed_summary_surfaces_the_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/wiki/search/summary/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documentId": 7,
            "status": "FAILED",
            "message": "model unavailable"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let outcome = request_summary(&client, 7, false).await.unwrap();

    let SummaryOutcome::Failed { message } = outcome else {
        panic!("expected failed outcome");
    };
    assert_eq!(message, "model unavailable");
}

#[tokio::test]
async fn embedding_watch_rides_out_missing_progress() {
    let server = MockServer::start().await;
    // First poll: no active job yet (404 maps to a pending step).
    Mock::given(method("GET"))
        .and(path("/wiki/search/embeddings/progress/current/3"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "no active job"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wiki/search/embeddings/progress/current/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documentId": 3,
            "status": "IN_PROGRESS",
            "currentChunk": 4,
            "totalChunks": 10,
            "progressPercent": 40
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wiki/search/embeddings/progress/current/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documentId": 3,
            "status": "COMPLETED",
            "currentChunk": 10,
            "totalChunks": 10,
            "progressPercent": 100
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut subscription = watch_embedding(&client, 3);

    let mut events = Vec::new();
    while let Some(event) = subscription.next_event().await {
        events.push(event);
    }

    assert!(matches!(
        events.first(),
        Some(PollEvent::Progress(p)) if p.progress_percent == 40
    ));
    assert!(matches!(
        events.last(),
        Some(PollEvent::Completed(p)) if p.progress_percent == 100
    ));
}

#[tokio::test]
async fn summary_job_failure_maps_to_job_failed_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/wiki/search/summary/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documentId": 9,
            "status": "GENERATING"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wiki/search/summary/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documentId": 9,
            "status": "FAILED",
            "message": "context too large"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let SummaryOutcome::Generating(subscription) =
        request_summary(&client, 9, false).await.unwrap()
    else {
        panic!("expected generating outcome");
    };

    let err = await_summary(subscription).await.unwrap_err();
    assert!(matches!(err, ClientError::JobFailed(message) if message == "context too large"));
}
