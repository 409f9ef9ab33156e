//! Transport behavior against a mock server: bearer attachment, the
//! single refresh-and-retry on 401, and error-body extraction.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use srdesk_client::{ApiClient, ClientConfig, ClientError};
use srdesk_core::user::TokenPair;

fn tokens(access: &str, refresh: &str) -> TokenPair {
    TokenPair {
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
        token_type: "Bearer".to_string(),
        expires_in: 3600,
    }
}

fn user_body() -> serde_json::Value {
    json!({
        "id": 1,
        "username": "alice",
        "email": "alice@example.com",
        "role": "USER",
        "createdAt": "2026-01-05T09:00:00Z"
    })
}

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&ClientConfig::new(server.uri(), 5)).unwrap()
}

#[tokio::test]
async fn attaches_bearer_token_to_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.session().set_tokens(tokens("access-1", "refresh-1"));

    let user = client.auth().me().await.unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(client.session().user().unwrap().id, 1);
}

#[tokio::test]
async fn refreshes_once_and_retries_on_401() {
    let server = MockServer::start().await;

    // Expired token is rejected, fresh one accepted.
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({ "refreshToken": "refresh-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "fresh",
            "refreshToken": "refresh-2",
            "tokenType": "Bearer",
            "expiresIn": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.session().set_tokens(tokens("stale", "refresh-1"));

    let user = client.auth().me().await.unwrap();
    assert_eq!(user.username, "alice");
    // The rotated pair is now current.
    assert_eq!(client.session().access_token().as_deref(), Some("fresh"));
    assert_eq!(
        client.session().refresh_token().as_deref(),
        Some("refresh-2")
    );
}

#[tokio::test]
async fn failed_refresh_clears_session_and_reports_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "refresh token revoked"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.session().set_tokens(tokens("stale", "revoked"));

    let err = client.auth().me().await.unwrap_err();
    assert!(matches!(err, ClientError::SessionExpired));
    assert!(!client.session().is_authenticated());
    assert!(client.session().access_token().is_none());
}

#[tokio::test]
async fn missing_refresh_token_short_circuits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    let err = client.auth().me().await.unwrap_err();
    assert!(matches!(err, ClientError::SessionExpired));
}

#[tokio::test]
async fn api_errors_carry_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sr/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "SR not found: 42"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.session().set_tokens(tokens("access-1", "refresh-1"));

    let err = client.sr().get(42).await.unwrap_err();
    let ClientError::Api { status, message } = err else {
        panic!("expected api error, got {err:?}");
    };
    assert_eq!(status, 404);
    assert_eq!(message, "SR not found: 42");
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sr/7"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.session().set_tokens(tokens("access-1", "refresh-1"));

    let err = client.sr().get(7).await.unwrap_err();
    let ClientError::Api { status, message } = err else {
        panic!("expected api error, got {err:?}");
    };
    assert_eq!(status, 500);
    assert_eq!(message, "request failed with status 500");
}
