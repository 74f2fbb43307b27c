//! Client-credentials authentication tests.
//!
//! Uses wiremock to stand in for the token endpoint.

use hoopla::{HooplaClient, HooplaError};
use serde_json::json;
use wiremock::matchers::{basic_auth, bearer_token, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_authenticate_uses_client_credentials_grant() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(basic_auth("client-id", "client-secret"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "issued-token",
            "token_type": "bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(bearer_token("issued-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "href": format!("{}/", server.uri()),
            "links": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HooplaClient::authenticate("client-id", "client-secret", &server.uri())
        .await
        .unwrap();

    assert!(client.expires_at().is_some());
    assert!(!client.token_expired());

    // The issued token is presented on API requests
    client.connect().await.unwrap();
}

#[tokio::test]
async fn test_authenticate_rejected_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
        .mount(&server)
        .await;

    let err = HooplaClient::authenticate("client-id", "wrong", &server.uri())
        .await
        .unwrap_err();

    match err {
        HooplaError::Auth {
            message,
            status_code,
        } => {
            assert_eq!(message, "invalid_client");
            assert_eq!(status_code, Some(401));
        }
        other => panic!("Expected Auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_authenticate_under_path_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "issued-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HooplaClient::authenticate("id", "secret", &format!("{}/v1", server.uri()))
        .await
        .unwrap();

    assert_eq!(client.base_url().as_str(), format!("{}/v1/", server.uri()));
    assert!(client.expires_at().is_none());
}
