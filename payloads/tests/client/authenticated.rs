use payloads::{ClientError, RequestOptions};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::SecretString;
use serde_json::json;
use test_helpers::{RecordedRequest, spawn_backend};

fn token() -> SecretString {
    SecretString::from("test-token".to_string())
}

#[tokio::test]
async fn bearer_token_is_sent() -> anyhow::Result<()> {
    let backend = spawn_backend().await;

    let response = backend
        .client
        .authenticated_request(
            "/api/echo",
            RequestOptions::get(),
            Some(&token()),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let echoed: RecordedRequest = response.json().await?;
    assert_eq!(echoed.header("authorization"), Some("Bearer test-token"));
    assert_eq!(echoed.header("content-type"), Some("application/json"));

    Ok(())
}

#[tokio::test]
async fn no_token_no_authorization_header() -> anyhow::Result<()> {
    let backend = spawn_backend().await;

    backend
        .client
        .authenticated_request("/api/echo", RequestOptions::get(), None)
        .await?;

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
    assert_eq!(requests[0].header("content-type"), Some("application/json"));

    Ok(())
}

#[tokio::test]
async fn caller_headers_override_defaults() -> anyhow::Result<()> {
    let backend = spawn_backend().await;

    let options = RequestOptions::get()
        .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
        .header(AUTHORIZATION, HeaderValue::from_static("Bearer override"));
    backend
        .client
        .authenticated_request("/api/echo", options, Some(&token()))
        .await?;

    let request = &backend.requests()[0];
    assert_eq!(request.header("content-type"), Some("text/plain"));
    assert_eq!(request.headers["authorization"], vec!["Bearer override"]);

    Ok(())
}

#[tokio::test]
async fn method_and_body_pass_through() -> anyhow::Result<()> {
    let backend = spawn_backend().await;

    let options = RequestOptions::post(&json!({"symbol": "BTCUSD"}))?;
    backend
        .client
        .authenticated_request("/api/echo", options, Some(&token()))
        .await?;
    let options = RequestOptions::get()
        .method(Method::DELETE)
        .body("raw body");
    backend
        .client
        .authenticated_request(
            &format!("{}/api/echo", backend.address()),
            options,
            None,
        )
        .await?;

    let requests = backend.requests();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].body, r#"{"symbol":"BTCUSD"}"#);
    assert_eq!(requests[1].method, "DELETE");
    assert_eq!(requests[1].body, "raw body");

    Ok(())
}

#[tokio::test]
async fn error_statuses_are_returned() -> anyhow::Result<()> {
    let backend = spawn_backend().await;

    for status in [401, 403, 500] {
        let response = backend
            .client
            .authenticated_request(
                &format!("/api/echo?status={status}"),
                RequestOptions::get(),
                Some(&token()),
            )
            .await?;
        assert_eq!(response.status().as_u16(), status);
    }

    // a 401 leaves nothing behind: the next request still carries the token
    backend
        .client
        .authenticated_request("/api/echo", RequestOptions::get(), Some(&token()))
        .await?;
    let requests = backend.requests();
    assert_eq!(
        requests.last().unwrap().header("authorization"),
        Some("Bearer test-token")
    );

    Ok(())
}

#[tokio::test]
async fn transport_failure_is_returned() -> anyhow::Result<()> {
    let backend = spawn_backend().await;

    let result = backend
        .client
        .authenticated_request(
            "http://127.0.0.1:1/api/echo",
            RequestOptions::get(),
            Some(&token()),
        )
        .await;
    assert!(matches!(result, Err(ClientError::Network(_))));
    assert!(backend.requests().is_empty());

    Ok(())
}
