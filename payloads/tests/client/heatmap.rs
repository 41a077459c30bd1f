use payloads::ClientError;
use reqwest::StatusCode;
use serde_json::json;
use test_helpers::{MockResponse, assert_status_code, mock, spawn_backend};

#[tokio::test]
async fn heatmap_is_normalized() -> anyhow::Result<()> {
    let backend = spawn_backend().await;

    let snapshot = backend.client.get_heatmap().await?;

    assert_eq!(
        snapshot.timeframes.unwrap(),
        vec!["M1", "M5", "H1", "H4", "D1", "TICK"]
    );
    assert_eq!(snapshot.symbols, mock::SYMBOLS);
    assert_eq!(snapshot.cells.len(), 30);
    assert_eq!(snapshot.timestamp, "2025-01-01T00:00:00Z");

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/api/analysis/heatmap");
    assert_eq!(requests[0].method, "GET");

    Ok(())
}

#[tokio::test]
async fn spec_example_order() -> anyhow::Result<()> {
    let backend = spawn_backend().await;
    backend.push_response(MockResponse::json(
        200,
        json!({
            "symbols": [],
            "timeframes": ["D1", "M1", "H4", "XX", "M5"],
            "cells": [],
            "timestamp": "2025-01-01T00:00:00Z"
        }),
    ));

    let snapshot = backend.client.get_heatmap().await?;
    assert_eq!(
        snapshot.timeframes.unwrap(),
        vec!["M1", "M5", "H4", "D1", "XX"]
    );
    assert!(snapshot.symbols.is_empty());

    Ok(())
}

#[tokio::test]
async fn missing_timeframes_passes_through() -> anyhow::Result<()> {
    let backend = spawn_backend().await;
    let body = json!({
        "symbols": ["BTCUSD"],
        "cells": [{"anything": [1, 2, 3]}],
        "timestamp": "2025-01-01T00:00:00Z",
        "stale": true
    });
    backend.push_response(MockResponse::json(200, body.clone()));

    let snapshot = backend.client.get_heatmap().await?;
    assert!(snapshot.timeframes.is_none());
    assert_eq!(serde_json::to_value(&snapshot)?, body);

    Ok(())
}

#[tokio::test]
async fn error_detail_is_surfaced() -> anyhow::Result<()> {
    let backend = spawn_backend().await;
    backend.push_response(MockResponse::json(
        400,
        json!({"detail": "Invalid symbol"}),
    ));

    let result = backend.client.get_heatmap().await;
    match result {
        Err(ClientError::APIError(code, message)) => {
            assert_eq!(code, StatusCode::BAD_REQUEST);
            assert_eq!(message, "Invalid symbol");
        }
        _ => panic!("Expected APIError"),
    }

    Ok(())
}

#[tokio::test]
async fn unparsable_error_falls_back() -> anyhow::Result<()> {
    let backend = spawn_backend().await;
    backend.push_response(MockResponse::raw(500, "<html>oops</html>"));
    backend.push_response(MockResponse::json(502, json!({"error": "x"})));
    backend.push_response(MockResponse::json(503, json!({"detail": ""})));

    for expected in [
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::BAD_GATEWAY,
        StatusCode::SERVICE_UNAVAILABLE,
    ] {
        let result = backend.client.get_heatmap().await;
        assert_eq!(
            result.as_ref().map_err(|e| e.to_string()).unwrap_err(),
            "Failed to fetch heatmap"
        );
        assert_status_code(result, expected);
    }

    Ok(())
}

#[tokio::test]
async fn malformed_success_body() -> anyhow::Result<()> {
    let backend = spawn_backend().await;
    backend.push_response(MockResponse::raw(200, "not json"));

    let result = backend.client.get_heatmap().await;
    assert!(matches!(result, Err(ClientError::Decode(_))));

    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_network_error() -> anyhow::Result<()> {
    let backend = spawn_backend().await;
    let mut client = backend.new_client();
    // nothing listens on port 1
    client.address = "http://127.0.0.1:1".into();

    let result = client.get_heatmap().await;
    assert!(matches!(result, Err(ClientError::Network(_))));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Network error. Please check your connection."
    );

    Ok(())
}
