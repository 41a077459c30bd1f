use poller::Poller;
use serde_json::json;
use std::time::Duration;
use test_helpers::{MockResponse, spawn_backend};

#[tokio::test]
async fn first_cycle_loads_snapshot() -> anyhow::Result<()> {
    let backend = spawn_backend().await;
    let poller = Poller::spawn(backend.new_client(), Duration::from_secs(60));
    assert!(poller.state().loading);

    let state = poller.wait_for(|s| !s.loading).await;
    let snapshot = state.data.expect("snapshot after first cycle");
    assert_eq!(
        snapshot.timeframes.unwrap(),
        vec!["M1", "M5", "H1", "H4", "D1", "TICK"]
    );
    assert!(state.error.is_none());

    Ok(())
}

#[tokio::test]
async fn failed_first_cycle_ends_loading() -> anyhow::Result<()> {
    let backend = spawn_backend().await;
    backend.push_response(MockResponse::json(
        400,
        json!({"detail": "Invalid symbol"}),
    ));
    let poller = Poller::spawn(backend.new_client(), Duration::from_secs(60));

    let state = poller.wait_for(|s| !s.loading).await;
    assert!(state.data.is_none());
    assert_eq!(state.error.as_deref(), Some("Invalid symbol"));

    Ok(())
}

#[tokio::test]
async fn refetch_recovers_from_error() -> anyhow::Result<()> {
    let backend = spawn_backend().await;
    backend.push_response(MockResponse::raw(500, "gateway exploded"));
    let poller = Poller::spawn(backend.new_client(), Duration::from_secs(60));

    let state = poller.wait_for(|s| s.error.is_some()).await;
    assert_eq!(state.error.as_deref(), Some("Failed to fetch heatmap"));

    poller.refetch();
    let state = poller.wait_for(|s| s.has_data()).await;
    assert!(state.error.is_none());
    assert!(!state.loading);
    assert_eq!(backend.heatmap_hits(), 2);

    Ok(())
}

#[tokio::test]
async fn error_keeps_last_snapshot() -> anyhow::Result<()> {
    let backend = spawn_backend().await;
    let poller = Poller::spawn(backend.new_client(), Duration::from_secs(60));
    let loaded = poller.wait_for(|s| s.has_data()).await;

    backend.push_response(MockResponse::json(
        503,
        json!({"detail": "Analysis engine warming up"}),
    ));
    poller.refetch();
    let state = poller.wait_for(|s| s.error.is_some()).await;

    assert_eq!(state.data, loaded.data);
    assert_eq!(state.error.as_deref(), Some("Analysis engine warming up"));

    Ok(())
}

#[tokio::test]
async fn slow_stale_response_is_discarded() -> anyhow::Result<()> {
    let backend = spawn_backend().await;
    // the first cycle answers late with an error
    backend.push_response(
        MockResponse::json(500, json!({"detail": "late failure"}))
            .delayed(Duration::from_millis(400)),
    );
    let poller = Poller::spawn(backend.new_client(), Duration::from_secs(60));
    backend.wait_for_hits(1, Duration::from_secs(5)).await?;

    // a manual refetch overtakes it
    poller.refetch();
    let state = poller.wait_for(|s| s.has_data()).await;
    assert!(state.error.is_none());

    tokio::time::sleep(Duration::from_millis(600)).await;
    let state = poller.state();
    assert!(state.has_data());
    assert!(state.error.is_none());

    Ok(())
}
