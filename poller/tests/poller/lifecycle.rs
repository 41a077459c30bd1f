use poller::Poller;
use std::time::Duration;
use test_helpers::spawn_backend;

#[tokio::test]
async fn polls_on_interval() -> anyhow::Result<()> {
    let backend = spawn_backend().await;
    let _poller =
        Poller::spawn(backend.new_client(), Duration::from_millis(50));

    backend.wait_for_hits(4, Duration::from_secs(5)).await?;

    Ok(())
}

#[tokio::test]
async fn shutdown_before_interval_stops_fetching() -> anyhow::Result<()> {
    let backend = spawn_backend().await;
    let poller =
        Poller::spawn(backend.new_client(), Duration::from_millis(300));
    poller.wait_for(|s| !s.loading).await;

    poller.shutdown();
    tokio::time::sleep(Duration::from_millis(900)).await;

    assert_eq!(backend.heatmap_hits(), 1);

    Ok(())
}

#[tokio::test]
async fn changing_interval_restarts_timer() -> anyhow::Result<()> {
    let backend = spawn_backend().await;
    let poller = Poller::spawn(backend.new_client(), Duration::from_secs(60));
    let loaded = poller.wait_for(|s| s.has_data()).await;
    assert_eq!(backend.heatmap_hits(), 1);

    poller.set_refresh_interval(Duration::from_millis(50));
    backend.wait_for_hits(4, Duration::from_secs(5)).await?;

    // state carries over, loading never comes back
    let state = poller.state();
    assert!(!state.loading);
    assert_eq!(state.data.map(|s| s.symbols), loaded.data.map(|s| s.symbols));

    Ok(())
}

#[tokio::test]
async fn in_flight_request_after_shutdown_is_harmless() -> anyhow::Result<()>
{
    let backend = spawn_backend().await;
    backend.push_response(
        test_helpers::MockResponse::json(
            200,
            test_helpers::mock::sample_snapshot("late"),
        )
        .delayed(Duration::from_millis(200)),
    );
    let poller = Poller::spawn(backend.new_client(), Duration::from_secs(60));
    backend.wait_for_hits(1, Duration::from_secs(5)).await?;
    let updates = poller.subscribe();

    poller.shutdown();
    tokio::time::sleep(Duration::from_millis(500)).await;

    // the late response was applied to a state nobody polls any more
    assert_eq!(backend.heatmap_hits(), 1);
    assert_eq!(updates.borrow().data.as_ref().unwrap().timestamp, "late");

    Ok(())
}
