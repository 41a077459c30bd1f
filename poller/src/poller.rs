use payloads::fetch_state::RequestSequence;
use payloads::{APIClient, ClientError, FetchState, HeatmapSnapshot};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior, interval};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Where a poller gets its snapshots from.
pub trait HeatmapSource: Send + Sync + 'static {
    fn fetch_heatmap(
        &self,
    ) -> impl Future<Output = Result<HeatmapSnapshot, ClientError>> + Send;
}

impl HeatmapSource for APIClient {
    fn fetch_heatmap(
        &self,
    ) -> impl Future<Output = Result<HeatmapSnapshot, ClientError>> + Send
    {
        self.get_heatmap()
    }
}

enum Command {
    Refetch,
    SetInterval(Duration),
}

/// Periodically fetches the heatmap and publishes the resulting
/// [`FetchState`].
///
/// A cycle runs on spawn and then once per refresh interval. Each cycle is
/// its own task, so a slow request never delays the timer or a manual
/// refetch. Dropping the poller stops the timer; requests already in flight
/// finish on their own and their results go nowhere.
pub struct Poller {
    state: watch::Receiver<FetchState>,
    commands: mpsc::UnboundedSender<Command>,
    task: JoinHandle<()>,
}

impl Poller {
    /// Start polling `source`. Must be called from within a tokio runtime.
    pub fn spawn<S: HeatmapSource>(
        source: S,
        refresh_interval: Duration,
    ) -> Self {
        let (state_tx, state_rx) = watch::channel(FetchState::default());
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(run(
            Arc::new(source),
            Arc::new(state_tx),
            commands_rx,
            refresh_interval,
        ));

        Self {
            state: state_rx,
            commands: commands_tx,
            task,
        }
    }

    /// The current state.
    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    /// A receiver that is notified whenever the state changes.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.clone()
    }

    /// Run a cycle now, alongside the scheduled ones.
    pub fn refetch(&self) {
        let _ = self.commands.send(Command::Refetch);
    }

    /// Restart the timer with a new period. Like spawning, this runs a cycle
    /// straight away. State is kept.
    pub fn set_refresh_interval(&self, refresh_interval: Duration) {
        let _ = self.commands.send(Command::SetInterval(refresh_interval));
    }

    /// Wait until the state satisfies `predicate`, returning that state.
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&FetchState) -> bool,
    ) -> FetchState {
        let mut state = self.subscribe();
        let result = state.wait_for(|s| predicate(s)).await;
        match result {
            Ok(state) => state.clone(),
            // the sender lives as long as the polling task
            Err(_) => self.state(),
        }
    }

    /// Stop polling.
    pub fn shutdown(self) {}
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn ticker(period: Duration) -> Interval {
    let mut ticker = interval(period.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn run<S: HeatmapSource>(
    source: Arc<S>,
    state: Arc<watch::Sender<FetchState>>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    refresh_interval: Duration,
) {
    let sequence = RequestSequence::default();
    let mut timer = ticker(refresh_interval);
    tracing::debug!("Heatmap polling every {:?}", refresh_interval);

    loop {
        tokio::select! {
            _ = timer.tick() => {
                spawn_cycle(&source, &state, &sequence);
            }
            command = commands.recv() => match command {
                Some(Command::Refetch) => {
                    spawn_cycle(&source, &state, &sequence);
                }
                Some(Command::SetInterval(period)) => {
                    tracing::debug!("Heatmap polling every {:?}", period);
                    timer = ticker(period);
                }
                None => break,
            },
        }
    }
}

fn spawn_cycle<S: HeatmapSource>(
    source: &Arc<S>,
    state: &Arc<watch::Sender<FetchState>>,
    sequence: &RequestSequence,
) {
    let seq = sequence.issue();
    let source = source.clone();
    let state = state.clone();

    tokio::spawn(async move {
        let result = source.fetch_heatmap().await.map_err(|e| {
            tracing::error!("Heatmap fetch failed: {e}");
            e.to_string()
        });
        state.send_if_modified(|s| s.resolve(seq, result));
    });
}
