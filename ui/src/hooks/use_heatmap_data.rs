use gloo_timers::callback::Interval;
use payloads::fetch_state::RequestSequence;
use payloads::{FetchState, HeatmapSnapshot};
use std::rc::Rc;
use yew::prelude::*;

use crate::get_api_client;

pub const DEFAULT_REFRESH_INTERVAL_MS: u32 = 10_000;

/// Heatmap polling hook return type
#[derive(Clone, PartialEq)]
pub struct HeatmapHookReturn {
    pub data: Option<HeatmapSnapshot>,
    /// Only true before the first fetch completes.
    pub loading: bool,
    pub error: Option<String>,
    pub refetch: Callback<()>,
}

impl HeatmapHookReturn {
    /// Render based on fetch state.
    ///
    /// - No data + loading: "Loading heatmap..."
    /// - No data + error: the error
    /// - Has data: `render_fn(data, error)`, where `error` is from a failed
    ///   refresh (the previous data is still shown)
    pub fn render<F>(&self, render_fn: F) -> Html
    where
        F: Fn(&HeatmapSnapshot, Option<&String>) -> Html,
    {
        match self.data.as_ref() {
            Some(data) => render_fn(data, self.error.as_ref()),
            None if self.loading => html! {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">
                        {"Loading heatmap..."}
                    </p>
                </div>
            },
            None => html! {
                <div class="p-4 rounded-md bg-red-50 \
                           dark:bg-red-900/20 border \
                           border-red-200 dark:border-red-800">
                    <p class="text-sm text-red-700 dark:text-red-400">
                        {format!(
                            "Error loading heatmap: {}",
                            self.error.as_deref().unwrap_or("no data")
                        )}
                    </p>
                </div>
            },
        }
    }
}

/// Reducer wrapper so fetch results are applied in dispatch order.
#[derive(Clone, PartialEq, Default)]
struct HeatmapState(FetchState);

struct Resolve {
    seq: u64,
    result: Result<HeatmapSnapshot, String>,
}

impl Reducible for HeatmapState {
    type Action = Resolve;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.0.resolve(action.seq, action.result) {
            Rc::new(next)
        } else {
            self
        }
    }
}

/// Poll the heatmap endpoint.
///
/// Fetches on mount and every `refresh_interval_ms` after that. Changing the
/// interval restarts the timer (with an immediate fetch) but keeps the
/// current data. The timer is dropped on unmount; a request still in flight
/// then resolves into a dispatcher nobody renders.
///
/// Prefer `use_aethelgard` in components: this hook starts its own loop.
#[hook]
pub fn use_heatmap_data(refresh_interval_ms: u32) -> HeatmapHookReturn {
    let state = use_reducer(HeatmapState::default);
    let sequence = use_memo((), |_| RequestSequence::default());

    let refetch = {
        let dispatcher = state.dispatcher();

        use_callback((), move |_, _| {
            let seq = sequence.issue();
            let dispatcher = dispatcher.clone();

            yew::platform::spawn_local(async move {
                let result =
                    get_api_client().get_heatmap().await.map_err(|e| {
                        tracing::error!("Heatmap fetch failed: {}", e);
                        e.to_string()
                    });
                dispatcher.dispatch(Resolve { seq, result });
            });
        })
    };

    {
        let refetch = refetch.clone();

        use_effect_with(refresh_interval_ms.max(1), move |interval_ms| {
            refetch.emit(());
            let interval = Interval::new(*interval_ms, move || {
                refetch.emit(());
            });

            move || drop(interval)
        });
    }

    let FetchState {
        data,
        loading,
        error,
        ..
    } = &state.0;

    HeatmapHookReturn {
        data: data.clone(),
        loading: *loading,
        error: error.clone(),
        refetch,
    }
}
