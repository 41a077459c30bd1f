use yew::prelude::*;

use crate::components::{HeatmapGrid, SessionPanel};
use crate::hooks::use_aethelgard;
use crate::utils::time::format_snapshot_timestamp;

#[function_component]
pub fn HeatmapPage() -> Html {
    let aethelgard = use_aethelgard();
    let heatmap = &aethelgard.heatmap;

    let on_refresh = {
        let refetch = heatmap.refetch.clone();
        Callback::from(move |_: MouseEvent| refetch.emit(()))
    };

    html! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-semibold">{"Market Heatmap"}</h1>
                <button class="px-3 py-1 rounded border" onclick={on_refresh}>
                    {"Refresh"}
                </button>
            </div>
            <SessionPanel />
            {heatmap.render(|snapshot, error| html! {
                <div class="space-y-3">
                    <p class="text-sm text-neutral-600 dark:text-neutral-400">
                        {format!(
                            "Updated {}",
                            format_snapshot_timestamp(&snapshot.timestamp)
                        )}
                    </p>
                    if let Some(error) = error {
                        <div class="p-3 rounded-md bg-red-50 dark:bg-red-900/20">
                            <p class="text-sm text-red-700 dark:text-red-400">
                                {format!("Refresh failed: {error}")}
                            </p>
                        </div>
                    }
                    <HeatmapGrid snapshot={snapshot.clone()} />
                </div>
            })}
        </div>
    }
}
