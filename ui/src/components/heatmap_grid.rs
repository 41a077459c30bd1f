use payloads::HeatmapSnapshot;
use serde_json::Value;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub snapshot: HeatmapSnapshot,
}

/// Symbols as rows, timeframes as columns, in the order the snapshot gives
/// them.
#[function_component]
pub fn HeatmapGrid(props: &Props) -> Html {
    let snapshot = &props.snapshot;
    let timeframes = snapshot.timeframes.as_deref().unwrap_or_default();

    if snapshot.symbols.is_empty() || timeframes.is_empty() {
        return html! {
            <p class="text-neutral-600 dark:text-neutral-400">
                {"No heatmap data"}
            </p>
        };
    }

    html! {
        <table class="min-w-full text-sm border-collapse">
            <thead>
                <tr>
                    <th class="px-3 py-2 text-left">{"Symbol"}</th>
                    {for timeframes.iter().map(|tf| html! {
                        <th class="px-3 py-2 text-center">{tf.clone()}</th>
                    })}
                </tr>
            </thead>
            <tbody>
                {for snapshot.symbols.iter().map(|symbol| html! {
                    <tr>
                        <td class="px-3 py-2 font-medium">{symbol.clone()}</td>
                        {for timeframes.iter().map(|tf| {
                            let score = cell_score(&snapshot.cells, symbol, tf);
                            html! {
                                <td class={classes!("px-3", "py-2", "text-center", score_class(score))}>
                                    {score.map(|s| format!("{s:+.2}")).unwrap_or_else(|| "-".into())}
                                </td>
                            }
                        })}
                    </tr>
                })}
            </tbody>
        </table>
    }
}

/// Best-effort lookup of a cell's numeric score. Cells are free-form, so
/// anything without `symbol`, `timeframe` (or `tf`) and a numeric `score`
/// (or `value`) is ignored.
pub fn cell_score(cells: &[Value], symbol: &str, timeframe: &str) -> Option<f64> {
    cells.iter().find_map(|cell| {
        let cell_symbol = cell.get("symbol")?.as_str()?;
        let cell_tf = cell
            .get("timeframe")
            .or_else(|| cell.get("tf"))?
            .as_str()?;
        if cell_symbol != symbol || cell_tf != timeframe {
            return None;
        }
        cell.get("score").or_else(|| cell.get("value"))?.as_f64()
    })
}

fn score_class(score: Option<f64>) -> &'static str {
    match score {
        Some(s) if s >= 0.5 => "bg-green-200 dark:bg-green-900",
        Some(s) if s > 0.0 => "bg-green-50 dark:bg-green-950",
        Some(s) if s <= -0.5 => "bg-red-200 dark:bg-red-900",
        Some(s) if s < 0.0 => "bg-red-50 dark:bg-red-950",
        _ => "",
    }
}
