use yew::prelude::*;

use crate::hooks::{
    DEFAULT_REFRESH_INTERVAL_MS, HeatmapHookReturn, use_heatmap_data,
};

/// Aggregate status shared by every consumer of the analysis feed.
#[derive(Clone, PartialEq)]
pub struct AethelgardContext {
    pub heatmap: HeatmapHookReturn,
}

#[derive(Properties, PartialEq)]
pub struct AethelgardProviderProps {
    pub children: Children,
    #[prop_or(DEFAULT_REFRESH_INTERVAL_MS)]
    pub refresh_interval_ms: u32,
}

/// Owns the single heatmap poll loop for everything rendered beneath it.
#[function_component]
pub fn AethelgardProvider(props: &AethelgardProviderProps) -> Html {
    let heatmap = use_heatmap_data(props.refresh_interval_ms);
    let context = AethelgardContext { heatmap };

    html! {
        <ContextProvider<AethelgardContext> context={context}>
            {props.children.clone()}
        </ContextProvider<AethelgardContext>>
    }
}
