use yew::prelude::*;

use crate::contexts::AethelgardContext;

/// Access the shared heatmap status.
///
/// All consumers read the one poll loop owned by `AethelgardProvider`;
/// components must not call `use_heatmap_data` themselves.
#[hook]
pub fn use_aethelgard() -> AethelgardContext {
    use_context::<AethelgardContext>()
        .expect("use_aethelgard must be used within an AethelgardProvider")
}
