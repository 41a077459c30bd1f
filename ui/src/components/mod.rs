pub mod heatmap_grid;
pub mod session_panel;

pub use heatmap_grid::HeatmapGrid;
pub use session_panel::SessionPanel;
