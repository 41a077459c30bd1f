pub mod use_aethelgard;
pub mod use_api;
pub mod use_auth;
pub mod use_heatmap_data;

pub use use_aethelgard::use_aethelgard;
pub use use_api::{ApiHandle, use_api};
pub use use_auth::{AuthSession, use_auth};
pub use use_heatmap_data::{
    DEFAULT_REFRESH_INTERVAL_MS, HeatmapHookReturn, use_heatmap_data,
};
