//! Wire types and the HTTP client shared by the UI, the native poller, and
//! the mock backend.

pub mod api_client;
pub mod fetch_state;
pub mod requests;
pub mod responses;
pub mod timeframes;

pub use api_client::{APIClient, ClientError};
pub use fetch_state::FetchState;
pub use requests::RequestOptions;
pub use responses::HeatmapSnapshot;
pub use timeframes::Timeframe;

/// Path of the heatmap resource, relative to the `/api` scope.
pub const HEATMAP_PATH: &str = "analysis/heatmap";
