//! Native heatmap polling.
//!
//! [`Poller`] runs the same fetch cycle as the browser hook on a tokio
//! interval, for headless consumers and tests.

pub mod config;
pub mod poller;
pub mod telemetry;

pub use config::Config;
pub use poller::{DEFAULT_REFRESH_INTERVAL, HeatmapSource, Poller};
