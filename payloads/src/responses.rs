use serde::{Deserialize, Serialize};

use crate::timeframes::sort_timeframes;

/// One polled heatmap payload.
///
/// `cells` is carried as raw JSON since nothing on the client interprets
/// it. Unrecognized top-level fields are kept in `extra` so a snapshot can
/// be passed along unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapSnapshot {
    #[serde(default)]
    pub symbols: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframes: Option<Vec<String>>,
    #[serde(default)]
    pub cells: Vec<serde_json::Value>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl HeatmapSnapshot {
    /// Put `timeframes` into canonical order. A snapshot without timeframes
    /// is left untouched.
    pub fn normalize(&mut self) {
        if let Some(timeframes) = self.timeframes.as_mut() {
            sort_timeframes(timeframes);
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}

/// Error body returned by the analysis endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: Option<String>,
}
