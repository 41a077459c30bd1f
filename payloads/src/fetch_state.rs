use std::sync::atomic::{AtomicU64, Ordering};

use crate::HeatmapSnapshot;

/// Observable state of a polled heatmap.
///
/// Results are tagged with the sequence number of the request that produced
/// them. A result is only applied if no later request has already been
/// applied, so a slow response can never overwrite a newer one.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState {
    pub data: Option<HeatmapSnapshot>,
    /// True until the first fetch cycle resolves, false forever after.
    pub loading: bool,
    pub error: Option<String>,
    applied_seq: u64,
}

impl Default for FetchState {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
            applied_seq: 0,
        }
    }
}

impl FetchState {
    /// Apply the outcome of fetch cycle `seq`. Returns false (and leaves the
    /// state untouched) if the result is stale.
    pub fn resolve(
        &mut self,
        seq: u64,
        result: Result<HeatmapSnapshot, String>,
    ) -> bool {
        if seq <= self.applied_seq {
            tracing::debug!(
                "Discarding heatmap result {} (already applied {})",
                seq,
                self.applied_seq
            );
            return false;
        }
        self.applied_seq = seq;
        self.loading = false;

        match result {
            Ok(snapshot) => {
                self.data = Some(snapshot);
                self.error = None;
            }
            Err(message) => {
                self.error = Some(if message.is_empty() {
                    crate::api_client::HEATMAP_FALLBACK_ERROR.to_string()
                } else {
                    message
                });
            }
        }
        true
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

/// Hands out increasing sequence numbers for fetch cycles.
#[derive(Debug, Default)]
pub struct RequestSequence {
    next: AtomicU64,
}

impl RequestSequence {
    pub fn issue(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed) + 1
    }
}
