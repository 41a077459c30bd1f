//! Mock heatmap data for testing
//!
//! This module provides realistic snapshot payloads that can be used across:
//! - Development server (dev-server)
//! - payloads and poller integration tests
//!
//! Timeframes are deliberately served out of canonical order, with one code
//! the client does not know, so normalization is visible in the UI.

use jiff::Timestamp;
use serde_json::{Value, json};

pub const SYMBOLS: [&str; 5] = ["BTCUSD", "ETHUSD", "EURUSD", "XAUUSD", "SPX"];

/// Served order of timeframes. "TICK" is not a known code.
pub const SERVED_TIMEFRAMES: [&str; 6] = ["D1", "M1", "H4", "TICK", "M5", "H1"];

/// A fixed snapshot, as the backend would send it.
pub fn sample_snapshot(timestamp: &str) -> Value {
    snapshot_at(timestamp, 0)
}

/// A snapshot whose cell scores depend on `generation`, so successive
/// snapshots differ.
pub fn snapshot_at(timestamp: &str, generation: u64) -> Value {
    let mut cells = Vec::new();
    for (s, symbol) in SYMBOLS.iter().enumerate() {
        for (t, timeframe) in SERVED_TIMEFRAMES.iter().enumerate() {
            cells.push(json!({
                "symbol": symbol,
                "timeframe": timeframe,
                "score": cell_score(s as u64, t as u64, generation),
            }));
        }
    }
    json!({
        "symbols": SYMBOLS,
        "timeframes": SERVED_TIMEFRAMES,
        "cells": cells,
        "timestamp": timestamp,
    })
}

/// Deterministic score in [-1, 1].
fn cell_score(symbol: u64, timeframe: u64, generation: u64) -> f64 {
    let seed = symbol * 31 + timeframe * 17 + generation * 7;
    ((seed % 201) as f64 - 100.0) / 100.0
}

/// Evolving dataset for the development server.
pub struct DevDataset {
    generation: u64,
}

impl Default for DevDataset {
    fn default() -> Self {
        Self::new()
    }
}

impl DevDataset {
    pub fn new() -> Self {
        Self { generation: 0 }
    }

    /// Produce the next snapshot, stamped with the current time.
    pub fn next_snapshot(&mut self) -> Value {
        self.generation += 1;
        snapshot_at(&Timestamp::now().to_string(), self.generation)
    }

    pub fn print_summary(&self) {
        tracing::info!("📊 Mock heatmap dataset:");
        tracing::info!("   Symbols: {}", SYMBOLS.join(", "));
        tracing::info!(
            "   Timeframes (as served): {}",
            SERVED_TIMEFRAMES.join(", ")
        );
        tracing::info!("   Snapshots served: {}", self.generation);
    }
}
