// src/types.rs
use serde::{Deserialize, Serialize};

/// One daily futures settlement observation. Transient; lives only within a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricePoint {
    pub ts_ms: i64,  // unix ms, UTC
    pub close: f64,  // settlement price
}

/// A single time-series observation ready for the store.
/// `ts_ms` always equals the originating PricePoint's timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub metric_id: String,
    pub ts_ms: i64,
    pub value: String, // decimal string, 4 fraction digits
}

/// The two metric ids a run may emit, resolved from config once.
#[derive(Debug, Clone)]
pub struct MetricIds {
    pub implied_ff: String,
    pub ois_1m: String,
}

impl Default for MetricIds {
    fn default() -> Self {
        Self {
            implied_ff: "IMPLIED_FF_RATE".to_string(),
            ois_1m: "CALCULATED_OIS_1M_RATE".to_string(),
        }
    }
}
