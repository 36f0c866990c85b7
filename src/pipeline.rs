// src/pipeline.rs
use chrono::DateTime;

use crate::config::JobConfig;
use crate::providers::FuturesProvider;
use crate::rates::derive_records;
use crate::store::MetricStore;

/// Outcome counters for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub skipped_points: usize,
    pub derived: usize,
    pub skipped_ois: usize,
    pub written: usize,
    pub write_failures: usize,
}

impl RunSummary {
    /// No data is a valid outcome; with data, at least one write must land.
    pub fn succeeded(&self) -> bool {
        self.derived == 0 || self.written > 0
    }
}

/// One fetch → derive → store pass. Provider and store are injected and live
/// for a single run.
pub struct Pipeline<S: MetricStore> {
    pub cfg: JobConfig,
    pub provider: Box<dyn FuturesProvider>,
    pub store: S,
}

impl<S: MetricStore> Pipeline<S> {
    pub fn new(cfg: JobConfig, provider: Box<dyn FuturesProvider>, store: S) -> Self {
        Self { cfg, provider, store }
    }

    pub async fn run_once(&self) -> RunSummary {
        let mut summary = RunSummary::default();

        let points = match self
            .provider
            .daily_closes(&self.cfg.ticker, self.cfg.lookback_days)
            .await
        {
            Ok(points) => points,
            Err(err) => {
                // Fetch failure means "nothing to process", not a crash.
                tracing::warn!(ticker = %self.cfg.ticker, error = %err, "fetch failed");
                return summary;
            }
        };
        summary.fetched = points.len();
        if points.is_empty() {
            tracing::info!(ticker = %self.cfg.ticker, "no settlement data in window");
            return summary;
        }
        tracing::info!(ticker = %self.cfg.ticker, points = points.len(), "fetched settlements");

        for point in &points {
            if !point.close.is_finite() {
                tracing::warn!(ts_ms = point.ts_ms, "skipping point with unusable close");
                summary.skipped_points += 1;
                continue;
            }
            let records = derive_records(point, &self.cfg.metric_ids);
            // One record means the OIS leg fell outside the real-exponent domain.
            if records.len() == 1 {
                tracing::warn!(
                    ts_ms = point.ts_ms,
                    close = point.close,
                    "compounding base non-positive, OIS record skipped"
                );
                summary.skipped_ois += 1;
            }
            summary.derived += records.len();

            for rec in &records {
                match self.store.put(rec).await {
                    Ok(()) => {
                        summary.written += 1;
                        tracing::debug!(
                            metric = %rec.metric_id,
                            date = %fmt_utc_date(rec.ts_ms),
                            value = %rec.value,
                            "stored"
                        );
                    }
                    Err(err) => {
                        // Per-record failure; remaining writes still go out.
                        summary.write_failures += 1;
                        tracing::warn!(
                            metric = %rec.metric_id,
                            ts_ms = rec.ts_ms,
                            error = %err,
                            "store write failed"
                        );
                    }
                }
            }
        }

        tracing::info!(
            written = summary.written,
            failed = summary.write_failures,
            skipped_ois = summary.skipped_ois,
            "run complete"
        );
        summary
    }
}

fn fmt_utc_date(ts_ms: i64) -> String {
    DateTime::from_timestamp_millis(ts_ms)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| ts_ms.to_string())
}
