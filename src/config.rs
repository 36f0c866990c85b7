// src/config.rs
use crate::types::MetricIds;

#[derive(Debug, Clone)]
pub struct JobConfig {
    pub ticker: String,
    pub lookback_days: u32,
    pub table_name: String,
    pub database_url: String,
    pub metric_ids: MetricIds,
}

fn d_ticker() -> String { "ZQ=F".into() }
fn d_lookback_days() -> u32 { 10 }
fn d_table_name() -> String { "OISRATES".into() }
fn d_database_url() -> String { "sqlite://oisrates.db".into() }
fn d_metric_implied_ff() -> String { "IMPLIED_FF_RATE".into() }
fn d_metric_ois() -> String { "CALCULATED_OIS_1M_RATE".into() }

fn env_or(key: &str, default: fn() -> String) -> String {
    std::env::var(key).ok().filter(|v| !v.is_empty()).unwrap_or_else(default)
}

impl JobConfig {
    /// Read the run configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let lookback_days = std::env::var("OIS_LOOKBACK_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(d_lookback_days);
        Self {
            ticker: env_or("FED_FUNDS_FUTURES_TICKER", d_ticker),
            lookback_days,
            table_name: env_or("OIS_TABLE_NAME", d_table_name),
            database_url: env_or("OIS_DATABASE_URL", d_database_url),
            metric_ids: MetricIds {
                implied_ff: env_or("METRIC_ID_IMPLIED_FF", d_metric_implied_ff),
                ois_1m: env_or("METRIC_ID_OIS", d_metric_ois),
            },
        }
    }
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            ticker: d_ticker(),
            lookback_days: d_lookback_days(),
            table_name: d_table_name(),
            database_url: d_database_url(),
            metric_ids: MetricIds {
                implied_ff: d_metric_implied_ff(),
                ois_1m: d_metric_ois(),
            },
        }
    }
}
