// src/providers/mod.rs
use async_trait::async_trait;

use crate::types::PricePoint;

#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("http transport: {0}")]
    Http(#[from] reqwest::Error),
    #[error("http status {0}")]
    Status(u16),
    #[error("decode: {0}")]
    Decode(String),
    #[error("vendor error: {0}")]
    Vendor(String),
}

#[async_trait]
pub trait FuturesProvider: Send + Sync {
    /// Daily settlement closes for `ticker` over the trailing window, oldest
    /// first. An empty vec is a valid outcome (holiday stretch, delisted
    /// contract); errors are reported, never retried.
    async fn daily_closes(
        &self,
        ticker: &str,
        lookback_days: u32,
    ) -> Result<Vec<PricePoint>, ProviderError>;
}

pub mod yahoo;
