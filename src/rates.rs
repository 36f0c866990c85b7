// src/rates.rs
use crate::types::{MetricIds, MetricRecord, PricePoint};

/// Fed Funds futures use an actual/360 money-market convention.
pub const DAYS_PER_YEAR: f64 = 360.0;
/// Compounding horizon for the 1-month OIS proxy.
pub const COMPOUND_DAYS: f64 = 30.0;

/// Annualized rate implied by the 100−price futures convention, as a decimal.
/// Negative when the contract trades above 100.
#[inline]
pub fn implied_annual_rate(close: f64) -> f64 {
    (100.0 - close) / 100.0
}

/// Daily-compounded 1-month rate from the implied annual rate, as a decimal.
/// `None` when `1 + daily` is non-positive: the compounding base leaves the
/// domain of real exponentiation (close >= 36_100 in price terms).
pub fn ois_1m_rate(implied_annual: f64) -> Option<f64> {
    let daily = implied_annual / DAYS_PER_YEAR;
    let base = 1.0 + daily;
    if base <= 0.0 {
        return None;
    }
    Some((base.powf(COMPOUND_DAYS) - 1.0) * (DAYS_PER_YEAR / COMPOUND_DAYS))
}

/// Percent value formatted with exactly 4 fraction digits, the store's wire form.
#[inline]
pub fn format_percent(pct: f64) -> String {
    format!("{pct:.4}")
}

/// Derive the records for one settlement point: the implied FF rate always,
/// the compounded OIS proxy when it exists. A non-finite close yields nothing.
pub fn derive_records(point: &PricePoint, ids: &MetricIds) -> Vec<MetricRecord> {
    if !point.close.is_finite() {
        return Vec::new();
    }
    let annual = implied_annual_rate(point.close);
    let mut out = Vec::with_capacity(2);
    out.push(MetricRecord {
        metric_id: ids.implied_ff.clone(),
        ts_ms: point.ts_ms,
        value: format_percent(annual * 100.0),
    });
    if let Some(ois) = ois_1m_rate(annual) {
        out.push(MetricRecord {
            metric_id: ids.ois_1m.clone(),
            ts_ms: point.ts_ms,
            value: format_percent(ois * 100.0),
        });
    }
    out
}
