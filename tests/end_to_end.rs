// tests/end_to_end.rs
//! Full pass over a mocked chart endpoint into an in-memory SQLite store.

use httpmock::prelude::*;
use serde_json::json;

use ois_fetcher::config::JobConfig;
use ois_fetcher::pipeline::Pipeline;
use ois_fetcher::providers::yahoo::YahooChart;
use ois_fetcher::store::SqliteStore;

fn chart_body(timestamps: &[i64], closes: &[serde_json::Value]) -> serde_json::Value {
    json!({
        "chart": {
            "result": [{
                "timestamp": timestamps,
                "indicators": { "quote": [{ "close": closes }] }
            }],
            "error": null
        }
    })
}

async fn run_against(server: &MockServer) -> (ois_fetcher::pipeline::RunSummary, SqliteStore) {
    let cfg = JobConfig::default();
    let provider = YahooChart::with_base_url(reqwest::Client::new(), server.base_url());
    let store = SqliteStore::connect("sqlite::memory:", &cfg.table_name)
        .await
        .expect("in-memory store");
    let pipeline = Pipeline::new(cfg, Box::new(provider), store);
    let summary = pipeline.run_once().await;
    (summary, pipeline.store)
}

#[tokio::test]
async fn fetches_derives_and_stores_both_metrics() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v8/finance/chart/ZQ=F");
            then.status(200).json_body(chart_body(
                &[1_715_000_400, 1_715_086_800],
                &[json!(95.0), json!(94.75)],
            ));
        })
        .await;

    let (summary, store) = run_against(&server).await;

    assert!(summary.succeeded());
    assert_eq!(summary.written, 4);
    assert_eq!(store.count().await.unwrap(), 4);
    assert_eq!(
        store.get("IMPLIED_FF_RATE", 1_715_000_400_000).await.unwrap().as_deref(),
        Some("5.0000")
    );
    // OIS leg lands under the same timestamp as its source point.
    assert!(store
        .get("CALCULATED_OIS_1M_RATE", 1_715_086_800_000)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn rerun_overwrites_instead_of_duplicating() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v8/finance/chart/ZQ=F");
            then.status(200)
                .json_body(chart_body(&[1_715_000_400], &[json!(95.0)]));
        })
        .await;

    let cfg = JobConfig::default();
    let provider = YahooChart::with_base_url(reqwest::Client::new(), server.base_url());
    let store = SqliteStore::connect("sqlite::memory:", &cfg.table_name).await.unwrap();
    let pipeline = Pipeline::new(cfg, Box::new(provider), store);

    pipeline.run_once().await;
    pipeline.run_once().await;

    assert_eq!(pipeline.store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn provider_outage_leaves_store_untouched() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v8/finance/chart/ZQ=F");
            then.status(503);
        })
        .await;

    let (summary, store) = run_against(&server).await;

    assert!(summary.succeeded());
    assert_eq!(summary.fetched, 0);
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn junk_close_is_skipped_but_neighbors_are_stored() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v8/finance/chart/ZQ=F");
            then.status(200).json_body(chart_body(
                &[1, 2, 3],
                &[json!(95.0), json!("not-a-price"), json!(94.5)],
            ));
        })
        .await;

    let (summary, store) = run_against(&server).await;

    assert_eq!(summary.fetched, 2);
    assert_eq!(summary.written, 4);
    assert!(store.get("IMPLIED_FF_RATE", 1000).await.unwrap().is_some());
    assert!(store.get("IMPLIED_FF_RATE", 2000).await.unwrap().is_none());
    assert!(store.get("IMPLIED_FF_RATE", 3000).await.unwrap().is_some());
}
