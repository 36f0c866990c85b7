// src/bin/ois_fetcher.rs
use ois_fetcher::config::JobConfig;
use ois_fetcher::pipeline::Pipeline;
use ois_fetcher::providers::yahoo::YahooChart;
use ois_fetcher::store::SqliteStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let cfg = JobConfig::from_env();
    tracing::info!(ticker = %cfg.ticker, table = %cfg.table_name, "starting OIS rate fetch");

    let provider = YahooChart::new(reqwest::Client::new());
    let store = SqliteStore::connect(&cfg.database_url, &cfg.table_name).await?;

    let pipeline = Pipeline::new(cfg, Box::new(provider), store);
    let summary = pipeline.run_once().await;
    if !summary.succeeded() {
        anyhow::bail!(
            "all {} writes failed ({} records derived)",
            summary.write_failures,
            summary.derived
        );
    }
    Ok(())
}
