// src/main.rs
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod domains;
mod extractors;
mod models;
mod sink;
mod web_crawler;

use config::{load_config, Config};
use models::Result;
use sink::JsonlFileSink;
use tokio::signal;
use web_crawler::ContactCrawler;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = match load_config("config.yml").await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config.yml: {}. Using defaults.", e);
            Config::default()
        }
    };

    std::env::set_var(
        "RUST_LOG",
        format!(
            "contact_scraper={},hyper=warn,reqwest=warn",
            config.logging.level
        ),
    );
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let csv_path = config.input.csv_path();
    let domain_list = domains::load_domain_list(&csv_path).await?;
    if domain_list.is_empty() {
        warn!("Domain list {} is empty, nothing to crawl", csv_path.display());
        return Ok(());
    }

    let sink = Arc::new(JsonlFileSink::create(&config.output.directory, &config.output.filename).await?);
    let crawler = Arc::new(ContactCrawler::new(config.crawl.clone()));

    tokio::select! {
        summary = crawler.crawl_domains(domain_list, sink) => {
            info!(
                "Done: {} published, {} failed out of {} domains",
                summary.records_published, summary.domains_failed, summary.domains_total
            );
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}
