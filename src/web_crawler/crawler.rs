// src/web_crawler/crawler.rs
use crate::config::CrawlConfig;
use crate::extractors::FieldMerger;
use crate::models::{ContactRecord, Result};
use crate::sink::RecordSink;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};
use url::Url;

pub struct FetchedPage {
    pub final_url: String,
    pub body: String,
}

#[derive(Debug, Default)]
pub struct CrawlSummary {
    pub domains_total: usize,
    pub records_published: usize,
    pub domains_failed: usize,
}

/// Walks each domain: homepage first, then contact/about pages while fields
/// are still missing. Domains run concurrently, pages within a domain
/// sequentially.
pub struct ContactCrawler {
    client: Client,
    merger: FieldMerger,
    config: CrawlConfig,
}

impl ContactCrawler {
    pub fn new(config: CrawlConfig) -> Self {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            merger: FieldMerger::new(),
            config,
        }
    }

    pub async fn crawl_domains(
        self: Arc<Self>,
        domains: Vec<String>,
        sink: Arc<dyn RecordSink>,
    ) -> CrawlSummary {
        let mut summary = CrawlSummary {
            domains_total: domains.len(),
            ..Default::default()
        };
        info!(
            "🕷️  Starting crawl of {} domains ({} concurrent)",
            domains.len(),
            self.config.concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let mut handles = Vec::new();

        for domain in domains {
            let crawler = Arc::clone(&self);
            let sink = Arc::clone(&sink);
            let semaphore = Arc::clone(&semaphore);

            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                match crawler.crawl_domain(&domain).await {
                    Ok(record) => match sink.publish(record).await {
                        Ok(()) => true,
                        Err(e) => {
                            error!("Failed to publish record for {}: {}", domain, e);
                            false
                        }
                    },
                    Err(e) => {
                        warn!("Skipping {}: {}", domain, e);
                        false
                    }
                }
            }));
        }

        for handle in handles {
            match handle.await {
                Ok(true) => summary.records_published += 1,
                _ => summary.domains_failed += 1,
            }
        }

        info!(
            "🏁 Crawl complete: {}/{} records published",
            summary.records_published, summary.domains_total
        );
        summary
    }

    /// Walk one domain and build its record. A homepage fetch failure means no
    /// record; contact-page failures just contribute nothing.
    pub async fn crawl_domain(&self, domain: &str) -> Result<ContactRecord> {
        let homepage_url = format!("https://{}", domain);
        let homepage = self.fetch_page(&homepage_url).await?;

        let mut record = ContactRecord::new(domain, &homepage.final_url);
        let extract = self.merger.extract_markup(&homepage.body);
        record.absorb(&homepage.final_url, extract);

        if record.is_complete() {
            return Ok(record);
        }

        let links = discover_contact_links(
            &homepage.body,
            &homepage.final_url,
            self.config.max_contact_pages,
        );
        debug!(
            "Fields missing on {}, following {} contact/about links",
            homepage.final_url,
            links.len()
        );

        for link in links {
            tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;
            match self.fetch_page(&link).await {
                Ok(page) => {
                    let extract = self.merger.extract_markup(&page.body);
                    record.absorb(&page.final_url, extract);
                }
                Err(e) => {
                    warn!("Failed to fetch contact page {}: {}", link, e);
                }
            }
        }

        Ok(record)
    }

    async fn fetch_page(&self, url: &str) -> Result<FetchedPage> {
        debug!("Fetching: {}", url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(format!("HTTP error: {}", response.status()).into());
        }

        let final_url = response.url().to_string();
        let body = response.text().await?;
        debug!("Fetched {} bytes from {}", body.len(), final_url);

        Ok(FetchedPage { final_url, body })
    }
}

/// Hrefs whose URL mentions "contact" or "about", resolved against the page
/// URL, deduplicated and capped.
pub fn discover_contact_links(markup: &str, base_url: &str, limit: usize) -> Vec<String> {
    let document = Html::parse_document(markup);
    let link_selector = Selector::parse("a[href]").unwrap();
    let mut urls = Vec::new();

    for element in document.select(&link_selector) {
        if let Some(href) = element.value().attr("href") {
            let href_lower = href.to_lowercase();
            if !href_lower.contains("contact") && !href_lower.contains("about") {
                continue;
            }
            if let Some(resolved) = resolve_url(href, base_url) {
                if resolved != base_url {
                    urls.push(resolved);
                }
            }
        }
    }

    urls.sort();
    urls.dedup();
    urls.truncate(limit);
    urls
}

fn resolve_url(href: &str, base_url: &str) -> Option<String> {
    let resolved = match Url::parse(href) {
        Ok(url) => url,
        Err(_) => Url::parse(base_url).ok()?.join(href).ok()?,
    };
    if resolved.scheme() == "http" || resolved.scheme() == "https" {
        Some(resolved.to_string())
    } else {
        None
    }
}
