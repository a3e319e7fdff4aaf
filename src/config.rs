use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrawlConfig {
    pub concurrency: usize,
    pub timeout_seconds: u64,
    pub delay_ms: u64,
    pub max_contact_pages: usize,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    pub csv_dir: String,
    pub csv_filename: String,
}

impl InputConfig {
    /// Full path to the domain list. The CSV_DIR_PATH and CSV_DOMAIN_FILENAME
    /// environment variables override the configured values.
    pub fn csv_path(&self) -> PathBuf {
        let dir = std::env::var("CSV_DIR_PATH").unwrap_or_else(|_| self.csv_dir.clone());
        let filename =
            std::env::var("CSV_DOMAIN_FILENAME").unwrap_or_else(|_| self.csv_filename.clone());
        PathBuf::from(dir).join(filename)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: String,
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawl: CrawlConfig {
                concurrency: 16,
                timeout_seconds: 30,
                delay_ms: 1000,
                max_contact_pages: 5,
                user_agent: "Mozilla/5.0 (compatible; ContactCrawler/1.0)".to_string(),
            },
            input: InputConfig {
                csv_dir: "data".to_string(),
                csv_filename: "domains.csv".to_string(),
            },
            output: OutputConfig {
                directory: "out".to_string(),
                filename: "records.jsonl".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

pub async fn load_config(path: &str) -> crate::models::Result<Config> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}
