// src/sink.rs
use crate::models::{ContactRecord, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::info;

/// Downstream boundary: accepts a finished record and durably hands it off.
/// The sink owns the publish timestamp.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn publish(&self, record: ContactRecord) -> Result<()>;
}

fn stamp(mut record: ContactRecord) -> ContactRecord {
    record.timestamp = Some(Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string());
    record
}

/// Appends one JSON record per line. Stands in for the broker producer: the
/// line is the keyed message value, `domain` the key.
pub struct JsonlFileSink {
    path: PathBuf,
    file: Mutex<tokio::fs::File>,
}

impl JsonlFileSink {
    pub async fn create(directory: &str, filename: &str) -> Result<Self> {
        tokio::fs::create_dir_all(directory).await?;
        let path = Path::new(directory).join(filename);
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }
}

#[async_trait]
impl RecordSink for JsonlFileSink {
    async fn publish(&self, record: ContactRecord) -> Result<()> {
        let record = stamp(record);
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        info!(
            "Published record for {} to {}",
            record.domain,
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_sets_an_iso_utc_timestamp() {
        let record = stamp(ContactRecord::new("acme.com", "https://acme.com/"));
        let timestamp = record.timestamp.unwrap();
        assert_eq!(timestamp.len(), 20);
        assert!(timestamp.ends_with('Z'));
        assert_eq!(&timestamp[4..5], "-");
        assert_eq!(&timestamp[10..11], "T");
    }

    #[tokio::test]
    async fn jsonl_sink_appends_one_line_per_record() {
        let dir = std::env::temp_dir().join(format!("contact-scraper-{}", std::process::id()));
        let dir = dir.to_string_lossy().to_string();
        let sink = JsonlFileSink::create(&dir, "records.jsonl").await.unwrap();

        sink.publish(ContactRecord::new("acme.com", "https://acme.com/"))
            .await
            .unwrap();
        sink.publish(ContactRecord::new("example.org", "https://example.org/"))
            .await
            .unwrap();

        let content = tokio::fs::read_to_string(Path::new(&dir).join("records.jsonl"))
            .await
            .unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: ContactRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.domain, "acme.com");
        assert!(first.timestamp.is_some());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
