pub mod crawler;

pub use crawler::{ContactCrawler, CrawlSummary};
