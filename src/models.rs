use serde::{Deserialize, Serialize};

use crate::extractors::PageExtract;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// One output unit per crawled domain. Fields fill under "first found wins":
/// once set they are never cleared or replaced by a later page visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRecord {
    pub domain: String,
    /// Last page URL that contributed data, homepage until one does.
    pub url: String,
    /// Homepage URL, set once at creation.
    pub website: String,
    pub phone_number: Option<Vec<String>>,
    pub address: Option<String>,
    pub facebook_url: Option<String>,
    /// Assigned by the sink at publish time, ISO-8601 UTC.
    pub timestamp: Option<String>,
}

impl ContactRecord {
    pub fn new(domain: &str, homepage_url: &str) -> Self {
        Self {
            domain: domain.to_string(),
            url: homepage_url.to_string(),
            website: homepage_url.to_string(),
            phone_number: None,
            address: None,
            facebook_url: None,
            timestamp: None,
        }
    }

    /// Fold one page's extraction result into the record. Only still-absent
    /// fields are filled. Returns true when the page contributed anything, in
    /// which case `url` moves to that page.
    pub fn absorb(&mut self, page_url: &str, extract: PageExtract) -> bool {
        let mut contributed = false;

        if self.phone_number.is_none() {
            if let Some(phones) = extract.phone_numbers {
                self.phone_number = Some(phones);
                contributed = true;
            }
        }
        if self.address.is_none() {
            if let Some(address) = extract.address {
                self.address = Some(address);
                contributed = true;
            }
        }
        if self.facebook_url.is_none() {
            if let Some(facebook) = extract.facebook_url {
                self.facebook_url = Some(facebook);
                contributed = true;
            }
        }

        if contributed {
            self.url = page_url.to_string();
        }
        contributed
    }

    pub fn is_complete(&self) -> bool {
        self.phone_number.is_some() && self.address.is_some() && self.facebook_url.is_some()
    }
}
