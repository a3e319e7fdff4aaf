// src/extractors/structured.rs
use crate::extractors::patterns::PatternSet;
use crate::extractors::ExtractStrategy;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// Markup-driven strategy: reads tag names, class attributes and link schemes.
/// High precision, low recall; returns nothing when the markup has no hints.
pub struct StructuredExtractor {
    patterns: PatternSet,
    tel_links: Selector,
    phone_classes: Selector,
    address_blocks: Selector,
    facebook_links: Selector,
}

impl StructuredExtractor {
    pub fn new() -> Self {
        Self {
            patterns: PatternSet::new(),
            tel_links: Selector::parse("a[href^='tel:']").unwrap(),
            phone_classes: Selector::parse("[class*='phone']").unwrap(),
            address_blocks: Selector::parse("address, [class*='address'], span[class*='address']")
                .unwrap(),
            facebook_links: Selector::parse("a[href*='facebook.com']").unwrap(),
        }
    }
}

impl Default for StructuredExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

impl ExtractStrategy<Html> for StructuredExtractor {
    fn extract_phone_numbers(&self, document: &Html) -> Option<Vec<String>> {
        let mut candidates: Vec<String> =
            document.select(&self.tel_links).map(element_text).collect();
        if candidates.is_empty() {
            candidates = document.select(&self.phone_classes).map(element_text).collect();
        }
        if candidates.is_empty() {
            return None;
        }

        // Set semantics: duplicates collapse, order is not document order.
        let unique: HashSet<String> = candidates.into_iter().collect();
        let phones: Vec<String> = unique
            .into_iter()
            .map(|phone| phone.trim().to_string())
            .filter(|phone| !phone.is_empty())
            .filter(|phone| self.patterns.is_tel_link_phone(phone))
            .collect();

        if phones.is_empty() {
            None
        } else {
            Some(phones)
        }
    }

    fn extract_address(&self, document: &Html) -> Option<String> {
        let mut parts: Vec<&str> = Vec::new();
        for element in document.select(&self.address_blocks) {
            parts.extend(element.text());
        }
        if parts.is_empty() {
            return None;
        }

        let joined = parts.join(" ").trim().to_string();
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }

    fn extract_facebook_url(&self, document: &Html) -> Option<String> {
        document
            .select(&self.facebook_links)
            .next()
            .and_then(|link| link.value().attr("href"))
            .map(str::to_string)
    }
}
