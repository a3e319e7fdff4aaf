// src/extractors/merge.rs
use crate::extractors::raw_text::{PageText, RawTextExtractor};
use crate::extractors::structured::StructuredExtractor;
use crate::extractors::{ExtractStrategy, PageExtract};
use scraper::Html;

/// Per-page fallback policy: structured extraction first, raw-text regexes
/// only for the fields the markup did not yield. Generic over the strategies
/// so tests can substitute instrumented ones.
pub struct FieldMerger<S = StructuredExtractor, R = RawTextExtractor> {
    structured: S,
    raw: R,
}

impl FieldMerger {
    pub fn new() -> Self {
        Self {
            structured: StructuredExtractor::new(),
            raw: RawTextExtractor::new(),
        }
    }
}

impl Default for FieldMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, R> FieldMerger<S, R>
where
    S: ExtractStrategy<Html>,
    R: for<'a> ExtractStrategy<PageText<'a>>,
{
    pub fn with_strategies(structured: S, raw: R) -> Self {
        Self { structured, raw }
    }

    /// Extract all three fields from one fetched page.
    pub fn extract_page(&self, document: &Html, markup: &str) -> PageExtract {
        let structured = self.structured.extract_contact_info(document);
        if structured.is_complete() {
            // A confident structured result is never second-guessed by the
            // noisier raw-text pass.
            return structured;
        }

        // Flattened once, shared by the phone and address passes.
        let page_text = PageText::from_markup(markup);
        let fallback = PageExtract {
            phone_numbers: if structured.phone_numbers.is_none() {
                self.raw.extract_phone_numbers(&page_text)
            } else {
                None
            },
            address: if structured.address.is_none() {
                self.raw.extract_address(&page_text)
            } else {
                None
            },
            facebook_url: if structured.facebook_url.is_none() {
                self.raw.extract_facebook_url(&page_text)
            } else {
                None
            },
        };

        merge_extracts(structured, fallback)
    }

    /// Convenience wrapper that parses the markup itself.
    pub fn extract_markup(&self, markup: &str) -> PageExtract {
        let document = Html::parse_document(markup);
        self.extract_page(&document, markup)
    }
}

/// Field-by-field precedence: the primary result wins wherever it found a
/// value, the fallback fills the rest.
pub fn merge_extracts(primary: PageExtract, fallback: PageExtract) -> PageExtract {
    PageExtract {
        phone_numbers: primary.phone_numbers.or(fallback.phone_numbers),
        address: primary.address.or(fallback.address),
        facebook_url: primary.facebook_url.or(fallback.facebook_url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingRaw {
        inner: RawTextExtractor,
        calls: Cell<usize>,
    }

    impl CountingRaw {
        fn new() -> Self {
            Self {
                inner: RawTextExtractor::new(),
                calls: Cell::new(0),
            }
        }
    }

    impl<'a> ExtractStrategy<PageText<'a>> for CountingRaw {
        fn extract_phone_numbers(&self, source: &PageText<'a>) -> Option<Vec<String>> {
            self.calls.set(self.calls.get() + 1);
            self.inner.extract_phone_numbers(source)
        }

        fn extract_address(&self, source: &PageText<'a>) -> Option<String> {
            self.calls.set(self.calls.get() + 1);
            self.inner.extract_address(source)
        }

        fn extract_facebook_url(&self, source: &PageText<'a>) -> Option<String> {
            self.calls.set(self.calls.get() + 1);
            self.inner.extract_facebook_url(source)
        }
    }

    const COMPLETE_PAGE: &str = r#"
        <a href="tel:+11234567890">(123) 456-7890</a>
        <div class="address">123 Main St</div>
        <a href="https://facebook.com/acme">Facebook</a>
    "#;

    #[test]
    fn raw_pass_skipped_when_structured_is_complete() {
        let merger = FieldMerger::with_strategies(StructuredExtractor::new(), CountingRaw::new());
        let extract = merger.extract_markup(COMPLETE_PAGE);
        assert!(extract.is_complete());
        assert_eq!(merger.raw.calls.get(), 0);
    }

    #[test]
    fn raw_pass_runs_only_for_missing_fields() {
        // Facebook link present in markup, phone only in flattened text.
        let markup = r#"
            <a href="https://facebook.com/acme">Facebook</a>
            <footer>&gt; (123) 456-7890 &lt;</footer>
        "#;
        let merger = FieldMerger::with_strategies(StructuredExtractor::new(), CountingRaw::new());
        let extract = merger.extract_markup(markup);
        assert_eq!(extract.facebook_url, Some("https://facebook.com/acme".to_string()));
        assert_eq!(extract.phone_numbers, Some(vec!["(123) 456-7890".to_string()]));
        assert_eq!(extract.address, None);
        // phone and address only; the structured Facebook hit suppressed that call
        assert_eq!(merger.raw.calls.get(), 2);
    }

    #[test]
    fn merge_keeps_primary_values() {
        let primary = PageExtract {
            phone_numbers: None,
            address: Some("structured address".to_string()),
            facebook_url: None,
        };
        let fallback = PageExtract {
            phone_numbers: Some(vec!["555-123-4567".to_string()]),
            address: Some("raw address".to_string()),
            facebook_url: Some("fb.com/acme".to_string()),
        };
        let merged = merge_extracts(primary, fallback);
        assert_eq!(merged.phone_numbers, Some(vec!["555-123-4567".to_string()]));
        assert_eq!(merged.address, Some("structured address".to_string()));
        assert_eq!(merged.facebook_url, Some("fb.com/acme".to_string()));
    }

    #[test]
    fn empty_page_extracts_nothing() {
        let merger = FieldMerger::new();
        let extract = merger.extract_markup("<html><body><p>plain prose</p></body></html>");
        assert_eq!(extract, PageExtract::default());
    }
}
