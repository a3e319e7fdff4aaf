// src/extractors/raw_text.rs
use crate::extractors::patterns::PatternSet;
use crate::extractors::ExtractStrategy;
use scraper::Html;

/// The raw strategy's view of one page: the flattened visible text (for phone
/// and address) plus the untouched markup (for Facebook URLs, which often live
/// inside attribute values).
pub struct PageText<'a> {
    pub text: String,
    pub markup: &'a str,
}

impl<'a> PageText<'a> {
    pub fn from_markup(markup: &'a str) -> Self {
        Self {
            text: RawTextExtractor::flatten_visible_text(markup),
            markup,
        }
    }
}

/// Regex-driven strategy over flattened page text. Works on any markup shape,
/// at the cost of pattern-matching noise.
pub struct RawTextExtractor {
    patterns: PatternSet,
}

impl RawTextExtractor {
    pub fn new() -> Self {
        Self {
            patterns: PatternSet::new(),
        }
    }

    /// Render a document to its visible text: text nodes joined by single
    /// spaces, trimmed, with HTML entities decoded. Compute this once per page
    /// and share it between the phone and address passes.
    pub fn flatten_visible_text(markup: &str) -> String {
        let document = Html::parse_document(markup);
        let text = document
            .root_element()
            .text()
            .collect::<Vec<_>>()
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        decode_html_entities(text.trim())
    }
}

impl Default for RawTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode the entities that survive parsing (double-encoded sources mostly).
fn decode_html_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
}

impl<'a> ExtractStrategy<PageText<'a>> for RawTextExtractor {
    fn extract_phone_numbers(&self, source: &PageText<'a>) -> Option<Vec<String>> {
        self.patterns
            .find_in_text_phone(&source.text)
            .map(|phone| vec![phone])
    }

    fn extract_address(&self, source: &PageText<'a>) -> Option<String> {
        self.patterns
            .find_address(&source.text)
            .map(|address| address.render())
    }

    fn extract_facebook_url(&self, source: &PageText<'a>) -> Option<String> {
        // Deliberately searched against the raw markup, not the flattened text.
        self.patterns.find_facebook_url(source.markup)
    }
}
