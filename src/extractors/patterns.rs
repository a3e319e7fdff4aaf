// src/extractors/patterns.rs
use regex::Regex;

/// The regex families shared by both extraction strategies. Built once at
/// startup and never reconfigured.
pub struct PatternSet {
    tel_link_phone: Regex,
    in_text_phone: Regex,
    facebook_url: Regex,
    address: Regex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    pub house_number: String,
    pub street_name: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl ParsedAddress {
    // house number, street, city, state, postal code, space-joined in that order
    pub fn render(&self) -> String {
        [
            &self.house_number,
            &self.street_name,
            &self.city,
            &self.state,
            &self.postal_code,
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .map(|part| part.as_str())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

impl PatternSet {
    pub fn new() -> Self {
        Self {
            // Validates candidates pulled from markup; anchored at the start,
            // trailing text is tolerated.
            tel_link_phone: Regex::new(r"^\(?\d{3}\)?[\s.\-]?\d{3}[\s.\-]?\d{4}").unwrap(),
            // A phone in free text only counts when it sits alone between
            // "> " and " <" markers. Numbers embedded in prose are skipped.
            in_text_phone: Regex::new(r"> (\(?\d{3}\)?[\s.\-]?\d{3}[\s.\-]?\d{4}) <").unwrap(),
            // \b keeps hosts like notfacebook.com from matching on their tail.
            facebook_url: Regex::new(
                r"\b(?:https?://)?(?:www\.)?(?:facebook|fb)\.(?:com|me)/(?:(?:\w\.)*#!/)?(?:pages/)?(?:[\w\-.]*/)*[\w\-.]*",
            )
            .unwrap(),
            // House number, street, optional | or , separator, city, 2-3 letter
            // region, 5-digit postal (+4 optional). All five groups or nothing.
            address: Regex::new(
                r"(\d{1,5})\s([A-Za-z0-9\s]+)\s*(?:[|,]\s*)?([A-Za-z\s]+),\s([A-Za-z]{2,3})\s(\d{5}(?:-\d{4})?)",
            )
            .unwrap(),
        }
    }

    pub fn is_tel_link_phone(&self, candidate: &str) -> bool {
        self.tel_link_phone.is_match(candidate)
    }

    pub fn find_in_text_phone(&self, text: &str) -> Option<String> {
        self.in_text_phone
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn find_facebook_url(&self, source: &str) -> Option<String> {
        self.facebook_url
            .find(source)
            .map(|m| m.as_str().to_string())
    }

    pub fn find_address(&self, text: &str) -> Option<ParsedAddress> {
        self.address.captures(text).map(|caps| ParsedAddress {
            house_number: caps[1].trim().to_string(),
            street_name: caps[2].trim().to_string(),
            city: caps[3].trim().to_string(),
            state: caps[4].trim().to_string(),
            postal_code: caps[5].trim().to_string(),
        })
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new()
    }
}
