pub mod merge;
pub mod patterns;
pub mod raw_text;
pub mod structured;

pub use merge::FieldMerger;
pub use raw_text::{PageText, RawTextExtractor};
pub use structured::StructuredExtractor;

/// Contact fields pulled out of a single page. Absence is a normal outcome,
/// never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtract {
    pub phone_numbers: Option<Vec<String>>,
    pub address: Option<String>,
    pub facebook_url: Option<String>,
}

impl PageExtract {
    pub fn is_complete(&self) -> bool {
        self.phone_numbers.is_some() && self.address.is_some() && self.facebook_url.is_some()
    }
}

/// The capability contract shared by the two extraction strategies. They
/// operate on different source shapes (parsed tree vs. page text), so the
/// source is a type parameter rather than a fixed input.
pub trait ExtractStrategy<Source: ?Sized> {
    fn extract_phone_numbers(&self, source: &Source) -> Option<Vec<String>>;
    fn extract_address(&self, source: &Source) -> Option<String>;
    fn extract_facebook_url(&self, source: &Source) -> Option<String>;

    fn extract_contact_info(&self, source: &Source) -> PageExtract {
        PageExtract {
            phone_numbers: self.extract_phone_numbers(source),
            address: self.extract_address(source),
            facebook_url: self.extract_facebook_url(source),
        }
    }
}
