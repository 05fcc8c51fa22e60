use serde::{Deserialize, Serialize};

/// Fixed label identifying the data provider.
pub const ORGANIZATION: &str = "CFJJB";

/// Raw fields pulled from one event block, before normalization.
///
/// Lives only between the extractor and the normalizer. Absent fields mean
/// the bounded lookahead window did not contain them; the normalizer decides
/// whether that drops the record.
#[derive(Debug, Clone, Default)]
pub struct RawBlock {
    /// Anchor inner text with markup stripped and whitespace collapsed.
    pub name_text: String,
    /// The matched date phrase, verbatim.
    pub date_text: Option<String>,
    /// First line-level text after the date phrase.
    pub location_text: Option<String>,
    /// The matched status keyword, verbatim.
    pub status_text: Option<String>,
}

/// Structured event location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Place {
    /// City name; falls back to the whole location line when no comma splits it.
    pub city: String,
    /// Region/department, empty when the location line has no second segment.
    pub region: String,
    /// Fixed per-vocabulary constant.
    pub country: String,
}

/// Closed participant-type classification, derived from the event name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    NoGi,
    Kids,
    Gi,
}

/// Confirmation state as published on the calendar page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Confirmed,
    Tentative,
}

/// One normalized competition entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Event name as scraped, never empty.
    pub name: String,
    /// Canonical `YYYY-MM-DD` date, or empty when the phrase was unparseable.
    pub date: String,
    pub location: Place,
    pub category: Category,
    pub status: Status,
    /// Always [`ORGANIZATION`].
    pub organization: String,
}

impl EventRecord {
    /// Key used by the deduplicator: structurally identical records collapse.
    pub fn dedup_key(&self) -> (String, String, Place) {
        (self.name.clone(), self.date.clone(), self.location.clone())
    }
}
