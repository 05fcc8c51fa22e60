use regex::Regex;

use crate::{EventRecord, ORGANIZATION, Place, RawBlock, vocab::Vocabulary};

/// Recognizes the two date-phrase shapes used on the calendar page:
/// a single date (`4 octobre 2025`, `1er janvier 2026`) or a range
/// (`Du 29 novembre au 30 novembre`, optionally followed by a year).
pub struct DateParser {
    single: Regex,
    range: Regex,
}

/// One parsed date phrase. Ranges are reduced to their start day/month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePhrase {
    pub day: u32,
    pub month: String,
    /// Absent for range phrases that omit the year.
    pub year: Option<i32>,
}

impl DateParser {
    pub fn new() -> Self {
        Self {
            single: Regex::new(r"(?i)\b(\d{1,2})(?:er)?\s+(\p{L}+)\s+(\d{4})\b")
                .expect("invalid single-date pattern"),
            range: Regex::new(
                r"(?i)\bdu\s+(\d{1,2})(?:er)?\s+(\p{L}+)\s+au\s+(\d{1,2})(?:er)?\s+(\p{L}+)(?:\s+(\d{4}))?",
            )
            .expect("invalid range-date pattern"),
        }
    }

    /// The matched date phrase inside a text line, if any. Range phrases are
    /// tried first: a range ending in a year also contains a single-date match.
    pub fn find_phrase<'t>(&self, text: &'t str) -> Option<&'t str> {
        if let Some(m) = self.range.find(text) {
            return Some(m.as_str());
        }
        self.single.find(text).map(|m| m.as_str())
    }

    /// Parse a phrase into its start day, month name and optional year.
    pub fn parse(&self, text: &str) -> Option<DatePhrase> {
        if let Some(caps) = self.range.captures(text) {
            return Some(DatePhrase {
                day: caps[1].parse().unwrap_or(1),
                month: caps[2].to_string(),
                year: caps.get(5).and_then(|m| m.as_str().parse().ok()),
            });
        }
        self.single.captures(text).map(|caps| DatePhrase {
            day: caps[1].parse().unwrap_or(1),
            month: caps[2].to_string(),
            year: caps[3].parse().ok(),
        })
    }
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts raw blocks into canonical [`EventRecord`]s.
///
/// Normalization never fails loudly: blocks missing a date phrase or a
/// location line are dropped, and a record is only emitted with a non-empty
/// name and city.
pub struct Normalizer {
    vocab: Vocabulary,
    dates: DateParser,
}

impl Normalizer {
    pub fn new(vocab: Vocabulary) -> Self {
        Self {
            vocab,
            dates: DateParser::new(),
        }
    }

    /// Normalize one block, or drop it.
    ///
    /// `current_year` fills in range phrases that omit the year.
    pub fn normalize(&self, block: &RawBlock, current_year: i32) -> Option<EventRecord> {
        let date_text = block.date_text.as_deref()?;
        let location_text = block.location_text.as_deref()?;

        let name = block.name_text.trim();
        if name.is_empty() {
            return None;
        }

        let date = self.canonical_date(date_text, current_year);
        let location = self.place(location_text);
        if location.city.is_empty() {
            return None;
        }

        Some(EventRecord {
            name: name.to_string(),
            date,
            location,
            category: self.vocab.category_for(name),
            status: self.vocab.status_for(block.status_text.as_deref()),
            organization: ORGANIZATION.to_string(),
        })
    }

    /// Canonical `YYYY-MM-DD` form of a date phrase, or empty when no phrase
    /// is recognized. Unrecognized month names fall back to `01` with a
    /// warning; this keeps best-effort output instead of losing the record.
    pub fn canonical_date(&self, text: &str, current_year: i32) -> String {
        let Some(phrase) = self.dates.parse(text) else {
            return String::new();
        };

        let year = phrase.year.unwrap_or(current_year);
        let month = match self.vocab.month_number(&phrase.month) {
            Some(number) => number.to_string(),
            None => {
                tracing::warn!(
                    month = %phrase.month,
                    phrase = %text,
                    "unrecognized month name, defaulting to 01"
                );
                "01".to_string()
            }
        };

        format!("{year:04}-{month}-{day:02}", day = phrase.day)
    }

    /// Split a free-text location line into city and region on the first
    /// comma; without a comma the whole line is the city.
    pub fn place(&self, text: &str) -> Place {
        let mut parts = text.splitn(2, ',');
        let city = parts.next().unwrap_or("").trim().to_string();
        let region = parts
            .next()
            .map(|part| part.trim().to_string())
            .unwrap_or_default();

        Place {
            city,
            region,
            country: self.vocab.country.clone(),
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Vocabulary::default())
    }
}
