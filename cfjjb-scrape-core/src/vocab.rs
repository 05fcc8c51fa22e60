use std::collections::HashMap;

use crate::{Category, Status};

/// Locale vocabulary driving extraction and normalization.
///
/// Passed explicitly into the [`Extractor`](crate::extract::Extractor) and
/// [`Normalizer`](crate::normalize::Normalizer) so the source locale can be
/// swapped without touching the pipeline logic. [`Vocabulary::default`] is the
/// French calendar published by the CFJJB.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Lowercase month name -> two-digit month number.
    pub months: HashMap<String, String>,
    /// Ordered category keywords, first match wins. Scanned lowercase.
    pub categories: Vec<(String, Category)>,
    /// Ordered status keywords. Scanned lowercase.
    pub statuses: Vec<(String, Status)>,
    /// Country attached to every location.
    pub country: String,
}

impl Vocabulary {
    /// French vocabulary for cfjjb.com. Month names carry unaccented variants
    /// to tolerate encoding artifacts in the source markup.
    pub fn french() -> Self {
        let months = [
            ("janvier", "01"),
            ("février", "02"),
            ("fevrier", "02"),
            ("mars", "03"),
            ("avril", "04"),
            ("mai", "05"),
            ("juin", "06"),
            ("juillet", "07"),
            ("août", "08"),
            ("aout", "08"),
            ("septembre", "09"),
            ("octobre", "10"),
            ("novembre", "11"),
            ("décembre", "12"),
            ("decembre", "12"),
        ]
        .into_iter()
        .map(|(name, num)| (name.to_string(), num.to_string()))
        .collect();

        // Precedence order: NoGi > Kids > Gi (Gi is the fallback).
        let categories = vec![
            ("no gi".to_string(), Category::NoGi),
            ("nogi".to_string(), Category::NoGi),
            ("kids".to_string(), Category::Kids),
            ("enfant".to_string(), Category::Kids),
        ];

        let statuses = vec![
            ("validé".to_string(), Status::Confirmed),
            ("valide".to_string(), Status::Confirmed),
            ("à confirmer".to_string(), Status::Tentative),
            ("a confirmer".to_string(), Status::Tentative),
        ];

        Self {
            months,
            categories,
            statuses,
            country: "France".to_string(),
        }
    }

    /// Two-digit month number for a month name, case-insensitive.
    pub fn month_number(&self, name: &str) -> Option<&str> {
        self.months.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Category for an event name: first keyword hit wins, Gi otherwise.
    pub fn category_for(&self, name: &str) -> Category {
        let lower = name.to_lowercase();
        for (keyword, category) in &self.categories {
            if lower.contains(keyword.as_str()) {
                return *category;
            }
        }
        Category::Gi
    }

    /// The status keyword matched inside a text line, if any.
    pub fn find_status_term(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.statuses
            .iter()
            .find(|(term, _)| lower.contains(term.as_str()))
            .map(|(term, _)| term.as_str())
    }

    /// Status for a scraped keyword; absent or unknown keywords are tentative.
    pub fn status_for(&self, text: Option<&str>) -> Status {
        text.and_then(|t| {
            let lower = t.to_lowercase();
            self.statuses
                .iter()
                .find(|(term, _)| lower.contains(term.as_str()))
                .map(|(_, status)| *status)
        })
        .unwrap_or(Status::Tentative)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::french()
    }
}
