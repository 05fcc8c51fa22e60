use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::EventRecord;

/// Prefix carried by every generated identifier.
pub const ID_PREFIX: &str = "cfjjb";

/// Stable identifier for one record.
///
/// `degraded` marks the positional fallback used when the record has no
/// parseable date; those identifiers depend on batch order and are not pure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventId {
    pub value: String,
    pub degraded: bool,
}

/// Derive identifiers for a whole batch.
///
/// `<prefix>-<slug(name)>-<date>`, with a 1-based position standing in for an
/// empty date. Identifiers are unique within the batch: a collision appends a
/// numeric disambiguator instead of overwriting.
pub fn assign_ids(events: &[EventRecord]) -> Vec<EventId> {
    let mut seen: HashSet<String> = HashSet::new();

    events
        .iter()
        .enumerate()
        .map(|(position, event)| {
            let slug = slugify(&event.name);
            let (suffix, degraded) = if event.date.is_empty() {
                ((position + 1).to_string(), true)
            } else {
                (event.date.clone(), false)
            };

            let base = format!("{ID_PREFIX}-{slug}-{suffix}");
            let mut value = base.clone();
            let mut attempt = 1;
            while !seen.insert(value.clone()) {
                attempt += 1;
                value = format!("{base}-{attempt}");
                tracing::warn!(id = %base, resolved = %value, "identifier collision");
            }

            EventId { value, degraded }
        })
        .collect()
}

/// Lowercase, diacritic-stripped, hyphen-joined slug of free text.
pub fn slugify(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if let Some(ascii) = fold_diacritic(c) {
            folded.push_str(ascii);
        } else if c.is_ascii_alphanumeric() {
            folded.push(c);
        } else {
            folded.push('-');
        }
    }

    folded
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Fold the accented characters and ligatures seen in French event names to
/// ASCII. `None` for characters that need no folding.
fn fold_diacritic(c: char) -> Option<&'static str> {
    Some(match c {
        'à' | 'â' | 'ä' => "a",
        'é' | 'è' | 'ê' | 'ë' => "e",
        'î' | 'ï' => "i",
        'ô' | 'ö' => "o",
        'ù' | 'û' | 'ü' => "u",
        'ç' => "c",
        'ÿ' => "y",
        'ñ' => "n",
        'œ' => "oe",
        'æ' => "ae",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, ORGANIZATION, Place, Status};

    fn record(name: &str, date: &str) -> EventRecord {
        EventRecord {
            name: name.to_string(),
            date: date.to_string(),
            location: Place {
                city: "Paris".to_string(),
                region: String::new(),
                country: "France".to_string(),
            },
            category: Category::Gi,
            status: Status::Tentative,
            organization: ORGANIZATION.to_string(),
        }
    }

    #[test]
    fn slug_strips_diacritics_and_collapses() {
        assert_eq!(slugify("Tournoi d'Été à Besançon"), "tournoi-d-ete-a-besancon");
        assert_eq!(slugify("  NoGi   Open!  "), "nogi-open");
    }

    #[test]
    fn slug_expands_french_ligatures() {
        assert_eq!(slugify("Trophée du Cœur"), "trophee-du-coeur");
        assert_eq!(slugify("Challenge Lætitia"), "challenge-laetitia");
    }

    #[test]
    fn distinct_records_get_distinct_ids() {
        let events = vec![
            record("Open de Paris", "2025-10-04"),
            record("Open de Lyon", "2025-10-04"),
            record("Open de Paris", "2025-11-04"),
        ];
        let ids = assign_ids(&events);
        let unique: HashSet<_> = ids.iter().map(|id| id.value.clone()).collect();
        assert_eq!(unique.len(), 3);
        assert_eq!(ids[0].value, "cfjjb-open-de-paris-2025-10-04");
        assert!(ids.iter().all(|id| !id.degraded));
    }

    #[test]
    fn collision_appends_disambiguator() {
        // Same name and date, different city: distinct records, same base id.
        let events = vec![
            record("Open", "2025-10-04"),
            record("Open", "2025-10-04"),
        ];
        let ids = assign_ids(&events);
        assert_eq!(ids[0].value, "cfjjb-open-2025-10-04");
        assert_eq!(ids[1].value, "cfjjb-open-2025-10-04-2");
    }

    #[test]
    fn empty_date_uses_position_and_flags_degraded() {
        let events = vec![record("Open de Nice", ""), record("Open de Pau", "")];
        let ids = assign_ids(&events);
        assert_eq!(ids[0].value, "cfjjb-open-de-nice-1");
        assert_eq!(ids[1].value, "cfjjb-open-de-pau-2");
        assert!(ids.iter().all(|id| id.degraded));
    }
}
