use std::collections::HashSet;

use crate::EventRecord;

/// Collapse structurally identical records.
///
/// Two records are duplicates when they share `(name, date, location)`; the
/// first occurrence wins and survivor order is preserved. Status differences
/// do not keep a duplicate alive.
pub fn dedupe(events: Vec<EventRecord>) -> Vec<EventRecord> {
    let before = events.len();
    let mut seen = HashSet::new();
    let kept: Vec<EventRecord> = events
        .into_iter()
        .filter(|event| seen.insert(event.dedup_key()))
        .collect();

    if kept.len() < before {
        tracing::debug!(dropped = before - kept.len(), "duplicate records removed");
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, ORGANIZATION, Place, Status};

    fn record(name: &str, date: &str, city: &str, status: Status) -> EventRecord {
        EventRecord {
            name: name.to_string(),
            date: date.to_string(),
            location: Place {
                city: city.to_string(),
                region: String::new(),
                country: "France".to_string(),
            },
            category: Category::Gi,
            status,
            organization: ORGANIZATION.to_string(),
        }
    }

    #[test]
    fn first_occurrence_wins_despite_status() {
        let events = vec![
            record("Open de Paris", "2025-10-04", "Paris", Status::Confirmed),
            record("Open de Paris", "2025-10-04", "Paris", Status::Tentative),
        ];
        let kept = dedupe(events);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].status, Status::Confirmed);
    }

    #[test]
    fn distinct_locations_survive() {
        let events = vec![
            record("Open", "2025-10-04", "Paris", Status::Confirmed),
            record("Open", "2025-10-04", "Lyon", Status::Confirmed),
        ];
        assert_eq!(dedupe(events).len(), 2);
    }

    #[test]
    fn survivor_order_is_preserved() {
        let events = vec![
            record("B", "2025-01-01", "Nice", Status::Confirmed),
            record("A", "2025-01-01", "Nice", Status::Confirmed),
            record("B", "2025-01-01", "Nice", Status::Confirmed),
        ];
        let kept = dedupe(events);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].name, "B");
        assert_eq!(kept[1].name, "A");
    }
}
