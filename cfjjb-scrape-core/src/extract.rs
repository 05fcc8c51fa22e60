use ego_tree::NodeRef;
use regex::Regex;
use scraper::{ElementRef, Html, Node};

use crate::{RawBlock, normalize::DateParser, vocab::Vocabulary};

/// Segments the raw calendar page into one [`RawBlock`] per event anchor.
///
/// An anchor is any element whose `id` attribute embeds a numeric event id.
/// The date, status and location for an anchor are searched in a bounded
/// lookahead window of document-order nodes following it, so unpredictable
/// nesting degrades into missing fields rather than wrong ones.
pub struct Extractor {
    anchor_id: Regex,
    dates: DateParser,
    vocab: Vocabulary,
    lookahead_nodes: usize,
}

impl Extractor {
    /// Window size in DOM nodes scanned after each anchor's subtree.
    pub const DEFAULT_LOOKAHEAD_NODES: usize = 120;

    pub fn new(vocab: Vocabulary) -> Self {
        Self {
            anchor_id: Regex::new(r"(?i)\b(?:event|evenement|competition)[-_](\d+)\b")
                .expect("invalid anchor-id pattern"),
            dates: DateParser::new(),
            vocab,
            lookahead_nodes: Self::DEFAULT_LOOKAHEAD_NODES,
        }
    }

    /// One pass over the page text, in document order.
    ///
    /// Every matched anchor with non-empty inner text yields a block; field
    /// lookups that run past the window leave the field absent and the
    /// normalizer drops the record.
    pub fn extract(&self, html: &str) -> Vec<RawBlock> {
        let document = Html::parse_document(html);
        let nodes: Vec<NodeRef<Node>> = document.root_element().descendants().collect();

        // First pass: locate every anchor, so each window knows where the
        // next event begins. Empty-named anchors emit no block but still
        // bound the preceding window.
        let mut anchors: Vec<(usize, Option<String>)> = Vec::new();
        for (index, node) in nodes.iter().enumerate() {
            let Some(element) = ElementRef::wrap(*node) else {
                continue;
            };
            let Some(id_attr) = element.value().attr("id") else {
                continue;
            };
            let Some(caps) = self.anchor_id.captures(id_attr) else {
                continue;
            };

            let name = collapse_whitespace(&element.text().collect::<String>());
            if name.is_empty() {
                tracing::debug!(anchor = id_attr, "skipping anchor with empty name");
                anchors.push((index, None));
                continue;
            }

            tracing::debug!(event_id = &caps[1], name = %name, "found event anchor");
            anchors.push((index, Some(name)));
        }

        let mut blocks = Vec::new();
        for (position, (index, name)) in anchors.iter().enumerate() {
            let Some(name) = name else {
                continue;
            };
            let next_anchor = anchors
                .get(position + 1)
                .map_or(nodes.len(), |(next_index, _)| *next_index);
            blocks.push(self.scan_window(&nodes, *index, next_anchor, name.clone()));
        }

        tracing::info!(blocks = blocks.len(), "extraction pass complete");
        blocks
    }

    fn scan_window(
        &self,
        nodes: &[NodeRef<Node>],
        anchor_index: usize,
        next_anchor: usize,
        name: String,
    ) -> RawBlock {
        let anchor = nodes[anchor_index];

        // The window starts after the anchor's own subtree so the name text
        // is never mistaken for a field, and stops at the next anchor so a
        // block never borrows fields from the following event.
        let mut start = anchor_index + 1;
        while start < nodes.len()
            && nodes[start]
                .ancestors()
                .any(|ancestor| ancestor.id() == anchor.id())
        {
            start += 1;
        }
        let end = next_anchor.min(start + self.lookahead_nodes).min(nodes.len());

        let mut date_text: Option<String> = None;
        let mut date_index = 0usize;
        let mut status_text: Option<String> = None;
        let mut location_text: Option<String> = None;

        for k in start..end {
            let Some(line) = visible_text(nodes[k]) else {
                continue;
            };

            if status_text.is_none() {
                if let Some(term) = self.vocab.find_status_term(&line) {
                    status_text = Some(term.to_string());
                }
            }

            if date_text.is_none() {
                if let Some(phrase) = self.dates.find_phrase(&line) {
                    date_text = Some(phrase.to_string());
                    date_index = k;
                    continue;
                }
            } else if location_text.is_none()
                && k > date_index
                && self.dates.find_phrase(&line).is_none()
                && self.vocab.find_status_term(&line).is_none()
            {
                location_text = Some(line);
            }
        }

        RawBlock {
            name_text: name,
            date_text,
            location_text,
            status_text,
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(Vocabulary::default())
    }
}

/// Stripped text of a text node, skipping script/style content. `None` when
/// the node is not text or collapses to nothing.
fn visible_text(node: NodeRef<Node>) -> Option<String> {
    let text = node.value().as_text()?;

    if let Some(parent) = node.parent().and_then(ElementRef::wrap) {
        if matches!(parent.value().name(), "script" | "style") {
            return None;
        }
    }

    let line = collapse_whitespace(text);
    if line.is_empty() { None } else { Some(line) }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAGE: &str = r#"
        <html><body>
        <h3>Janvier</h3>
        <div class="competition">
            <a id="event-101" href="/competitions/101"><span>Tournoi</span> Test</a>
            <p>Le 1 janvier 2026</p>
            <p>Paris, Île-de-France</p>
            <span class="badge">Validé</span>
        </div>
        <div class="competition">
            <a id="event-102" href="/competitions/102">Open Sans Date</a>
            <p>Lieu inconnu</p>
        </div>
        </body></html>
    "#;

    #[test]
    fn well_formed_block_yields_all_fields() {
        let blocks = Extractor::default().extract(SAMPLE_PAGE);
        assert_eq!(blocks.len(), 2);

        let block = &blocks[0];
        assert_eq!(block.name_text, "Tournoi Test");
        assert_eq!(block.date_text.as_deref(), Some("1 janvier 2026"));
        assert_eq!(block.location_text.as_deref(), Some("Paris, Île-de-France"));
        assert_eq!(block.status_text.as_deref(), Some("validé"));
    }

    #[test]
    fn block_without_date_has_no_location_either() {
        let blocks = Extractor::default().extract(SAMPLE_PAGE);
        let block = &blocks[1];
        assert_eq!(block.name_text, "Open Sans Date");
        assert_eq!(block.date_text, None);
        assert_eq!(block.location_text, None);
    }

    #[test]
    fn anchor_markup_is_stripped_from_name() {
        let html = r#"<a id="competition-7"><b>Open</b> de <i>Paris</i></a>"#;
        let blocks = Extractor::default().extract(html);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].name_text, "Open de Paris");
    }

    #[test]
    fn empty_anchor_is_skipped() {
        let html = r#"<a id="event-8">   </a><p>4 octobre 2025</p><p>Nice</p>"#;
        let blocks = Extractor::default().extract(html);
        assert!(blocks.is_empty());
    }

    #[test]
    fn non_anchor_ids_are_ignored() {
        let html = r#"<div id="sidebar">4 octobre 2025</div>"#;
        let blocks = Extractor::default().extract(html);
        assert!(blocks.is_empty());
    }

    #[test]
    fn sample_page_yields_exactly_one_record() {
        use crate::{Category, Status, dedupe::dedupe, ident::assign_ids, normalize::Normalizer};

        let blocks = Extractor::default().extract(SAMPLE_PAGE);
        let normalizer = Normalizer::default();
        let events: Vec<_> = blocks
            .iter()
            .filter_map(|block| normalizer.normalize(block, 2025))
            .collect();
        let events = dedupe(events);

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.name, "Tournoi Test");
        assert_eq!(event.date, "2026-01-01");
        assert_eq!(event.location.city, "Paris");
        assert_eq!(event.category, Category::Gi);
        assert_eq!(event.status, Status::Confirmed);

        let ids = assign_ids(&events);
        assert_eq!(ids[0].value, "cfjjb-tournoi-test-2026-01-01");
        assert!(!ids[0].degraded);
    }

    #[test]
    fn window_stops_at_the_next_anchor() {
        // A block missing its own date must not adopt the date or location
        // of the event that follows it.
        let html = r#"
            <a id="event-1">Open Sans Date</a>
            <p>Quelque part</p>
            <a id="event-2">Open de Nice</a>
            <p>4 octobre 2025</p>
            <p>Nice, Alpes-Maritimes</p>
        "#;
        let blocks = Extractor::default().extract(html);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].date_text, None);
        assert_eq!(blocks[0].location_text, None);
        assert_eq!(blocks[1].date_text.as_deref(), Some("4 octobre 2025"));
        assert_eq!(
            blocks[1].location_text.as_deref(),
            Some("Nice, Alpes-Maritimes")
        );
    }

    #[test]
    fn status_line_is_not_mistaken_for_location() {
        let html = r#"
            <a id="event-9">Open de Nice</a>
            <p>4 octobre 2025</p>
            <span>A confirmer</span>
            <p>Nice, Alpes-Maritimes</p>
        "#;
        let blocks = Extractor::default().extract(html);
        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0].location_text.as_deref(),
            Some("Nice, Alpes-Maritimes")
        );
        assert_eq!(blocks[0].status_text.as_deref(), Some("a confirmer"));
    }
}
