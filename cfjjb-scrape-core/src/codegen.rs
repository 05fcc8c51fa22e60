use chrono::{DateTime, SecondsFormat, Utc};

use crate::{Category, EventRecord, Result, ident::EventId, source::CALENDAR_URL};

/// Options controlling the generated Elm module.
#[derive(Debug, Clone)]
pub struct ElmOptions {
    /// Elm module name.
    pub module_name: String,
    /// Exported value name.
    pub export_name: String,
    /// Calendar page the data was scraped from; also the registration URL.
    pub source_url: String,
    /// Placeholder image attached to every event.
    pub image_url: String,
}

impl Default for ElmOptions {
    fn default() -> Self {
        Self {
            module_name: "Data.CFJJBEvents".to_string(),
            export_name: "cfjjbEvents".to_string(),
            source_url: CALENDAR_URL.to_string(),
            image_url: "/images/events/cfjjb-default.jpg".to_string(),
        }
    }
}

/// Renders the deduplicated record set as the `Data.CFJJBEvents` Elm module.
pub struct ElmGenerator {
    options: ElmOptions,
}

impl ElmGenerator {
    pub fn new(options: ElmOptions) -> Self {
        Self { options }
    }

    /// Generate the full module text.
    ///
    /// The mapping layout is fixed by the front-end's `Event` type; free-text
    /// fields are escaped so embedded quotes cannot break the literal.
    pub fn generate(&self, entries: &[(EventId, EventRecord)], generated_at: DateTime<Utc>) -> String {
        let export = &self.options.export_name;
        let mut out = String::new();

        out.push_str(&format!(
            "module {} exposing ({export})\n\n",
            self.options.module_name
        ));
        out.push_str(&format!(
            "{{-| French BJJ competitions from the CFJJB calendar.\nAuto-generated from {}\n\nLast updated: {}\n-}}\n\n",
            self.options.source_url,
            generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        out.push_str("import Dict exposing (Dict)\nimport Types exposing (..)\n\n\n");
        out.push_str(&format!(
            "{export} : Dict String Event\n{export} =\n    Dict.fromList\n"
        ));

        if entries.is_empty() {
            out.push_str("        []\n");
            return out;
        }

        for (index, (id, record)) in entries.iter().enumerate() {
            out.push_str(if index == 0 { "        [ " } else { "        , " });
            out.push_str(&self.render_entry(id, record));
            out.push('\n');
        }
        out.push_str("        ]\n");

        out
    }

    fn render_entry(&self, id: &EventId, record: &EventRecord) -> String {
        // The front-end models Kids events as camps, everything else as
        // tournaments, and only knows an upcoming state; the internal
        // confirmed/tentative classification stays on the record and in the
        // JSON snapshot.
        let kind = match record.category {
            Category::Kids => "Camp",
            Category::NoGi | Category::Gi => "Tournament",
        };
        let description = format!("Compétition de Jiu-Jitsu Brésilien - {}", record.name);

        let mut entry = String::new();
        entry.push_str(&format!("( \"{}\"\n", id.value));
        entry.push_str(&format!("          , {{ id = \"{}\"\n", id.value));
        entry.push_str(&format!(
            "            , name = \"{}\"\n",
            self.escape_text(&record.name)
        ));
        entry.push_str(&format!("            , date = \"{}\"\n", record.date));
        entry.push_str("            , location =\n");
        entry.push_str(&format!(
            "                {{ city = \"{}\"\n",
            self.escape_text(&record.location.city)
        ));
        entry.push_str(&format!(
            "                , state = \"{}\"\n",
            self.escape_text(&record.location.region)
        ));
        entry.push_str(&format!(
            "                , country = \"{}\"\n",
            self.escape_text(&record.location.country)
        ));
        entry.push_str("                , address = \"\"\n");
        entry.push_str("                , coordinates = Nothing\n");
        entry.push_str("                }\n");
        entry.push_str(&format!(
            "            , organization = \"{}\"\n",
            self.escape_text(&record.organization)
        ));
        entry.push_str(&format!("            , type_ = {kind}\n"));
        entry.push_str(&format!(
            "            , imageUrl = \"{}\"\n",
            self.options.image_url
        ));
        entry.push_str(&format!(
            "            , description = \"{}\"\n",
            self.escape_text(&description)
        ));
        entry.push_str(&format!(
            "            , registrationUrl = Just \"{}\"\n",
            self.options.source_url
        ));
        entry.push_str("            , streamUrl = Nothing\n");
        entry.push_str("            , results = Nothing\n");
        entry.push_str("            , brackets = []\n");
        entry.push_str("            , status = EventUpcoming\n");
        entry.push_str("            }\n");
        entry.push_str("          )");
        entry
    }

    /// Escape free text for an Elm string literal.
    fn escape_text(&self, text: &str) -> String {
        text.replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
    }
}

impl Default for ElmGenerator {
    fn default() -> Self {
        Self::new(ElmOptions::default())
    }
}

/// Diagnostic JSON mirror of the normalized record set.
pub fn snapshot_json(events: &[EventRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(events)?)
}

/// Parse a diagnostic snapshot back into records.
pub fn snapshot_from_json(json: &str) -> Result<Vec<EventRecord>> {
    Ok(serde_json::from_str(json)?)
}
