use std::{fs, path::Path};

use anyhow::{Context, Result};
use cfjjb_scrape_core::{
    codegen::{self, ElmGenerator, ElmOptions},
    dedupe::dedupe,
    extract::Extractor,
    ident::{EventId, assign_ids},
    normalize::Normalizer,
    source::CalendarSource,
    types::EventRecord,
    vocab::Vocabulary,
};
use chrono::{Datelike, Utc};

/// Generate command parameters
pub struct GenerateParams {
    pub url: Option<String>,
    pub output: String,
    pub snapshot: String,
}

/// Run the whole pipeline and write the Elm module plus the JSON snapshot.
pub async fn generate_command(params: GenerateParams) -> Result<()> {
    let source = calendar_source(params.url);
    let entries = scrape(&source).await?;

    println!("Generating Elm module...");
    let generator = ElmGenerator::new(ElmOptions {
        source_url: source.url().to_string(),
        ..ElmOptions::default()
    });
    let module = generator.generate(&entries, Utc::now());

    write_output(&params.output, &module)?;
    println!("✓ Generated: {}", params.output);

    let records: Vec<EventRecord> = entries.into_iter().map(|(_, record)| record).collect();
    let json = codegen::snapshot_json(&records)?;
    write_output(&params.snapshot, &json)?;
    println!("✓ Saved snapshot: {}", params.snapshot);

    Ok(())
}

/// Dry run: fetch and parse the calendar, print what would be generated.
pub async fn check_command(url: Option<String>) -> Result<()> {
    let source = calendar_source(url);
    let entries = scrape(&source).await?;

    for (id, record) in &entries {
        let date = if record.date.is_empty() {
            "????-??-??"
        } else {
            record.date.as_str()
        };
        println!(
            "  {date}  {name}  ({city}) [{id}]",
            name = record.name,
            city = record.location.city,
            id = id.value
        );
    }

    Ok(())
}

fn calendar_source(url: Option<String>) -> CalendarSource {
    match url {
        Some(url) => CalendarSource::with_url(url),
        None => CalendarSource::new(),
    }
}

/// Fetch, extract, normalize, dedupe and identify, in that order.
async fn scrape(source: &CalendarSource) -> Result<Vec<(EventId, EventRecord)>> {
    println!("Fetching competition calendar from {}...", source.url());
    let html = source.fetch_page().await?;

    println!("Parsing competitions...");
    let vocab = Vocabulary::default();
    let extractor = Extractor::new(vocab.clone());
    let normalizer = Normalizer::new(vocab);

    let blocks = extractor.extract(&html);
    let current_year = Utc::now().year();
    let events: Vec<EventRecord> = blocks
        .iter()
        .filter_map(|block| normalizer.normalize(block, current_year))
        .collect();
    tracing::info!(
        candidates = blocks.len(),
        normalized = events.len(),
        "normalization complete"
    );

    let events = dedupe(events);
    println!("✓ Found {} competitions", events.len());

    let ids = assign_ids(&events);
    Ok(ids.into_iter().zip(events).collect())
}

/// Write a file, creating parent directories as needed.
fn write_output(path: &str, content: &str) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }
    fs::write(path, content).with_context(|| format!("failed to write {path}"))
}
