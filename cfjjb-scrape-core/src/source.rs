use reqwest::Client;

use crate::{Error, Result};

/// The calendar page scraped by default.
pub const CALENDAR_URL: &str = "https://cfjjb.com/competitions/calendrier-competitions";

/// Fetches the raw calendar page. No parsing, no retries; a transport
/// failure is fatal to the pipeline.
pub struct CalendarSource {
    client: Client,
    url: String,
}

impl CalendarSource {
    /// Source pointed at the live CFJJB calendar.
    pub fn new() -> Self {
        Self::with_url(CALENDAR_URL)
    }

    /// Source pointed at an alternate URL (mirrors, fixtures served locally).
    pub fn with_url(url: impl Into<String>) -> Self {
        let client = Client::builder()
            .user_agent("cfjjb-scrape/0.1.0")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the full page body as text.
    ///
    /// The body is buffered in memory before returning; there is no timeout
    /// beyond the transport default.
    pub async fn fetch_page(&self) -> Result<String> {
        tracing::info!(url = %self.url, "fetching calendar page");

        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Fetch {
                url: self.url.clone(),
                message: format!("HTTP {} error", response.status()),
            });
        }

        let body = response.text().await?;
        tracing::debug!(bytes = body.len(), "calendar page fetched");
        Ok(body)
    }
}

impl Default for CalendarSource {
    fn default() -> Self {
        Self::new()
    }
}
