//! Google Calendar API client for listing busy events.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;
use slot_engine::busy::CalendarEvent;
use slot_engine::calendar::CalendarSource;
use slot_engine::error::{Result, SlotError};
use tracing::debug;

/// Upper bound on followed `nextPageToken`s for a single day.
const MAX_PAGES: usize = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventsPage {
    items: Vec<CalendarEvent>,
    next_page_token: Option<String>,
}

/// Lists events of one calendar with an API key.
#[derive(Debug, Clone)]
pub struct GoogleCalendarSource {
    client: Client,
    base_url: String,
    calendar_id: String,
    api_key: String,
}

impl GoogleCalendarSource {
    pub fn new(
        base_url: impl Into<String>,
        calendar_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            calendar_id: calendar_id.into(),
            api_key: api_key.into(),
        }
    }

    fn events_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SlotError::Upstream(format!("bad calendar base url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| SlotError::Upstream("calendar base url cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(["calendars", self.calendar_id.as_str(), "events"]);
        Ok(url)
    }

    async fn fetch_page(
        &self,
        url: Url,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        page_token: Option<&str>,
    ) -> Result<EventsPage> {
        let mut query = vec![
            ("key", self.api_key.clone()),
            ("timeMin", window_start.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("timeMax", window_end.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }

        let response = self
            .client
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(|e| SlotError::Upstream(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SlotError::Upstream(format!("calendar API returned {}", status)));
        }

        response
            .json::<EventsPage>()
            .await
            .map_err(|e| SlotError::Upstream(format!("malformed event payload: {}", e)))
    }
}

#[async_trait]
impl CalendarSource for GoogleCalendarSource {
    async fn fetch_events(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>> {
        let url = self.events_url()?;
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let page = self
                .fetch_page(url.clone(), window_start, window_end, page_token.as_deref())
                .await?;
            events.extend(page.items);

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(calendar = %self.calendar_id, events = events.len(), "listed calendar events");
        Ok(events)
    }
}
