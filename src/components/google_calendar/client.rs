use super::models::{CalendarEvent, EventList, EventResource, ExistingEvent};
use super::token::TokenManager;
use crate::components::{CalendarStore, EventQuery};
use crate::error::{google_calendar_error, AppResult};
use crate::utils::time::to_rfc3339;
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Google Calendar v3 endpoint
pub const CALENDAR_API_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Client for reading and writing events of one Google calendar
#[derive(Debug, Clone)]
pub struct GoogleCalendarClient {
    client: Client,
    token_manager: Arc<TokenManager>,
    calendar_id: String,
    base_url: String,
}

impl GoogleCalendarClient {
    pub fn new(token_manager: Arc<TokenManager>, calendar_id: &str) -> AppResult<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            token_manager,
            calendar_id: calendar_id.to_string(),
            base_url: CALENDAR_API_BASE_URL.to_string(),
        })
    }

    /// `{base}/calendars/{calendarId}/events` with the calendar id percent-encoded
    fn events_url(&self) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| google_calendar_error("Calendar API URL cannot have a path"))?
            .pop_if_empty()
            .extend(["calendars", self.calendar_id.as_str(), "events"]);
        Ok(url)
    }

    async fn check_status(response: Response, action: &str) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response".to_string());
        Err(google_calendar_error(&format!(
            "Failed to {}: HTTP {} - {}",
            action, status, error_body
        )))
    }
}

/// Query parameters for an events search
pub fn build_list_query(query: &EventQuery) -> Vec<(&'static str, String)> {
    vec![
        ("timeMin", to_rfc3339(&query.time_min)),
        ("timeMax", to_rfc3339(&query.time_max)),
        ("q", query.text.clone()),
        // expand recurring events
        ("singleEvents", "true".to_string()),
    ]
}

#[async_trait]
impl CalendarStore for GoogleCalendarClient {
    async fn find_existing(&self, query: &EventQuery) -> AppResult<Vec<ExistingEvent>> {
        let access_token = self.token_manager.access_token().await?;

        let response = self
            .client
            .get(self.events_url()?)
            .bearer_auth(access_token)
            .query(&build_list_query(query))
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to fetch events: {}", e)))?;
        let response = Self::check_status(response, "fetch events").await?;

        let events: EventList = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse events response: {}", e)))?;

        debug!("Found {} events matching '{}'", events.items.len(), query.text);

        Ok(events.items.into_iter().map(ExistingEvent::from).collect())
    }

    async fn insert_event(&self, event: &CalendarEvent) -> AppResult<ExistingEvent> {
        let access_token = self.token_manager.access_token().await?;

        let response = self
            .client
            .post(self.events_url()?)
            .bearer_auth(access_token)
            .json(&EventResource::from(event))
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to create event: {}", e)))?;
        let response = Self::check_status(response, "create event").await?;

        let created: EventResource = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse created event: {}", e)))?;

        Ok(created.into())
    }
}
