#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use football_calendar::components::{
    CalendarEvent, CalendarStore, EventQuery, ExistingEvent, Fixture, FixtureSource,
};
use football_calendar::error::{football_data_error, google_calendar_error, AppResult};
use football_calendar::teams::Team;
use football_calendar::utils::time::DateWindow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn fixture(home: &str, away: &str, kickoff: DateTime<Utc>) -> Fixture {
    Fixture {
        home_team: home.to_string(),
        away_team: away.to_string(),
        competition: "Premier League".to_string(),
        kickoff,
    }
}

pub fn arsenal() -> Team {
    Team {
        id: 57,
        name: "Arsenal FC".to_string(),
        competition: "PL".to_string(),
    }
}

/// Mock fixture source returning a fixed list, or failing like a dead API
pub struct MockFixtureSource {
    fixtures: Option<Vec<Fixture>>,
    pub calls: AtomicUsize,
}

impl MockFixtureSource {
    pub fn new(fixtures: Vec<Fixture>) -> Self {
        Self {
            fixtures: Some(fixtures),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fixtures: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl FixtureSource for MockFixtureSource {
    async fn fetch_fixtures(&self, _team_id: u32, _window: &DateWindow) -> AppResult<Vec<Fixture>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.fixtures
            .clone()
            .ok_or_else(|| football_data_error("Failed to fetch fixtures: HTTP 503"))
    }
}

/// Event stored in the mock calendar
#[derive(Debug, Clone)]
pub struct StoredEvent {
    pub summary: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub reminders: Vec<u32>,
}

/// In-memory calendar answering searches like the Google API does: an event matches
/// when it overlaps the time range and the text occurs in its summary or description.
#[derive(Default)]
pub struct MockCalendar {
    pub events: Mutex<Vec<StoredEvent>>,
    pub lookups: AtomicUsize,
    fail_lookups: bool,
    fail_inserts_for: Vec<String>,
}

impl MockCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event(self, summary: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.events.lock().unwrap().push(StoredEvent {
            summary: summary.to_string(),
            description: String::new(),
            start,
            end,
            reminders: Vec::new(),
        });
        self
    }

    pub fn failing_lookups(mut self) -> Self {
        self.fail_lookups = true;
        self
    }

    pub fn failing_insert(mut self, title: &str) -> Self {
        self.fail_inserts_for.push(title.to_string());
        self
    }

    pub fn stored(&self) -> Vec<StoredEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl CalendarStore for MockCalendar {
    async fn find_existing(&self, query: &EventQuery) -> AppResult<Vec<ExistingEvent>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups {
            return Err(google_calendar_error("Failed to fetch events: HTTP 500"));
        }

        let text = query.text.to_lowercase();
        let events = self.events.lock().unwrap();
        Ok(events
            .iter()
            .enumerate()
            .filter(|(_, e)| e.end > query.time_min && e.start < query.time_max)
            .filter(|(_, e)| {
                e.summary.to_lowercase().contains(&text)
                    || e.description.to_lowercase().contains(&text)
            })
            .map(|(i, e)| ExistingEvent {
                id: format!("event{}", i),
                summary: Some(e.summary.clone()),
                description: Some(e.description.clone()),
                start_date_time: Some(e.start.to_rfc3339()),
                html_link: None,
            })
            .collect())
    }

    async fn insert_event(&self, event: &CalendarEvent) -> AppResult<ExistingEvent> {
        if self.fail_inserts_for.contains(&event.title) {
            return Err(google_calendar_error("Failed to create event: HTTP 403"));
        }

        let mut events = self.events.lock().unwrap();
        events.push(StoredEvent {
            summary: event.title.clone(),
            description: event.description.clone(),
            start: event.start,
            end: event.end,
            reminders: event.reminders.iter().map(|r| r.minutes).collect(),
        });

        Ok(ExistingEvent {
            id: format!("event{}", events.len() - 1),
            summary: Some(event.title.clone()),
            ..Default::default()
        })
    }
}
