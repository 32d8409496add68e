use crate::error::AppResult;
use crate::utils::time::DateWindow;
use async_trait::async_trait;

pub mod football_data;
pub mod google_calendar;

pub use football_data::{FootballDataClient, Fixture};
pub use google_calendar::{CalendarEvent, ExistingEvent, GoogleCalendarClient};

/// Source of upcoming fixtures
#[async_trait]
pub trait FixtureSource: Send + Sync {
    /// Fetch scheduled fixtures for a team within the date window
    async fn fetch_fixtures(&self, team_id: u32, window: &DateWindow) -> AppResult<Vec<Fixture>>;
}

/// Calendar that fixtures are written to
#[async_trait]
pub trait CalendarStore: Send + Sync {
    /// Events overlapping `query`'s time range that match its text
    async fn find_existing(&self, query: &EventQuery) -> AppResult<Vec<ExistingEvent>>;

    /// Insert an event, returning the created event
    async fn insert_event(&self, event: &CalendarEvent) -> AppResult<ExistingEvent>;
}

/// Free-text search over a time range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub text: String,
    pub time_min: chrono::DateTime<chrono::Utc>,
    pub time_max: chrono::DateTime<chrono::Utc>,
}
