mod client;
pub mod models;
pub mod oauth;
pub mod token;

pub use client::{build_list_query, GoogleCalendarClient, CALENDAR_API_BASE_URL};
pub use models::{CalendarEvent, ExistingEvent, Reminder};
pub use token::{StoredToken, TokenManager};
