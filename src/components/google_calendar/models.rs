use crate::utils::time::to_rfc3339;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Time zone attached to written event times
const EVENT_TIME_ZONE: &str = "UTC";

/// Popup reminder offset before the event start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reminder {
    pub minutes: u32,
}

/// Event to be written to the calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub title: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub reminders: Vec<Reminder>,
}

/// Event already present in the calendar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingEvent {
    pub id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub start_date_time: Option<String>,
    pub html_link: Option<String>,
}

/// Wire format of an event resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<EventDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<EventDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders: Option<EventReminders>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    /// Timed events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// All-day events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventReminders {
    pub use_default: bool,
    #[serde(default)]
    pub overrides: Vec<ReminderOverride>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReminderOverride {
    pub method: String,
    pub minutes: u32,
}

/// Response of `GET /calendars/{calendarId}/events`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventList {
    #[serde(default)]
    pub items: Vec<EventResource>,
    pub next_page_token: Option<String>,
}

impl From<EventResource> for ExistingEvent {
    fn from(resource: EventResource) -> Self {
        Self {
            id: resource.id.unwrap_or_default(),
            summary: resource.summary,
            description: resource.description,
            start_date_time: resource.start.and_then(|start| start.date_time.or(start.date)),
            html_link: resource.html_link,
        }
    }
}

impl From<&CalendarEvent> for EventResource {
    fn from(event: &CalendarEvent) -> Self {
        let date_time = |instant: &DateTime<Utc>| EventDateTime {
            date_time: Some(to_rfc3339(instant)),
            date: None,
            time_zone: Some(EVENT_TIME_ZONE.to_string()),
        };

        Self {
            id: None,
            summary: Some(event.title.clone()),
            description: Some(event.description.clone()),
            start: Some(date_time(&event.start)),
            end: Some(date_time(&event.end)),
            reminders: Some(EventReminders {
                use_default: false,
                overrides: event
                    .reminders
                    .iter()
                    .map(|reminder| ReminderOverride {
                        method: "popup".to_string(),
                        minutes: reminder.minutes,
                    })
                    .collect(),
            }),
            html_link: None,
        }
    }
}
