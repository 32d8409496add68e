use crate::components::google_calendar::{CalendarEvent, Reminder};
use crate::components::Fixture;
use chrono::Duration;

/// Length of a match event
pub const MATCH_DURATION_HOURS: i64 = 2;
/// Popup reminders, in minutes before kickoff
pub const REMINDER_MINUTES: [u32; 2] = [60, 15];

/// Build the calendar event for a fixture
pub fn fixture_to_event(fixture: &Fixture) -> CalendarEvent {
    CalendarEvent {
        title: fixture.title(),
        description: format!(
            "{}\n\nHome: {}\nAway: {}",
            fixture.competition, fixture.home_team, fixture.away_team
        ),
        start: fixture.kickoff,
        end: fixture.kickoff + Duration::hours(MATCH_DURATION_HOURS),
        reminders: REMINDER_MINUTES
            .iter()
            .map(|&minutes| Reminder { minutes })
            .collect(),
    }
}
