//! Existence check used to avoid writing the same fixture twice.
//!
//! A fixture counts as present when the calendar holds any event that matches the
//! text "Home vs Away" and overlaps the minute starting at kickoff. This is an
//! approximation: renamed teams or events stored with a skewed start are not found.

use crate::components::{CalendarStore, EventQuery, Fixture};
use crate::error::AppResult;
use chrono::Duration;

/// Width of the window searched around kickoff
pub const DEDUP_WINDOW_MINUTES: i64 = 1;

/// Calendar search that finds an existing event for `fixture`
pub fn dedup_query(fixture: &Fixture) -> EventQuery {
    EventQuery {
        text: fixture.title(),
        time_min: fixture.kickoff,
        time_max: fixture.kickoff + Duration::minutes(DEDUP_WINDOW_MINUTES),
    }
}

/// Whether the calendar already has an event for `fixture`
pub async fn is_duplicate<C>(fixture: &Fixture, calendar: &C) -> AppResult<bool>
where
    C: CalendarStore + ?Sized,
{
    let existing = calendar.find_existing(&dedup_query(fixture)).await?;
    Ok(!existing.is_empty())
}
