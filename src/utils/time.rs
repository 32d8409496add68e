use chrono::{DateTime, Duration, Local, NaiveDate, SecondsFormat, Utc};

/// Inclusive range of calendar dates to fetch fixtures for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// Window starting at `start` and spanning `days` days
    pub fn starting(start: NaiveDate, days: u32) -> Self {
        let to = start
            .checked_add_signed(Duration::days(i64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        Self { from: start, to }
    }

    /// Window starting at today's local date
    pub fn from_today(days: u32) -> Self {
        Self::starting(Local::now().date_naive(), days)
    }

    /// Dates formatted as YYYY-MM-DD
    pub fn as_query_dates(&self) -> (String, String) {
        (
            self.from.format("%Y-%m-%d").to_string(),
            self.to.format("%Y-%m-%d").to_string(),
        )
    }
}

/// RFC 3339 timestamp in UTC with second precision, e.g. `2025-03-01T15:00:00Z`
pub fn to_rfc3339(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}
