pub mod dedup;
pub mod mapper;

pub use dedup::{dedup_query, is_duplicate};
pub use mapper::fixture_to_event;

use crate::components::{CalendarStore, Fixture, FixtureSource};
use crate::teams::Team;
use crate::utils::time::DateWindow;
use tracing::{error, info, warn};

/// What happened to a single fixture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureOutcome {
    Added,
    Skipped,
    Failed(String),
}

/// Counts reported after a sync run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncResult {
    /// Fixtures considered
    pub total: usize,
    pub added: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SyncResult {
    fn record(&mut self, outcome: &FixtureOutcome) {
        self.total += 1;
        match outcome {
            FixtureOutcome::Added => self.added += 1,
            FixtureOutcome::Skipped => self.skipped += 1,
            FixtureOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// Closing summary line, or `None` when there was nothing to sync
    pub fn summary(&self) -> Option<String> {
        if self.total == 0 {
            return None;
        }

        Some(format!(
            "Successfully added {} new matches to your calendar! ({} considered, {} already present, {} failed)",
            self.added, self.total, self.skipped, self.failed
        ))
    }
}

/// Fetch fixtures, degrading any failure to an empty list
pub async fn fetch_fixtures_or_empty<S>(source: &S, team: &Team, window: &DateWindow) -> Vec<Fixture>
where
    S: FixtureSource + ?Sized,
{
    match source.fetch_fixtures(team.id, window).await {
        Ok(fixtures) => fixtures,
        Err(e) => {
            warn!("Error fetching fixtures for {}: {}", team.name, e);
            Vec::new()
        }
    }
}

/// Dedup-check a fixture and insert its event when it is not in the calendar yet
pub async fn sync_fixture<C>(fixture: &Fixture, calendar: &C) -> FixtureOutcome
where
    C: CalendarStore + ?Sized,
{
    let title = fixture.title();

    match is_duplicate(fixture, calendar).await {
        Ok(true) => {
            info!("Skipping (already exists): {}", title);
            return FixtureOutcome::Skipped;
        }
        Ok(false) => {}
        Err(e) => {
            error!("Error checking for existing event {}: {}", title, e);
            return FixtureOutcome::Failed(e.to_string());
        }
    }

    match calendar.insert_event(&fixture_to_event(fixture)).await {
        Ok(_) => {
            info!("Added: {} on {}", title, fixture.kickoff.format("%Y-%m-%d"));
            FixtureOutcome::Added
        }
        Err(e) => {
            error!("Error creating event {}: {}", title, e);
            FixtureOutcome::Failed(e.to_string())
        }
    }
}

/// Sync a team's upcoming fixtures into the calendar, one fixture at a time
pub async fn sync_team<S, C>(source: &S, calendar: &C, team: &Team, window: &DateWindow) -> SyncResult
where
    S: FixtureSource + ?Sized,
    C: CalendarStore + ?Sized,
{
    info!("Fetching fixtures for {}...", team.name);

    let fixtures = fetch_fixtures_or_empty(source, team, window).await;
    if fixtures.is_empty() {
        info!("No upcoming fixtures found or API error");
        return SyncResult::default();
    }

    info!("Found {} upcoming matches", fixtures.len());

    let mut result = SyncResult::default();
    for fixture in &fixtures {
        let outcome = sync_fixture(fixture, calendar).await;
        result.record(&outcome);
    }

    result
}
