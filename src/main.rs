use football_calendar::components::google_calendar::TokenManager;
use football_calendar::components::{FootballDataClient, GoogleCalendarClient};
use football_calendar::startup;
use football_calendar::sync::sync_team;
use football_calendar::utils::time::DateWindow;
use std::sync::Arc;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    // Load configuration
    let config = startup::load_config()?;

    println!("\nFootball Calendar Sync");
    println!("{}", "=".repeat(60));

    // Get team selection
    let team = startup::prompt_team(&config.teams)?;

    // Authenticate with Google Calendar before touching any fixtures
    let token_manager = Arc::new(TokenManager::new(
        config.google_token_file.clone(),
        config.google_credentials_file.clone(),
    ));
    token_manager.access_token().await?;
    info!("Successfully authenticated with Google Calendar");

    let fixtures = FootballDataClient::new(&config.football_api_base_url, &config.football_api_key)?;
    let calendar = GoogleCalendarClient::new(token_manager, &config.google_calendar_id)?;
    let window = DateWindow::from_today(config.lookahead_days);

    println!("{}", "=".repeat(60));
    let result = sync_team(&fixtures, &calendar, &team, &window).await;
    println!("{}", "=".repeat(60));

    // Nothing fetched: the sync already reported it
    if let Some(summary) = result.summary() {
        println!("\n{}", summary);
        println!("\nDone! Check your Google Calendar.\n");
    }

    Ok(())
}
