use football_calendar::components::google_calendar::TokenManager;
use football_calendar::config::{google_credentials_file, google_token_file};
use football_calendar::startup;

/// Runs the Google consent flow and writes a fresh token cache, without syncing.
#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    startup::init_logging()?;

    // Only the Google settings are needed here, so the API key is not required
    dotenvy::dotenv().ok();
    let token_file = google_token_file();

    let token_manager = TokenManager::new(token_file.clone(), google_credentials_file());
    token_manager.authorize().await?;

    println!("Token successfully saved to {}!", token_file.display());

    Ok(())
}
