use crate::error::{config_error, AppResult, Error};
use crate::teams::TeamTable;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};

/// Default football-data.org API endpoint
pub const DEFAULT_FOOTBALL_API_BASE_URL: &str = "https://api.football-data.org/v4";
/// Default number of days to look ahead for fixtures
pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 90;
/// Calendar used when none is configured
pub const DEFAULT_CALENDAR_ID: &str = "primary";

/// Runtime configuration, built once at startup and passed down explicitly
#[derive(Debug, Clone)]
pub struct Config {
    /// football-data.org API key
    pub football_api_key: String,
    /// Base URL of the football-data.org API
    pub football_api_base_url: String,
    /// Number of days from today to fetch fixtures for
    pub lookahead_days: u32,
    /// Target Google Calendar
    pub google_calendar_id: String,
    /// OAuth client secrets file downloaded from the Google Cloud console
    pub google_credentials_file: PathBuf,
    /// Token cache written after consent or refresh
    pub google_token_file: PathBuf,
    /// Teams that can be selected
    pub teams: TeamTable,
}

impl Config {
    /// Load configuration from the environment, a `.env` file and the optional teams file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let football_api_key = env::var("FOOTBALL_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(Error::MissingApiKey)?;

        let football_api_base_url = env::var("FOOTBALL_API_BASE_URL")
            .unwrap_or_else(|_| String::from(DEFAULT_FOOTBALL_API_BASE_URL));

        let lookahead_days = match env::var("LOOKAHEAD_DAYS") {
            Ok(value) => parse_lookahead_days(&value)?,
            Err(_) => DEFAULT_LOOKAHEAD_DAYS,
        };

        let google_calendar_id = env::var("GOOGLE_CALENDAR_ID")
            .unwrap_or_else(|_| String::from(DEFAULT_CALENDAR_ID));
        let google_credentials_file = google_credentials_file();
        let google_token_file = google_token_file();

        // Built-in teams, extended by the optional teams file
        let teams_file = path_from_env("TEAMS_FILE", "config/teams.toml");
        let mut teams = TeamTable::builtin();
        let merged = teams.merge_file(&teams_file)?;
        if merged > 0 {
            info!("Loaded {} teams from {}", merged, teams_file.display());
        }

        let config = Config {
            football_api_key,
            football_api_base_url,
            lookahead_days,
            google_calendar_id,
            google_credentials_file,
            google_token_file,
            teams,
        };
        debug!(
            "Loaded configuration: calendar={} lookahead_days={} teams={}",
            config.google_calendar_id,
            config.lookahead_days,
            config.teams.len()
        );

        Ok(config)
    }
}

/// OAuth client secrets path from `GOOGLE_CREDENTIALS_FILE`
pub fn google_credentials_file() -> PathBuf {
    path_from_env("GOOGLE_CREDENTIALS_FILE", "credentials.json")
}

/// Token cache path from `GOOGLE_TOKEN_FILE`
pub fn google_token_file() -> PathBuf {
    path_from_env("GOOGLE_TOKEN_FILE", "token.json")
}

fn path_from_env(var: &str, default: &str) -> PathBuf {
    env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn parse_lookahead_days(value: &str) -> AppResult<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| config_error(&format!("Invalid LOOKAHEAD_DAYS value: {}", value)))
}
