use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("FOOTBALL_API_KEY environment variable not set")]
    #[diagnostic(
        code(football_calendar::missing_api_key),
        help(
            "Get a free API key from https://www.football-data.org/ and either \
             `export FOOTBALL_API_KEY='your_api_key_here'` or add it to your .env file"
        )
    )]
    MissingApiKey,

    #[error("OAuth client credentials not found at {0}")]
    #[diagnostic(
        code(football_calendar::missing_credentials),
        help(
            "Create an OAuth client (Desktop app) in the Google Cloud console, enable the \
             Google Calendar API and download the client secrets JSON to this path"
        )
    )]
    MissingClientCredentials(String),

    #[error("Team '{0}' not found in the list")]
    #[diagnostic(
        code(football_calendar::team_not_found),
        help("Enter a number from the list, a team key or part of a team name")
    )]
    TeamNotFound(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(football_calendar::config))]
    Config(String),

    #[error("Football data API error: {0}")]
    #[diagnostic(code(football_calendar::football_data))]
    FootballData(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(football_calendar::google_calendar))]
    GoogleCalendar(String),

    #[error("Authorization error: {0}")]
    #[diagnostic(code(football_calendar::auth))]
    Auth(String),

    #[error(transparent)]
    #[diagnostic(code(football_calendar::io))]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    #[diagnostic(code(football_calendar::http))]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(football_calendar::serialization))]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create football data API errors
pub fn football_data_error(message: &str) -> Error {
    Error::FootballData(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}

/// Helper to create authorization errors
pub fn auth_error(message: &str) -> Error {
    Error::Auth(message.to_string())
}
