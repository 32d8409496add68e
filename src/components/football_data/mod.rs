pub mod models;

pub use models::Fixture;

use super::FixtureSource;
use crate::error::{football_data_error, AppResult};
use crate::utils::time::DateWindow;
use async_trait::async_trait;
use models::MatchesResponse;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Client for the football-data.org v4 API
#[derive(Debug, Clone)]
pub struct FootballDataClient {
    client: Client,
    base_url: Url,
}

impl FootballDataClient {
    /// Create a client that authenticates with `api_key`
    pub fn new(base_url: &str, api_key: &str) -> AppResult<Self> {
        let mut api_key = HeaderValue::from_str(api_key)
            .map_err(|e| football_data_error(&format!("Invalid API key: {}", e)))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("X-Auth-Token", api_key);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;

        let base_url = Url::parse(base_url)
            .map_err(|e| football_data_error(&format!("Invalid base URL {}: {}", base_url, e)))?;

        Ok(Self { client, base_url })
    }

    fn matches_url(&self, team_id: u32) -> AppResult<Url> {
        let team_id = team_id.to_string();
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| football_data_error("Base URL cannot have a path"))?
            .pop_if_empty()
            .extend(["teams", team_id.as_str(), "matches"]);
        Ok(url)
    }
}

/// Query parameters for scheduled matches within a window
pub fn build_matches_query(window: &DateWindow) -> Vec<(&'static str, String)> {
    let (date_from, date_to) = window.as_query_dates();
    vec![
        ("dateFrom", date_from),
        ("dateTo", date_to),
        ("status", "SCHEDULED".to_string()),
    ]
}

#[async_trait]
impl FixtureSource for FootballDataClient {
    async fn fetch_fixtures(&self, team_id: u32, window: &DateWindow) -> AppResult<Vec<Fixture>> {
        let url = self.matches_url(team_id)?;

        let response = self
            .client
            .get(url)
            .query(&build_matches_query(window))
            .send()
            .await
            .map_err(|e| football_data_error(&format!("Failed to fetch fixtures: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(football_data_error(&format!(
                "Failed to fetch fixtures: HTTP {} - {}",
                status, error_body
            )));
        }

        let data: MatchesResponse = response
            .json()
            .await
            .map_err(|e| football_data_error(&format!("Failed to parse fixtures response: {}", e)))?;

        debug!("Fetched {} matches for team {}", data.matches.len(), team_id);

        Ok(data.matches.into_iter().map(Fixture::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_build_matches_query() {
        let window = DateWindow::starting(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), 90);
        let query = build_matches_query(&window);
        assert_eq!(
            query,
            vec![
                ("dateFrom", "2025-03-01".to_string()),
                ("dateTo", "2025-05-30".to_string()),
                ("status", "SCHEDULED".to_string()),
            ]
        );
    }

    #[test]
    fn test_matches_url() {
        let client = FootballDataClient::new("https://api.football-data.org/v4", "key").unwrap();
        assert_eq!(
            client.matches_url(86).unwrap().as_str(),
            "https://api.football-data.org/v4/teams/86/matches"
        );

        let client = FootballDataClient::new("https://api.football-data.org/v4/", "key").unwrap();
        assert_eq!(
            client.matches_url(57).unwrap().as_str(),
            "https://api.football-data.org/v4/teams/57/matches"
        );
    }

    #[test]
    fn test_invalid_api_key_is_rejected() {
        assert!(FootballDataClient::new("https://api.football-data.org/v4", "bad\nkey").is_err());
    }
}
