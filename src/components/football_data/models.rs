use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Name shown for a side the API has not decided yet
pub const UNDECIDED_TEAM: &str = "TBD";

/// A scheduled match between two teams
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub home_team: String,
    pub away_team: String,
    pub competition: String,
    pub kickoff: DateTime<Utc>,
}

impl Fixture {
    /// "Home vs Away", used both as event title and as dedup search text
    pub fn title(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }
}

/// Response of `GET /teams/{id}/matches`
#[derive(Debug, Deserialize)]
pub struct MatchesResponse {
    #[serde(default)]
    pub matches: Vec<ApiMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMatch {
    pub id: Option<u64>,
    pub utc_date: DateTime<Utc>,
    pub home_team: ApiTeam,
    pub away_team: ApiTeam,
    pub competition: ApiCompetition,
}

#[derive(Debug, Deserialize)]
pub struct ApiTeam {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiCompetition {
    pub name: String,
}

impl From<ApiMatch> for Fixture {
    fn from(m: ApiMatch) -> Self {
        Self {
            home_team: m.home_team.name.unwrap_or_else(|| UNDECIDED_TEAM.to_string()),
            away_team: m.away_team.name.unwrap_or_else(|| UNDECIDED_TEAM.to_string()),
            competition: m.competition.name,
            kickoff: m.utc_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_matches_response() {
        let body = r#"{
            "filters": {"dateFrom": "2025-03-01", "dateTo": "2025-05-30", "status": ["SCHEDULED"]},
            "resultSet": {"count": 2},
            "matches": [
                {
                    "id": 497410,
                    "utcDate": "2025-03-01T15:00:00Z",
                    "status": "SCHEDULED",
                    "competition": {"id": 2021, "name": "Premier League", "code": "PL"},
                    "homeTeam": {"id": 57, "name": "Arsenal FC", "shortName": "Arsenal"},
                    "awayTeam": {"id": 61, "name": "Chelsea FC", "shortName": "Chelsea"}
                },
                {
                    "id": 497411,
                    "utcDate": "2025-04-12T19:00:00Z",
                    "status": "SCHEDULED",
                    "competition": {"id": 2001, "name": "UEFA Champions League"},
                    "homeTeam": {"id": null, "name": null},
                    "awayTeam": {"id": 57, "name": "Arsenal FC"}
                }
            ]
        }"#;

        let response: MatchesResponse = serde_json::from_str(body).unwrap();
        let fixtures: Vec<Fixture> = response.matches.into_iter().map(Into::into).collect();

        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[0].title(), "Arsenal FC vs Chelsea FC");
        assert_eq!(fixtures[0].competition, "Premier League");
        assert_eq!(
            fixtures[0].kickoff,
            Utc.with_ymd_and_hms(2025, 3, 1, 15, 0, 0).unwrap()
        );
        assert_eq!(fixtures[1].title(), "TBD vs Arsenal FC");
    }

    #[test]
    fn test_missing_matches_is_empty() {
        let response: MatchesResponse = serde_json::from_str("{}").unwrap();
        assert!(response.matches.is_empty());
    }
}
