use super::oauth::{self, ClientSecrets};
use crate::error::{auth_error, AppResult};
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Google token endpoint
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
/// Access scope requested for the calendar
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Tokens are treated as expired this long before their actual expiry
const EXPIRY_SKEW_SECONDS: i64 = 60;

/// Token cache persisted between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub client_id: String,
    pub client_secret: String,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl StoredToken {
    /// Whether the access token can still be used at `now`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_SKEW_SECONDS) > now
    }

    /// Build a token from a token endpoint response. The refresh token is kept when
    /// the response does not carry a new one.
    pub fn from_response(
        response: TokenResponse,
        secrets: &ClientSecrets,
        previous_refresh_token: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let scopes = response
            .scope
            .map(|scope| scope.split_whitespace().map(str::to_string).collect())
            .unwrap_or_else(|| vec![CALENDAR_SCOPE.to_string()]);

        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token.or(previous_refresh_token),
            client_id: secrets.client_id.clone(),
            client_secret: secrets.client_secret.clone(),
            expires_at: now + Duration::seconds(response.expires_in.unwrap_or(3600)),
            scopes,
        }
    }

    /// Read a token cache file. Returns `None` when the file does not exist.
    pub fn load(path: &Path) -> AppResult<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Write the token cache file
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
}

/// Provides valid access tokens, refreshing and persisting them as needed
#[derive(Debug)]
pub struct TokenManager {
    token_file: PathBuf,
    credentials_file: PathBuf,
    client: Client,
    token: Mutex<Option<StoredToken>>,
}

impl TokenManager {
    pub fn new(token_file: PathBuf, credentials_file: PathBuf) -> Self {
        Self {
            token_file,
            credentials_file,
            client: Client::new(),
            token: Mutex::new(None),
        }
    }

    /// Get an access token, from the cache file, by refreshing, or through user consent
    pub async fn access_token(&self) -> AppResult<String> {
        let mut token_lock = self.token.lock().await;

        if token_lock.is_none() {
            *token_lock = StoredToken::load(&self.token_file)?;
        }

        let token = match token_lock.take() {
            Some(token) if token.is_valid_at(Utc::now()) => token,
            Some(token) if token.refresh_token.is_some() => {
                info!("Access token expired, refreshing");
                let refreshed = self.refresh(&token).await?;
                refreshed.save(&self.token_file)?;
                refreshed
            }
            _ => self.authorize().await?,
        };

        let access_token = token.access_token.clone();
        *token_lock = Some(token);
        Ok(access_token)
    }

    /// Run the consent flow and store the resulting token
    pub async fn authorize(&self) -> AppResult<StoredToken> {
        let secrets = ClientSecrets::load(&self.credentials_file)?;
        let response = oauth::run_consent_flow(&self.client, &secrets).await?;
        let token = StoredToken::from_response(response, &secrets, None, Utc::now());
        token.save(&self.token_file)?;
        info!("Token saved to {}", self.token_file.display());
        Ok(token)
    }

    /// Exchange the refresh token for a new access token
    async fn refresh(&self, token: &StoredToken) -> AppResult<StoredToken> {
        let refresh_token = token
            .refresh_token
            .clone()
            .ok_or_else(|| auth_error("No refresh token in token data"))?;

        let params = [
            ("client_id", token.client_id.clone()),
            ("client_secret", token.client_secret.clone()),
            ("refresh_token", refresh_token.clone()),
            ("grant_type", "refresh_token".to_string()),
        ];

        let response = self
            .client
            .post(TOKEN_URL)
            .form(&params)
            .send()
            .await
            .map_err(|e| auth_error(&format!("Failed to refresh token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(auth_error(&format!(
                "Failed to refresh token: HTTP {} - {}",
                status, error_body
            )));
        }

        let new_token: TokenResponse = response
            .json()
            .await
            .map_err(|e| auth_error(&format!("Failed to parse token response: {}", e)))?;

        debug!("Refreshed access token");

        let secrets = ClientSecrets {
            client_id: token.client_id.clone(),
            client_secret: token.client_secret.clone(),
        };
        Ok(StoredToken::from_response(
            new_token,
            &secrets,
            Some(refresh_token),
            Utc::now(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::TimeZone;

    fn secrets() -> ClientSecrets {
        ClientSecrets {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
        }
    }

    #[test]
    fn test_token_validity_uses_skew() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let mut token = StoredToken {
            access_token: "access".to_string(),
            refresh_token: None,
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            expires_at: now + Duration::seconds(120),
            scopes: vec![],
        };
        assert!(token.is_valid_at(now));

        token.expires_at = now + Duration::seconds(30);
        assert!(!token.is_valid_at(now));

        token.expires_at = now - Duration::seconds(1);
        assert!(!token.is_valid_at(now));
    }

    #[test]
    fn test_from_response_keeps_previous_refresh_token() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let response: TokenResponse = serde_json::from_str(
            r#"{"access_token": "new-access", "expires_in": 3599, "token_type": "Bearer"}"#,
        )
        .unwrap();

        let token =
            StoredToken::from_response(response, &secrets(), Some("refresh".to_string()), now);

        assert_eq!(token.access_token, "new-access");
        assert_eq!(token.refresh_token.as_deref(), Some("refresh"));
        assert_eq!(token.client_id, "client-id");
        assert_eq!(token.expires_at, now + Duration::seconds(3599));
        assert_eq!(token.scopes, vec![CALENDAR_SCOPE.to_string()]);
    }

    #[test]
    fn test_token_cache_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache").join("token.json");

        assert_eq!(StoredToken::load(&path).unwrap(), None);

        let token = StoredToken {
            access_token: "access".to_string(),
            refresh_token: Some("refresh".to_string()),
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            expires_at: Utc.with_ymd_and_hms(2025, 3, 1, 13, 0, 0).unwrap(),
            scopes: vec![CALENDAR_SCOPE.to_string()],
        };
        token.save(&path).unwrap();

        assert_eq!(StoredToken::load(&path).unwrap(), Some(token));
    }

    #[tokio::test]
    async fn test_valid_cached_token_is_used_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let token_file = dir.path().join("token.json");
        StoredToken {
            access_token: "cached-access".to_string(),
            refresh_token: Some("refresh".to_string()),
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
            scopes: vec![],
        }
        .save(&token_file)
        .unwrap();

        let manager = TokenManager::new(token_file, dir.path().join("credentials.json"));
        assert_eq!(manager.access_token().await.unwrap(), "cached-access");
    }

    #[tokio::test]
    async fn test_missing_token_and_credentials_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let manager = TokenManager::new(
            dir.path().join("token.json"),
            dir.path().join("credentials.json"),
        );

        let err = manager.access_token().await.unwrap_err();
        assert!(matches!(err, Error::MissingClientCredentials(_)));
    }
}
