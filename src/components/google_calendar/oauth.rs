use super::token::{TokenResponse, CALENDAR_SCOPE, TOKEN_URL};
use crate::error::{auth_error, AppResult, Error};
use reqwest::Client;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use url::Url;

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// OAuth client id and secret
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
}

/// Client secrets file as downloaded from the Google Cloud console
#[derive(Debug, Deserialize)]
struct ClientSecretsFile {
    installed: Option<ClientSecrets>,
    web: Option<ClientSecrets>,
}

impl ClientSecrets {
    /// Load client secrets from a JSON file with an `installed` or `web` section
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(Error::MissingClientCredentials(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> AppResult<Self> {
        let file: ClientSecretsFile = serde_json::from_str(content).map_err(|e| {
            Error::Config(format!("Invalid OAuth client secrets file: {}", e))
        })?;

        file.installed.or(file.web).ok_or_else(|| {
            Error::Config(
                "OAuth client secrets file has no `installed` or `web` section".to_string(),
            )
        })
    }
}

/// URL the user is sent to for granting calendar access
pub fn authorization_url(client_id: &str, redirect_uri: &str, state: &str) -> AppResult<Url> {
    Url::parse_with_params(
        AUTH_URL,
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
            ("access_type", "offline"),
            ("prompt", "consent"),
            ("scope", CALENDAR_SCOPE),
            ("state", state),
        ],
    )
    .map_err(|e| auth_error(&format!("Failed to build authorization URL: {}", e)))
}

/// Extract the authorization code from the redirect request path
pub fn parse_callback(request_path: &str, expected_state: &str) -> AppResult<String> {
    let url = Url::parse("http://localhost")
        .and_then(|base| base.join(request_path))
        .map_err(|e| auth_error(&format!("Invalid callback URL: {}", e)))?;

    let mut code = None;
    let mut state = None;
    for (key, value) in url.query_pairs() {
        match &*key {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => {
                return Err(auth_error(&format!("Authorization was denied: {}", value)));
            }
            _ => {}
        }
    }

    if state.as_deref() != Some(expected_state) {
        return Err(auth_error("State mismatch in authorization callback"));
    }

    code.ok_or_else(|| auth_error("No authorization code found in callback"))
}

/// Run the installed-app consent flow and exchange the code for tokens.
///
/// A loopback server on an ephemeral port receives the redirect.
pub async fn run_consent_flow(client: &Client, secrets: &ClientSecrets) -> AppResult<TokenResponse> {
    let server = tiny_http::Server::http("127.0.0.1:0")
        .map_err(|e| auth_error(&format!("Failed to start callback server: {}", e)))?;
    let port = server
        .server_addr()
        .to_ip()
        .map(|addr| addr.port())
        .ok_or_else(|| auth_error("Callback server has no TCP address"))?;
    let redirect_uri = format!("http://127.0.0.1:{}", port);

    // Random state guards against forged callbacks
    let state = uuid::Uuid::new_v4().to_string();
    let auth_url = authorization_url(&secrets.client_id, &redirect_uri, &state)?;

    println!("Opening browser for Google Calendar authorization...");
    if let Err(e) = webbrowser::open(auth_url.as_str()) {
        warn!("Could not open browser: {}", e);
    }
    println!("If the browser did not open, visit this URL:\n{}", auth_url);
    println!("Waiting for authorization callback...");

    let code = tokio::task::spawn_blocking(move || -> AppResult<String> {
        let request = server.recv()?;
        let result = parse_callback(request.url(), &state);

        let message = match &result {
            Ok(_) => "Authorization successful! You can close this window.".to_string(),
            Err(e) => format!("Authorization failed: {}", e),
        };
        request.respond(tiny_http::Response::from_string(message))?;

        result
    })
    .await
    .map_err(|e| auth_error(&format!("Callback task failed: {}", e)))??;

    let response = client
        .post(TOKEN_URL)
        .form(&[
            ("client_id", secrets.client_id.as_str()),
            ("client_secret", secrets.client_secret.as_str()),
            ("code", code.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .map_err(|e| auth_error(&format!("Failed to get token: {}", e)))?;

    if !response.status().is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response".to_string());
        return Err(auth_error(&format!("Failed to get token: {}", error_text)));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| auth_error(&format!("Failed to parse token response: {}", e)))?;

    info!("Authorization completed");
    Ok(token)
}
