use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{
    catalog::CatalogError,
    config::Settings,
    server::start_api_server,
    types::{PkceToken, Token},
    utils, warning,
};

const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Runs the complete OAuth 2.0 PKCE flow and returns the obtained token.
///
/// 1. **PKCE Setup**: generates a code verifier and its S256 challenge
/// 2. **Server Start**: binds the local callback server on `SERVER_ADDRESS`
/// 3. **Browser Launch**: opens the authorization URL in the default browser
/// 4. **Callback Handling**: the callback exchanges the code for a token
/// 5. **Wait**: polls the shared state for up to 60 seconds
///
/// The caller is responsible for persisting the token.
///
/// # Errors
///
/// - the callback server cannot bind its address
/// - no token arrived within the timeout
pub async fn authorize(
    settings: &Settings,
    shared_state: Arc<Mutex<Option<PkceToken>>>,
) -> Result<Token, CatalogError> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    let server = start_api_server(settings.clone(), Arc::clone(&shared_state))
        .await
        .map_err(|e| CatalogError::Auth(format!("cannot start callback server: {}", e)))?;

    let auth_url = Url::parse_with_params(
        &settings.auth_url,
        &[
            ("client_id", settings.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("code_challenge", code_challenge.as_str()),
            ("code_challenge_method", "S256"),
            ("scope", settings.scope.as_str()),
        ],
    )
    .map_err(|e| CatalogError::Auth(format!("invalid SPOTIFY_API_AUTH_URL: {}", e)))?;

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state).await;
    server.abort();

    token.ok_or_else(|| CatalogError::Auth("authentication failed or timed out".into()))
}

/// Polls the shared state until the callback stored a token or the timeout hits.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    let start = Instant::now();

    while start.elapsed() < CALLBACK_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code plus the PKCE verifier for a token.
pub async fn exchange_code_pkce(
    settings: &Settings,
    code: &str,
    verifier: &str,
) -> Result<Token, CatalogError> {
    let response = Client::new()
        .post(&settings.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", settings.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", settings.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let body = token_response(response).await?;
    Ok(Token {
        access_token: body.access_token,
        refresh_token: body.refresh_token.unwrap_or_default(),
        scope: body.scope.unwrap_or_default(),
        expires_in: body.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// Trades a refresh token for a fresh access token.
///
/// Spotify may or may not rotate the refresh token; when it does not, the
/// old one stays valid and is carried over.
pub async fn refresh_token(
    token_url: &str,
    client_id: &str,
    current: &Token,
) -> Result<Token, CatalogError> {
    let response = Client::new()
        .post(token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", current.refresh_token.as_str()),
            ("client_id", client_id),
        ])
        .send()
        .await?;

    let body = token_response(response).await?;
    Ok(Token {
        access_token: body.access_token,
        refresh_token: body
            .refresh_token
            .unwrap_or_else(|| current.refresh_token.clone()),
        scope: body.scope.unwrap_or_else(|| current.scope.clone()),
        expires_in: body.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

async fn token_response(response: reqwest::Response) -> Result<TokenResponse, CatalogError> {
    let status = response.status();
    if status.is_client_error() {
        let detail = response.text().await.unwrap_or_default();
        return Err(CatalogError::Auth(format!(
            "token endpoint returned {}: {}",
            status, detail
        )));
    }
    if !status.is_success() {
        return Err(CatalogError::Network(format!(
            "token endpoint returned {}",
            status
        )));
    }
    Ok(response.json::<TokenResponse>().await?)
}
