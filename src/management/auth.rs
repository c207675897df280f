use std::path::PathBuf;

use chrono::Utc;

use crate::{catalog::CatalogError, config::Settings, spotify, types::Token};

/// Seconds before expiry at which a token is already treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Keeps the OAuth token on disk and refreshes it when it runs out.
pub struct TokenManager {
    token: Token,
    token_url: String,
    client_id: String,
    cache_path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token, settings: &Settings) -> Self {
        TokenManager {
            token,
            token_url: settings.token_url.clone(),
            client_id: settings.client_id.clone(),
            cache_path: settings.token_cache.clone(),
        }
    }

    pub async fn load(settings: &Settings) -> Result<Self, String> {
        let path = &settings.token_cache;
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self::new(token, settings))
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = &self.cache_path;
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns an access token that is good for at least a few more minutes.
    ///
    /// Refreshes and persists the token first when needed. A refresh the
    /// token endpoint rejects is an `Auth` error: the user has to log in again.
    pub async fn get_valid_token(&mut self) -> Result<String, CatalogError> {
        if self.is_expired() {
            self.token = spotify::auth::refresh_token(&self.token_url, &self.client_id, &self.token)
                .await?;
            // best effort, the in-memory token is already fresh
            let _ = self.persist().await;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        let valid_until = (self.token.obtained_at + self.token.expires_in)
            .saturating_sub(EXPIRY_MARGIN_SECS);
        now >= valid_until
    }
}
