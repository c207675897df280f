//! # Spotify Integration Module
//!
//! This module implements [`CatalogGateway`] against the Spotify Web API and
//! provides the OAuth 2.0 PKCE flow that produces the token it uses.
//!
//! ## Architecture
//!
//! ```text
//! Selection Layer (Chooser, SuggestionEngine)
//!          ↓  CatalogGateway
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     ├── Collections (playlists, albums, paginated track lists)
//!     ├── Search (playlists, albums, artists)
//!     └── User (profile, library playlists)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Error Handling
//!
//! Responses are mapped onto [`CatalogError`]:
//! - **400 / 404** - `NotFound`; Spotify answers 400 for malformed ids
//! - **401 / 403** - `Auth`; the user has to run `sptoolbox auth` again
//! - **everything else** - `Network`, including transport and JSON decoding errors
//!
//! ### Retries
//! Retrying is the gateway's business, the selection layer never retries:
//! - **502 Bad Gateway** is retried after 10 seconds
//! - **429 Too Many Requests** is retried after `Retry-After` seconds when that is at most 120
//! - at most three attempts per request
//!
//! ## API Coverage
//!
//! - `GET /playlists/{id}` and its `tracks.next` pages
//! - `GET /albums/{id}` and its `tracks.next` pages
//! - `GET /search?type=playlist,album,artist`
//! - `GET /me`
//! - `GET /me/playlists`
//! - `POST /api/token` - token exchange and refresh

pub mod auth;
mod collections;
mod search;
mod user;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url, header::RETRY_AFTER};
use serde::de::DeserializeOwned;
use tokio::{sync::Mutex, time::sleep};

use crate::{
    catalog::{CatalogError, CatalogGateway, SearchResults},
    config::Settings,
    management::TokenManager,
    types::{CatalogEntry, Paging, RawCollection, ResourceType, User},
    warning,
};

const MAX_ATTEMPTS: u32 = 3;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Spotify Web API client used as the production catalog gateway.
pub struct SpotifyCatalog {
    client: Client,
    settings: Settings,
    tokens: Arc<Mutex<TokenManager>>,
}

impl SpotifyCatalog {
    pub fn new(settings: Settings, tokens: TokenManager) -> Self {
        Self {
            client: Client::new(),
            settings,
            tokens: Arc::new(Mutex::new(tokens)),
        }
    }

    /// Builds a client from the token stored by `sptoolbox auth`.
    pub async fn connect(settings: Settings) -> Result<Self, CatalogError> {
        let tokens = TokenManager::load(&settings)
            .await
            .map_err(|e| CatalogError::Auth(format!("no stored session: {}", e)))?;
        Ok(Self::new(settings, tokens))
    }

    /// API URL for the given path segments, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = Url::parse(&self.settings.api_url)
            .map_err(|e| CatalogError::Network(format!("invalid SPOTIFY_API_URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| CatalogError::Network("SPOTIFY_API_URL cannot be a base URL".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// A valid access token, refreshed first if needed.
    ///
    /// The refresh runs in its own task: Spotify may rotate the refresh token,
    /// and an aborted search must not drop the response before it is stored.
    async fn access_token(&self) -> Result<String, CatalogError> {
        let tokens = Arc::clone(&self.tokens);
        tokio::spawn(async move { tokens.lock().await.get_valid_token().await })
            .await
            .map_err(|e| CatalogError::Network(format!("token refresh did not finish: {}", e)))?
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, CatalogError> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let token = self.access_token().await?;
            let response = self
                .client
                .get(url.clone())
                .bearer_auth(token)
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                return Ok(response.json::<T>().await?);
            }

            if attempt < MAX_ATTEMPTS {
                if let Some(delay) = retry_delay(&response) {
                    sleep(delay).await;
                    continue; // retry
                }
            }

            return Err(status_error(status, url));
        }
    }

    /// Appends every following page to `first`.
    async fn follow_pages<T: DeserializeOwned>(
        &self,
        first: &mut Paging<T>,
    ) -> Result<(), CatalogError> {
        let mut next = first.next.take();
        while let Some(page_url) = next {
            let url = Url::parse(&page_url)
                .map_err(|e| CatalogError::Network(format!("bad page link {}: {}", page_url, e)))?;
            let page: Paging<T> = self.get_json(&url).await?;
            first.items.extend(page.items);
            next = page.next;
        }
        Ok(())
    }
}

fn retry_delay(response: &Response) -> Option<Duration> {
    match response.status() {
        StatusCode::BAD_GATEWAY => Some(BAD_GATEWAY_DELAY),
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok())
                .unwrap_or(1);

            if retry_after <= MAX_RETRY_AFTER_SECS {
                Some(Duration::from_secs(retry_after))
            } else {
                warning!(
                    "Retry after has reached an abnormal high of {} seconds. Try again later.",
                    retry_after
                );
                None
            }
        }
        _ => None,
    }
}

fn status_error(status: StatusCode, url: &Url) -> CatalogError {
    let context = format!("{} returned {}", url.path(), status);
    match status {
        StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => CatalogError::NotFound(context),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CatalogError::Auth(context),
        _ => CatalogError::Network(context),
    }
}

#[async_trait]
impl CatalogGateway for SpotifyCatalog {
    async fn fetch_by_id(
        &self,
        resource_type: ResourceType,
        id: &str,
    ) -> Result<RawCollection, CatalogError> {
        match resource_type {
            ResourceType::Playlist => self.fetch_playlist(id).await.map(RawCollection::Playlist),
            ResourceType::Album => self.fetch_album(id).await.map(RawCollection::Album),
        }
    }

    async fn search(&self, query: &str) -> Result<SearchResults, CatalogError> {
        self.search_catalog(query).await
    }

    async fn current_user(&self) -> Result<User, CatalogError> {
        self.fetch_current_user().await
    }

    async fn user_playlists(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        self.fetch_user_playlists().await
    }
}
