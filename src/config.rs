//! Configuration management for the Spotify Toolbox.
//!
//! This module handles loading configuration values from environment variables
//! and `.env` files. Values are read once into [`Settings`], which is then
//! passed to the parts of the application that talk to Spotify.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use thiserror::Error;

use crate::selection::DEFAULT_DEBOUNCE;

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_SCOPE: &str =
    "playlist-read-private playlist-read-collaborative user-read-private";
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("cannot prepare config directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory structure if it doesn't exist and loads variables
/// from `sptoolbox/.env` inside the platform-specific local data directory:
/// - Linux: `~/.local/share/sptoolbox/.env`
/// - macOS: `~/Library/Application Support/sptoolbox/.env`
/// - Windows: `%LOCALAPPDATA%/sptoolbox/.env`
///
/// A missing `.env` file is not an error; the process environment and the
/// defaults in [`Settings::from_env`] still apply.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), ConfigError> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| ConfigError::Invalid {
        key: "SPTOOLBOX_ENV_FILE",
        value: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn default_token_cache() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sptoolbox/cache/token.json");
    path
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sptoolbox/.env");
    path
}

/// Runtime configuration for talking to Spotify and driving the chooser.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the Web API, e.g. `https://api.spotify.com/v1`
    pub api_url: String,
    /// OAuth authorization endpoint
    pub auth_url: String,
    /// OAuth token exchange and refresh endpoint
    pub token_url: String,
    /// Client id registered on the Spotify developer dashboard
    pub client_id: String,
    /// Redirect URI registered for the client; must hit the local callback server
    pub redirect_uri: String,
    /// Space separated OAuth scopes
    pub scope: String,
    /// Bind address of the local callback server
    pub server_addr: String,
    /// Number of entries requested per search category (1-50)
    pub search_limit: u32,
    /// Quiet period before a typed query is sent to the search endpoint
    pub search_debounce: Duration,
    /// Where the OAuth token is cached between runs
    pub token_cache: PathBuf,
}

impl Settings {
    /// Reads the settings from the process environment.
    ///
    /// Only `SPOTIFY_API_AUTH_CLIENT_ID` is mandatory; everything else falls
    /// back to the public Spotify endpoints and local defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let client_id = lookup("SPOTIFY_API_AUTH_CLIENT_ID")
            .filter(|id| !id.trim().is_empty())
            .ok_or(ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID"))?;

        let search_limit = match lookup("SPTOOLBOX_SEARCH_LIMIT") {
            Some(raw) => parse_search_limit(&raw)?,
            None => DEFAULT_SEARCH_LIMIT,
        };

        let search_debounce = match lookup("SPTOOLBOX_SEARCH_DEBOUNCE_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| ConfigError::Invalid {
                    key: "SPTOOLBOX_SEARCH_DEBOUNCE_MS",
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_DEBOUNCE,
        };

        Ok(Self {
            api_url: or_default("SPOTIFY_API_URL", DEFAULT_API_URL),
            auth_url: or_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            client_id,
            redirect_uri: or_default("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            scope: or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            server_addr: or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            search_limit,
            search_debounce,
            token_cache: lookup("SPTOOLBOX_TOKEN_CACHE")
                .map(PathBuf::from)
                .unwrap_or_else(default_token_cache),
        })
    }
}

fn parse_search_limit(raw: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: "SPTOOLBOX_SEARCH_LIMIT",
        value: raw.to_string(),
        reason,
    };

    let limit = raw.trim().parse::<u32>().map_err(|e| invalid(e.to_string()))?;
    if !(1..=50).contains(&limit) {
        return Err(invalid("must be between 1 and 50".to_string()));
    }
    Ok(limit)
}
