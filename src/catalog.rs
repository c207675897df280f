//! # Catalog Gateway
//!
//! The single network boundary of the selection pipeline. Everything that
//! needs catalog data goes through [`CatalogGateway`]; the chooser never
//! talks HTTP itself and never retries. [`crate::spotify::SpotifyCatalog`]
//! is the production implementation, tests provide scripted fakes.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{CatalogEntry, RawCollection, ResourceType, User};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The link was well formed but the resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Transport, server or decoding failure. Retrying may help.
    #[error("network error: {0}")]
    Network(String),

    /// The session is missing, expired or lacks a scope.
    #[error("authentication error: {0}")]
    Auth(String),
}

impl CatalogError {
    pub fn is_auth(&self) -> bool {
        matches!(self, CatalogError::Auth(_))
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Network(err.to_string())
    }
}

/// The three categorized result lists of a catalog search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub playlists: Vec<CatalogEntry>,
    pub albums: Vec<CatalogEntry>,
    pub artists: Vec<CatalogEntry>,
}

#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Fetches a playlist or album including its complete track list.
    async fn fetch_by_id(
        &self,
        resource_type: ResourceType,
        id: &str,
    ) -> Result<RawCollection, CatalogError>;

    /// Searches playlists, albums and artists for free text.
    async fn search(&self, query: &str) -> Result<SearchResults, CatalogError>;

    async fn current_user(&self) -> Result<User, CatalogError>;

    /// Playlists owned or followed by the current user.
    async fn user_playlists(&self) -> Result<Vec<CatalogEntry>, CatalogError>;
}
