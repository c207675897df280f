use crate::{
    catalog::CatalogError,
    types::{CatalogEntry, Paging, User},
};

use super::SpotifyCatalog;

const LIBRARY_PAGE_SIZE: &str = "50";

impl SpotifyCatalog {
    pub async fn fetch_current_user(&self) -> Result<User, CatalogError> {
        let url = self.endpoint(&["me"])?;
        self.get_json(&url).await
    }

    /// Retrieves every playlist in the current user's library.
    ///
    /// Walks all pages of `/me/playlists`; `null` items are skipped.
    pub async fn fetch_user_playlists(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        let mut url = self.endpoint(&["me", "playlists"])?;
        url.query_pairs_mut().append_pair("limit", LIBRARY_PAGE_SIZE);

        let mut playlists: Paging<Option<CatalogEntry>> = self.get_json(&url).await?;
        self.follow_pages(&mut playlists).await?;

        Ok(playlists.items.into_iter().flatten().collect())
    }
}
