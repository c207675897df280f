use crate::{
    catalog::{CatalogError, SearchResults},
    types::{CatalogEntry, Paging, SearchResponse},
};

use super::SpotifyCatalog;

impl SpotifyCatalog {
    /// Searches playlists, albums and artists in a single request.
    ///
    /// Each category holds up to `SPTOOLBOX_SEARCH_LIMIT` entries in
    /// Spotify's relevance order. Spotify occasionally returns `null` in
    /// place of an item; those holes are dropped.
    pub async fn search_catalog(&self, query: &str) -> Result<SearchResults, CatalogError> {
        let mut url = self.endpoint(&["search"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("type", "playlist,album,artist")
            .append_pair("limit", &self.settings.search_limit.to_string());

        let response: SearchResponse = self.get_json(&url).await?;

        Ok(SearchResults {
            playlists: entries(response.playlists),
            albums: entries(response.albums),
            artists: entries(response.artists),
        })
    }
}

fn entries(page: Option<Paging<Option<CatalogEntry>>>) -> Vec<CatalogEntry> {
    page.map(|page| page.items.into_iter().flatten().collect())
        .unwrap_or_default()
}
