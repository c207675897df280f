use crate::{
    catalog::CatalogError,
    types::{RawAlbum, RawPlaylist},
};

use super::SpotifyCatalog;

impl SpotifyCatalog {
    /// Retrieves a playlist with its complete track list.
    ///
    /// The playlist object only embeds the first page of tracks (100 items);
    /// the remaining pages are fetched through `tracks.next` and appended in
    /// order, so the returned playlist has `tracks.next == None`.
    ///
    /// # Errors
    ///
    /// - `NotFound` - unknown or malformed playlist id
    /// - `Auth` - the stored session is no longer valid
    /// - `Network` - anything else
    pub async fn fetch_playlist(&self, id: &str) -> Result<RawPlaylist, CatalogError> {
        let url = self.endpoint(&["playlists", id])?;
        let mut playlist: RawPlaylist = self.get_json(&url).await?;
        self.follow_pages(&mut playlist.tracks).await?;
        Ok(playlist)
    }

    /// Retrieves an album with its complete track list.
    ///
    /// Album tracks come back without album data; that is filled in later by
    /// [`crate::selection::normalize`].
    pub async fn fetch_album(&self, id: &str) -> Result<RawAlbum, CatalogError> {
        let url = self.endpoint(&["albums", id])?;
        let mut album: RawAlbum = self.get_json(&url).await?;
        self.follow_pages(&mut album.tracks).await?;
        Ok(album)
    }
}
