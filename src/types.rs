use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tabled::Tabled;

/// Spotify sends `null` for several list fields (playlist images most notably).
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// The two catalog resources that can be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Playlist,
    Album,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Playlist => "playlist",
            ResourceType::Album => "album",
        }
    }

    /// Maps a path segment of a share link to a resource type.
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        match segment {
            "playlist" => Some(ResourceType::Playlist),
            "album" => Some(ResourceType::Album),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// Album metadata attached to a track.
///
/// For playlist tracks this is whatever Spotify embeds; for album tracks it is
/// copied from the album itself during normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A track as returned by the catalog.
///
/// Only the fields the toolbox reads are typed; the rest is kept in `extra`
/// and serialized back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<ArtistRef>,
    /// `None` is written back as `null`.
    #[serde(default)]
    pub album: Option<AlbumRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A page of a Spotify paging object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paging<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> Default for Paging<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next: None,
            total: None,
        }
    }
}

/// One entry of a playlist's track list; the track sits one level down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<Track>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
    #[serde(default)]
    pub tracks: Paging<PlaylistItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAlbum {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
    #[serde(default)]
    pub tracks: Paging<Track>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A fetched catalog resource, tagged by its type.
#[derive(Debug, Clone)]
pub enum RawCollection {
    Playlist(RawPlaylist),
    Album(RawAlbum),
}

/// A playlist or album reduced to one shape with a flat track list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub source_type: ResourceType,
    pub id: String,
    pub name: String,
    pub external_url: String,
    pub images: Vec<Image>,
    pub tracks: Vec<Track>,
}

/// The value handed to the comparison tool once both sides are chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparePair {
    pub collection_a: Collection,
    pub collection_b: Collection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Playlist,
    Album,
    Artist,
    #[serde(other)]
    Other,
}

impl EntryKind {
    /// The comparable resource behind this kind of entry, if any.
    pub fn resource_type(&self) -> Option<ResourceType> {
        match self {
            EntryKind::Playlist => Some(ResourceType::Playlist),
            EntryKind::Album => Some(ResourceType::Album),
            EntryKind::Artist | EntryKind::Other => None,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            EntryKind::Playlist => "playlist",
            EntryKind::Album => "album",
            EntryKind::Artist => "artist",
            EntryKind::Other => "other",
        };
        f.write_str(kind)
    }
}

/// A lightweight catalog item as it appears in search results and libraries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
}

impl CatalogEntry {
    pub fn external_url(&self) -> Option<&str> {
        self.external_urls.spotify.as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub playlists: Option<Paging<Option<CatalogEntry>>>,
    #[serde(default)]
    pub albums: Option<Paging<Option<CatalogEntry>>>,
    #[serde(default)]
    pub artists: Option<Paging<Option<CatalogEntry>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub artists: String,
    pub album: String,
}

#[derive(Tabled)]
pub struct EntryTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub kind: String,
    pub link: String,
}

#[derive(Tabled)]
pub struct LibraryTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub side: String,
    pub link: String,
}

#[derive(Tabled)]
pub struct SlotTableRow {
    pub side: String,
    pub state: String,
    pub query: String,
    pub tracks: String,
}
