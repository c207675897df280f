use std::time::Duration;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{
    ArtistRef, CatalogEntry, Collection, EntryTableRow, LibraryTableRow, Track, TrackTableRow,
};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Spinner in the application's style for operations of unknown length.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

pub fn join_artists(artists: &[ArtistRef]) -> String {
    artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Shortens `text` to at most `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}

pub fn track_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, track)| TrackTableRow {
            position: i + 1,
            name: truncate(&track.name, 48),
            artists: truncate(&join_artists(&track.artists), 40),
            album: track
                .album
                .as_ref()
                .map(|album| truncate(&album.name, 40))
                .unwrap_or_default(),
        })
        .collect()
}

pub fn entry_rows(entries: &[CatalogEntry]) -> Vec<EntryTableRow> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| EntryTableRow {
            position: i + 1,
            name: truncate(&entry.name, 48),
            kind: entry.kind.to_string(),
            link: entry.external_url().unwrap_or_default().to_string(),
        })
        .collect()
}

/// Library playlists with the sides they currently sit in, e.g. `A` or `A, B`.
pub fn library_rows<F>(entries: &[CatalogEntry], sides: F) -> Vec<LibraryTableRow>
where
    F: Fn(&CatalogEntry) -> Vec<String>,
{
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| LibraryTableRow {
            position: i + 1,
            name: truncate(&entry.name, 48),
            side: sides(entry).join(", "),
            link: entry.external_url().unwrap_or_default().to_string(),
        })
        .collect()
}

/// One-line description of a collection, e.g. `album "Blue" (10 tracks)`.
pub fn describe(collection: &Collection) -> String {
    format!(
        "{} \"{}\" ({} tracks)",
        collection.source_type,
        collection.name,
        collection.tracks.len()
    )
}
