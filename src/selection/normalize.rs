use crate::types::{AlbumRef, Collection, RawAlbum, RawCollection, RawPlaylist, ResourceType, Track};

/// Flattens a fetched playlist or album into a [`Collection`].
///
/// Playlist entries wrap their track one level down and are unwrapped; a
/// `null` entry (removed or unavailable track) becomes an empty [`Track`] so
/// positions stay intact. Album tracks come without album data and each gets
/// a copy of the album's own metadata.
///
/// The output track list has the same length and order as the source.
pub fn normalize(raw: RawCollection) -> Collection {
    match raw {
        RawCollection::Playlist(playlist) => from_playlist(playlist),
        RawCollection::Album(album) => from_album(album),
    }
}

fn from_playlist(playlist: RawPlaylist) -> Collection {
    let tracks = playlist
        .tracks
        .items
        .into_iter()
        .map(|item| item.track.unwrap_or_default())
        .collect();

    Collection {
        source_type: ResourceType::Playlist,
        id: playlist.id,
        name: playlist.name,
        external_url: playlist.external_urls.spotify.unwrap_or_default(),
        images: playlist.images,
        tracks,
    }
}

fn from_album(album: RawAlbum) -> Collection {
    let album_ref = AlbumRef {
        id: Some(album.id.clone()),
        name: album.name.clone(),
        images: album.images.clone(),
        external_urls: album.external_urls.clone(),
        extra: album.extra,
    };

    let tracks = album
        .tracks
        .items
        .into_iter()
        .map(|track| Track {
            album: Some(album_ref.clone()),
            ..track
        })
        .collect();

    Collection {
        source_type: ResourceType::Album,
        id: album.id,
        name: album.name,
        external_url: album.external_urls.spotify.unwrap_or_default(),
        images: album.images,
        tracks,
    }
}
