use serde_json::json;
use sptoolbox::selection::normalize;
use sptoolbox::types::{RawAlbum, RawCollection, RawPlaylist, ResourceType};

fn playlist_fixture() -> RawPlaylist {
    serde_json::from_value(json!({
        "id": "37i9dQZF1",
        "name": "Chill Mix",
        "external_urls": { "spotify": "https://open.spotify.com/playlist/37i9dQZF1" },
        "images": null,
        "tracks": {
            "items": [
                {
                    "added_at": "2024-01-01T00:00:00Z",
                    "track": {
                        "id": "t1",
                        "name": "First",
                        "artists": [{ "id": "ar1", "name": "Nils Frahm" }],
                        "album": { "id": "al1", "name": "Spaces", "images": [] },
                        "duration_ms": 240000
                    }
                },
                { "added_at": "2024-01-02T00:00:00Z", "track": null },
                {
                    "added_at": "2024-01-03T00:00:00Z",
                    "track": {
                        "id": "t3",
                        "name": "Third",
                        "artists": [{ "name": "Ólafur Arnalds" }, { "name": "Alice Sara Ott" }],
                        "album": { "id": "al3", "name": "The Chopin Project", "images": null }
                    }
                }
            ],
            "next": null,
            "total": 3
        }
    }))
    .unwrap()
}

fn album_fixture() -> RawAlbum {
    serde_json::from_value(json!({
        "id": "1DFixLWuPkv3KT3TnV35m3",
        "name": "Blue",
        "album_type": "album",
        "release_date": "1971-06-22",
        "external_urls": { "spotify": "https://open.spotify.com/album/1DFixLWuPkv3KT3TnV35m3" },
        "images": [{ "url": "https://i.scdn.co/image/blue", "height": 640, "width": 640 }],
        "tracks": {
            "items": [
                { "id": "b1", "name": "All I Want", "artists": [{ "name": "Joni Mitchell" }], "track_number": 1 },
                { "id": "b2", "name": "My Old Man", "artists": [{ "name": "Joni Mitchell" }], "track_number": 2 }
            ],
            "next": null
        }
    }))
    .unwrap()
}

#[test]
fn test_normalize_playlist_keeps_length_and_order() {
    let collection = normalize(RawCollection::Playlist(playlist_fixture()));

    assert_eq!(collection.source_type, ResourceType::Playlist);
    assert_eq!(collection.id, "37i9dQZF1");
    assert_eq!(collection.name, "Chill Mix");
    assert_eq!(
        collection.external_url,
        "https://open.spotify.com/playlist/37i9dQZF1"
    );
    assert!(collection.images.is_empty());
    assert_eq!(collection.tracks.len(), 3);
    assert_eq!(collection.tracks[0].name, "First");
    assert_eq!(collection.tracks[2].name, "Third");
}

#[test]
fn test_normalize_playlist_leaves_tracks_untouched() {
    let raw = playlist_fixture();
    let original = raw.tracks.items[0].track.clone().unwrap();

    let collection = normalize(RawCollection::Playlist(raw));

    assert_eq!(collection.tracks[0], original);
    let album = collection.tracks[0].album.as_ref().unwrap();
    assert_eq!(album.name, "Spaces");
    assert_eq!(collection.tracks[0].extra["duration_ms"], json!(240000));
}

#[test]
fn test_normalize_playlist_null_track_becomes_empty() {
    let collection = normalize(RawCollection::Playlist(playlist_fixture()));

    let hole = &collection.tracks[1];
    assert_eq!(hole.id, None);
    assert!(hole.name.is_empty());
    assert!(hole.artists.is_empty());
    assert!(hole.album.is_none());
}

#[test]
fn test_normalize_album_attaches_album_to_every_track() {
    let collection = normalize(RawCollection::Album(album_fixture()));

    assert_eq!(collection.source_type, ResourceType::Album);
    assert_eq!(collection.name, "Blue");
    assert_eq!(collection.images.len(), 1);
    assert_eq!(collection.tracks.len(), 2);

    for track in &collection.tracks {
        let album = track.album.as_ref().unwrap();
        assert_eq!(album.id.as_deref(), Some("1DFixLWuPkv3KT3TnV35m3"));
        assert_eq!(album.name, "Blue");
        assert_eq!(album.images, collection.images);
        assert_eq!(album.extra["release_date"], json!("1971-06-22"));
    }
}

#[test]
fn test_normalize_album_keeps_track_fields() {
    let collection = normalize(RawCollection::Album(album_fixture()));

    assert_eq!(collection.tracks[0].id.as_deref(), Some("b1"));
    assert_eq!(collection.tracks[0].name, "All I Want");
    assert_eq!(collection.tracks[0].artists[0].name, "Joni Mitchell");
    assert_eq!(collection.tracks[1].extra["track_number"], json!(2));
}

#[test]
fn test_normalized_shapes_serialize_alike() {
    let from_playlist = normalize(RawCollection::Playlist(playlist_fixture()));
    let from_album = normalize(RawCollection::Album(album_fixture()));

    let keys = |value: serde_json::Value| {
        let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    };

    assert_eq!(
        keys(serde_json::to_value(&from_playlist).unwrap()),
        keys(serde_json::to_value(&from_album).unwrap())
    );
    assert!(serde_json::to_value(&from_album).unwrap()["tracks"][0]["album"].is_object());
}

#[test]
fn test_normalize_empty_album() {
    let mut raw = album_fixture();
    raw.tracks.items.clear();

    let collection = normalize(RawCollection::Album(raw));
    assert!(collection.tracks.is_empty());
}

#[test]
fn test_normalize_playlist_keeps_null_album() {
    let raw: RawPlaylist = serde_json::from_value(json!({
        "id": "local",
        "name": "Local Files",
        "tracks": {
            "items": [
                { "track": { "id": null, "name": "demo.mp3", "artists": [], "album": null, "is_local": true } }
            ]
        }
    }))
    .unwrap();

    let collection = normalize(RawCollection::Playlist(raw));
    let track = serde_json::to_value(&collection.tracks[0]).unwrap();

    assert!(track.as_object().unwrap().contains_key("album"));
    assert!(track["album"].is_null());
    assert_eq!(track["is_local"], json!(true));
    assert_eq!(track["name"], json!("demo.mp3"));
}
