use chrono::Utc;
use serde_json::json;
use sptoolbox::config::Settings;
use sptoolbox::management::TokenManager;
use sptoolbox::types::{ArtistRef, CatalogEntry, Collection, ResourceType, Token, Track};
use sptoolbox::utils::*;

fn artist(name: &str) -> ArtistRef {
    ArtistRef {
        id: None,
        name: name.to_string(),
    }
}

fn settings() -> Settings {
    Settings::from_lookup(|key| match key {
        "SPOTIFY_API_AUTH_CLIENT_ID" => Some("client".to_string()),
        _ => None,
    })
    .unwrap()
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    assert!(!challenge.is_empty());

    // Should be deterministic
    assert_eq!(challenge, generate_code_challenge(verifier));
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // SHA-256 digest, URL-safe base64 without padding
    assert_eq!(challenge.len(), 43);
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_join_artists() {
    assert_eq!(join_artists(&[]), "");
    assert_eq!(join_artists(&[artist("Joni Mitchell")]), "Joni Mitchell");
    assert_eq!(
        join_artists(&[artist("Ólafur Arnalds"), artist("Alice Sara Ott")]),
        "Ólafur Arnalds, Alice Sara Ott"
    );
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly10!", 10), "exactly10!");
    assert_eq!(truncate("a bit too long", 8), "a bit t…");
    // counts characters, not bytes
    assert_eq!(truncate("Sigur Rós – Ágætis byrjun", 12), "Sigur Rós –…");
    assert_eq!(truncate("anything", 0), "…");
}

#[test]
fn test_track_rows() {
    let tracks = vec![
        Track {
            name: "All I Want".to_string(),
            artists: vec![artist("Joni Mitchell")],
            ..Default::default()
        },
        Track::default(),
    ];

    let rows = track_rows(&tracks);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].position, 1);
    assert_eq!(rows[0].artists, "Joni Mitchell");
    assert_eq!(rows[0].album, "");
    assert_eq!(rows[1].position, 2);
    assert_eq!(rows[1].name, "");
}

#[test]
fn test_entry_rows() {
    let entries: Vec<CatalogEntry> = serde_json::from_value(json!([
        { "id": "p1", "name": "Chill Mix", "type": "playlist",
          "external_urls": { "spotify": "https://open.spotify.com/playlist/p1" } },
        { "id": "s1", "name": "A Show", "type": "show" }
    ]))
    .unwrap();

    let rows = entry_rows(&entries);
    assert_eq!(rows[0].kind, "playlist");
    assert_eq!(rows[0].link, "https://open.spotify.com/playlist/p1");
    assert_eq!(rows[1].kind, "other");
    assert_eq!(rows[1].link, "");
}

#[test]
fn test_describe() {
    let collection = Collection {
        source_type: ResourceType::Album,
        id: "1DFixLWuPkv3KT3TnV35m3".to_string(),
        name: "Blue".to_string(),
        external_url: String::new(),
        images: Vec::new(),
        tracks: vec![Track::default(); 10],
    };

    assert_eq!(describe(&collection), "album \"Blue\" (10 tracks)");
}

#[test]
fn test_token_expiry_margin() {
    let now = Utc::now().timestamp() as u64;
    let token = |obtained_at: u64| Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: String::new(),
        expires_in: 3600,
        obtained_at,
    };

    assert!(!TokenManager::new(token(now), &settings()).is_expired());
    // inside the last four minutes counts as expired
    assert!(TokenManager::new(token(now - 3500), &settings()).is_expired());
    assert!(TokenManager::new(token(now - 7200), &settings()).is_expired());
}

#[test]
fn test_library_rows_mark_sides() {
    let entries: Vec<CatalogEntry> = serde_json::from_value(json!([
        { "id": "p1", "name": "Liked Mix", "type": "playlist",
          "external_urls": { "spotify": "https://open.spotify.com/playlist/p1" } },
        { "id": "p2", "name": "Road Trip", "type": "playlist" }
    ]))
    .unwrap();

    let rows = library_rows(&entries, |entry| {
        if entry.id == "p1" {
            vec!["A".to_string(), "B".to_string()]
        } else {
            Vec::new()
        }
    });

    assert_eq!(rows[0].side, "A, B");
    assert_eq!(rows[0].link, "https://open.spotify.com/playlist/p1");
    assert_eq!(rows[1].position, 2);
    assert_eq!(rows[1].side, "");
}
