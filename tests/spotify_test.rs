use std::{
    net::SocketAddr,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, post},
};
use chrono::Utc;
use serde_json::{Value, json};
use sptoolbox::catalog::{CatalogError, CatalogGateway};
use sptoolbox::config::Settings;
use sptoolbox::management::TokenManager;
use sptoolbox::spotify::SpotifyCatalog;
use sptoolbox::types::{ResourceType, Token};
use tempfile::TempDir;

async fn token_endpoint(State(refreshes): State<Arc<AtomicUsize>>) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(200)).await;
    let n = refreshes.fetch_add(1, Ordering::SeqCst) + 1;
    Json(json!({
        "access_token": format!("fresh-{}", n),
        "refresh_token": format!("rotated-{}", n),
        "token_type": "Bearer",
        "expires_in": 3600
    }))
}

async fn search_endpoint(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if !bearer.starts_with("Bearer fresh-") {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(Json(json!({
        "playlists": { "items": [null], "next": null },
        "albums": { "items": [] },
        "artists": { "items": [] }
    })))
}

// Local stand-in for the accounts and Web API hosts
async fn start_fake_spotify() -> (SocketAddr, Arc<AtomicUsize>) {
    let refreshes = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/api/token", post(token_endpoint))
        .route("/v1/search", get(search_endpoint))
        .route("/v1/playlists/{id}", get(|| async { StatusCode::NOT_FOUND }))
        .route("/v1/me", get(|| async { StatusCode::FORBIDDEN }))
        .with_state(Arc::clone(&refreshes));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, refreshes)
}

fn settings(addr: SocketAddr, token_cache: &Path) -> Settings {
    let api_url = format!("http://{}/v1", addr);
    let token_url = format!("http://{}/api/token", addr);
    let token_cache = token_cache.display().to_string();

    Settings::from_lookup(|key| match key {
        "SPOTIFY_API_AUTH_CLIENT_ID" => Some("client".to_string()),
        "SPOTIFY_API_URL" => Some(api_url.clone()),
        "SPOTIFY_API_TOKEN_URL" => Some(token_url.clone()),
        "SPTOOLBOX_TOKEN_CACHE" => Some(token_cache.clone()),
        _ => None,
    })
    .unwrap()
}

fn token(access_token: &str, obtained_at: u64) -> Token {
    Token {
        access_token: access_token.to_string(),
        refresh_token: "original".to_string(),
        scope: String::new(),
        expires_in: 3600,
        obtained_at,
    }
}

#[tokio::test]
async fn test_aborted_search_still_stores_refreshed_token() {
    let (addr, refreshes) = start_fake_spotify().await;
    let dir = TempDir::new().unwrap();
    let cache = dir.path().join("cache/token.json");
    let settings = settings(addr, &cache);
    let expired = TokenManager::new(token("stale", 0), &settings);
    let catalog = Arc::new(SpotifyCatalog::new(settings, expired));

    let search = tokio::spawn({
        let catalog = Arc::clone(&catalog);
        async move { catalog.search("chill").await }
    });
    // the token endpoint is still answering when the search is replaced
    tokio::time::sleep(Duration::from_millis(50)).await;
    search.abort();
    tokio::time::sleep(Duration::from_millis(400)).await;

    let cached: Token = serde_json::from_str(&std::fs::read_to_string(&cache).unwrap()).unwrap();
    assert_eq!(cached.access_token, "fresh-1");
    assert_eq!(cached.refresh_token, "rotated-1");

    let results = catalog.search("chill").await.unwrap();
    assert!(results.playlists.is_empty());
    assert_eq!(refreshes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_status_codes_map_to_catalog_errors() {
    let (addr, refreshes) = start_fake_spotify().await;
    let dir = TempDir::new().unwrap();
    let settings = settings(addr, &dir.path().join("token.json"));
    let now = Utc::now().timestamp() as u64;
    let catalog = SpotifyCatalog::new(settings.clone(), TokenManager::new(token("fresh-0", now), &settings));

    assert!(matches!(
        catalog.fetch_by_id(ResourceType::Playlist, "missing").await,
        Err(CatalogError::NotFound(_))
    ));
    assert!(matches!(
        catalog.current_user().await,
        Err(CatalogError::Auth(_))
    ));
    assert_eq!(refreshes.load(Ordering::SeqCst), 0);
}
