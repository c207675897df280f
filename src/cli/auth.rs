use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::Settings, error, info, management::TokenManager, spotify, success, types::PkceToken,
};

pub async fn auth(settings: &Settings, shared_state: Arc<Mutex<Option<PkceToken>>>) {
    info!("Waiting for Spotify authorization in the browser...");

    match spotify::auth::authorize(settings, shared_state).await {
        Ok(token) => {
            let token_manager = TokenManager::new(token, settings);
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }
            success!("Authentication successful!");
        }
        Err(e) => error!("Authentication failed: {}", e),
    }
}
