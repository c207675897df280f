use tabled::Table;

use crate::{catalog::CatalogGateway, config::Settings, error, info, utils, warning};

use super::connect;

/// Lists the playlists in the signed-in user's library.
pub async fn library(settings: &Settings) {
    let catalog = connect(settings).await;

    let pb = utils::spinner("Fetching your playlists...");
    let playlists = catalog.user_playlists().await;
    pb.finish_and_clear();

    match playlists {
        Ok(playlists) if playlists.is_empty() => warning!("Your library has no playlists"),
        Ok(playlists) => {
            info!("{} playlists in your library", playlists.len());
            println!("{}", Table::new(utils::entry_rows(&playlists)));
        }
        Err(e) => error!("Failed to load your library: {}", e),
    }
}

pub async fn whoami(settings: &Settings) {
    let catalog = connect(settings).await;

    match catalog.current_user().await {
        Ok(user) => {
            info!(
                "Signed in as {} ({})",
                user.display_name.as_deref().unwrap_or(&user.id),
                user.id
            );
            if let Some(url) = user.external_urls.spotify {
                info!("{}", url);
            }
        }
        Err(e) => error!("Failed to load profile: {}", e),
    }
}
