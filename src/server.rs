use axum::{Extension, Router, routing::get};
use std::{io, net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{sync::Mutex, task::JoinHandle};

use crate::{api, config::Settings, types::PkceToken, warning};

/// Binds the OAuth callback server and serves it in the background.
///
/// Binding happens before returning so an occupied port is reported to the
/// caller instead of being lost inside the spawned task. Abort the returned
/// handle once the token has arrived.
pub async fn start_api_server(
    settings: Settings,
    state: Arc<Mutex<Option<PkceToken>>>,
) -> io::Result<JoinHandle<()>> {
    let addr = SocketAddr::from_str(&settings.server_addr)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let app = Router::new()
        .route("/health", get(api::health))
        .route(
            "/callback",
            get(api::callback)
                .layer::<_, std::convert::Infallible>(Extension(state))
                .layer(Extension(Arc::new(settings))),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            warning!("Callback server stopped: {}", e);
        }
    }))
}
