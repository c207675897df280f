//! # API Module
//!
//! HTTP endpoints of the short-lived local server that `sptoolbox auth`
//! starts while the user authorizes the application in the browser.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the authorization code from Spotify's OAuth
//!   redirect and exchanges it, together with the PKCE verifier kept in the
//!   shared state, for an access token.
//! - [`health`] - Reports that the server is up, with name and version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use sptoolbox::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```
//!
//! The callback expects two `Extension`s: the shared
//! `Arc<Mutex<Option<PkceToken>>>` and `Arc<Settings>`. See
//! [`crate::server::start_api_server`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
