//! Spotify Toolbox Library
//!
//! This library lets a user choose two music collections (playlists or albums)
//! from the Spotify catalog so that a comparison tool can diff their track
//! lists. Collections can be chosen by pasting a share link, by picking from
//! the personal library, or by searching the catalog.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local OAuth callback server
//! - `catalog` - The catalog gateway trait and its result/error types
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Token caching
//! - `selection` - Link classification, normalization, suggestions and the two-slot chooser
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sptoolbox::{config, selection::{Chooser, SlotIndex}, spotify::SpotifyCatalog};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     let catalog = SpotifyCatalog::connect(settings).await?;
//!     let mut chooser = Chooser::new(Arc::new(catalog));
//!     chooser.set_query(SlotIndex::A, "https://open.spotify.com/album/1DFixLWuPkv3KT3TnV35m3");
//!     while let Some(update) = chooser.settle().await {
//!         update?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod management;
pub mod selection;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Resolving {} {}", kind, id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Side {} resolved to {}", slot, name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the command layer uses this macro. The library core reports failures
/// through typed errors so callers can decide what is fatal.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues the user should notice, such as a collection
/// that could not be found or a search that failed on the network.
///
/// # Example
///
/// ```
/// warning!("Choose two collections before comparing");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a dimmed diagnostic line when `SPTOOLBOX_DEBUG` is set.
///
/// # Example
///
/// ```
/// debug!("Dropping stale resolution for side {}", slot);
/// ```
#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => ({
    if std::env::var_os("SPTOOLBOX_DEBUG").is_some() {
      use colored::Colorize;
      println!("[{}] {}", "·".dimmed(), std::format!($($arg)*).dimmed());
    }
  })
}
