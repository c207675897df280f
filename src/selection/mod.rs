//! # Selection Module
//!
//! Turns user input into two resolved collections ready for comparison.
//!
//! ```text
//! paste / library pick ──► classify ──► CatalogGateway::fetch_by_id ──► normalize ─┐
//!                                                                                  ├─► Slot A / Slot B ──► ComparePair
//! free text ──► SuggestionEngine (debounce) ──► CatalogGateway::search ──► pick ───┘
//! ```
//!
//! - [`classify`] recognizes playlist and album share links
//! - [`normalize`] flattens playlists and albums into one [`crate::types::Collection`] shape
//! - [`SuggestionEngine`] debounces typed text into categorized search suggestions
//! - [`Chooser`] owns both slots, the suggestions, and the readiness gate
//!
//! All state lives in [`Chooser`] and is mutated from one task. Network work
//! runs in spawned tasks that post completions back over a channel; the
//! chooser applies them in [`Chooser::settle`] after checking the per-slot
//! request token, so a slow response can never overwrite a newer one.

mod chooser;
mod classify;
mod normalize;
mod slot;
mod suggest;

use thiserror::Error;

use crate::{
    catalog::{CatalogError, SearchResults},
    types::Collection,
};

pub use chooser::{Chooser, Update};
pub use classify::{CollectionLink, classify};
pub use normalize::normalize;
pub use slot::{Slot, SlotIndex, SlotPhase};
pub use suggest::{Category, DEFAULT_DEBOUNCE, SuggestionEngine, SuggestionSet};

#[derive(Debug, Error)]
pub enum ChooseError {
    #[error("choose two collections before comparing")]
    NotReady,

    #[error("there are no suggestions to pick from")]
    NoSuggestions,

    #[error("no suggestion at position {0}")]
    NoSuchSuggestion(usize),

    #[error("not signed in to Spotify, run `sptoolbox auth` ({0})")]
    Auth(String),
}

/// Completion of a spawned task, applied by [`Chooser::settle`].
pub(crate) enum Event {
    Resolution {
        slot: SlotIndex,
        token: u64,
        result: Result<Collection, CatalogError>,
    },
    Search {
        slot: SlotIndex,
        generation: u64,
        result: Result<SearchResults, CatalogError>,
    },
}
