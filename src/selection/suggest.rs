use std::{fmt, str::FromStr, sync::Arc, time::Duration};

use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle, time::sleep};

use crate::{
    catalog::{CatalogGateway, SearchResults},
    debug,
    types::CatalogEntry,
};

use super::{Event, SlotIndex};

/// Quiet period between the last keystroke and the search request.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(275);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    Playlists,
    Albums,
    Artists,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Playlists, Category::Albums, Category::Artists];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Playlists => "Playlists",
            Category::Albums => "Albums",
            Category::Artists => "Artists",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "playlists" | "playlist" | "p" => Ok(Category::Playlists),
            "albums" | "album" | "al" => Ok(Category::Albums),
            "artists" | "artist" | "ar" => Ok(Category::Artists),
            other => Err(format!(
                "unknown category '{}', expected playlists, albums or artists",
                other
            )),
        }
    }
}

/// The current batch of search suggestions, bound to the slot that asked.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionSet {
    pub for_slot: SlotIndex,
    pub selected: Category,
    pub playlists: Vec<CatalogEntry>,
    pub albums: Vec<CatalogEntry>,
    pub artists: Vec<CatalogEntry>,
}

impl SuggestionSet {
    pub fn entries(&self, category: Category) -> &[CatalogEntry] {
        match category {
            Category::Playlists => &self.playlists,
            Category::Albums => &self.albums,
            Category::Artists => &self.artists,
        }
    }

    pub fn selected_entries(&self) -> &[CatalogEntry] {
        self.entries(self.selected)
    }
}

/// A scheduled search. Dropping it aborts the task, whether it is still
/// sleeping or already waiting on the catalog.
struct SearchTimer {
    generation: u64,
    slot: SlotIndex,
    handle: JoinHandle<()>,
}

impl Drop for SearchTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Debounces typed queries into catalog searches and owns the resulting
/// [`SuggestionSet`].
///
/// Only one search is ever pending, whichever slot it came from. A completion
/// commits only if it carries the generation of the armed timer, so a result
/// that slipped into the event queue just before its timer was replaced is
/// still ignored.
pub struct SuggestionEngine {
    debounce: Duration,
    generation: u64,
    timer: Option<SearchTimer>,
    current: Option<SuggestionSet>,
}

impl SuggestionEngine {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            generation: 0,
            timer: None,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&SuggestionSet> {
        self.current.as_ref()
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Reschedules the search for a changed query.
    ///
    /// Must be called from within a Tokio runtime.
    pub(crate) fn on_query_changed(
        &mut self,
        slot: SlotIndex,
        text: &str,
        gateway: &Arc<dyn CatalogGateway>,
        events: &UnboundedSender<Event>,
    ) {
        self.cancel();
        if text.is_empty() {
            self.current = None;
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        let debounce = self.debounce;
        let query = text.to_string();
        let gateway = Arc::clone(gateway);
        let events = events.clone();

        let handle = tokio::spawn(async move {
            sleep(debounce).await;
            debug!("Searching for '{}' (side {}, #{})", query, slot, generation);
            let result = gateway.search(&query).await;
            let _ = events.send(Event::Search {
                slot,
                generation,
                result,
            });
        });

        self.timer = Some(SearchTimer {
            generation,
            slot,
            handle,
        });
    }

    /// Switches the visible category. Returns `false` if there is nothing shown.
    pub fn select_category(&mut self, category: Category) -> bool {
        match self.current.as_mut() {
            Some(set) => {
                set.selected = category;
                true
            }
            None => false,
        }
    }

    /// Installs search results if they belong to the armed timer.
    pub(crate) fn commit(
        &mut self,
        slot: SlotIndex,
        generation: u64,
        results: SearchResults,
    ) -> bool {
        if !self.finish(generation) {
            return false;
        }

        let selected = self
            .current
            .as_ref()
            .map(|set| set.selected)
            .unwrap_or_default();

        self.current = Some(SuggestionSet {
            for_slot: slot,
            selected,
            playlists: results.playlists,
            albums: results.albums,
            artists: results.artists,
        });
        true
    }

    /// Disarms the timer if `generation` is the armed one.
    pub(crate) fn finish(&mut self, generation: u64) -> bool {
        let armed = self
            .timer
            .as_ref()
            .is_some_and(|timer| timer.generation == generation);
        if armed {
            self.timer = None;
        }
        armed
    }

    pub fn cancel(&mut self) {
        self.timer = None;
    }

    /// Forgets search state that belongs to `slot`, leaving the other slot's alone.
    pub(crate) fn release_slot(&mut self, slot: SlotIndex) {
        if self.timer.as_ref().is_some_and(|timer| timer.slot == slot) {
            self.cancel();
        }
        if self.current.as_ref().is_some_and(|set| set.for_slot == slot) {
            self.current = None;
        }
    }
}
