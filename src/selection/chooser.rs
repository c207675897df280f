use std::{sync::Arc, time::Duration};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    catalog::{CatalogError, CatalogGateway, SearchResults},
    debug,
    types::{CatalogEntry, Collection, ComparePair, ResourceType},
    warning,
};

use super::{
    Category, ChooseError, DEFAULT_DEBOUNCE, Event, Slot, SlotIndex, SuggestionEngine,
    SuggestionSet, classify, normalize,
};

/// What a call to [`Chooser::settle`] changed.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// The slot now holds a collection.
    Resolved(SlotIndex),
    /// The slot's latest request failed; the query is kept for a retry.
    ResolveFailed { slot: SlotIndex, error: CatalogError },
    /// A fresh suggestion set bound to the slot is available.
    Suggestions(SlotIndex),
    /// The latest search failed; the previous suggestions are untouched.
    SearchFailed { slot: SlotIndex, error: CatalogError },
    /// A superseded completion was dropped.
    Stale(SlotIndex),
}

/// Two-slot selection controller.
///
/// Owns slots A and B plus the suggestion engine. Input methods are
/// synchronous and take effect immediately; network work is spawned onto the
/// current Tokio runtime and its results are applied by [`Chooser::settle`].
///
/// # Example
///
/// ```
/// let mut chooser = Chooser::new(Arc::new(catalog));
/// chooser.set_query(SlotIndex::A, "https://open.spotify.com/playlist/37i9dQZF1");
/// chooser.set_query(SlotIndex::B, "https://open.spotify.com/album/1DFixLWuPkv3KT3TnV35m3");
/// while let Some(update) = chooser.settle().await {
///     update?;
/// }
/// let pair = chooser.request_compare()?;
/// ```
pub struct Chooser {
    gateway: Arc<dyn CatalogGateway>,
    slots: [Slot; 2],
    suggestions: SuggestionEngine,
    events_tx: UnboundedSender<Event>,
    events_rx: UnboundedReceiver<Event>,
    pending_resolutions: usize,
}

impl Chooser {
    pub fn new(gateway: Arc<dyn CatalogGateway>) -> Self {
        Self::with_debounce(gateway, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(gateway: Arc<dyn CatalogGateway>, debounce: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            gateway,
            slots: [Slot::default(), Slot::default()],
            suggestions: SuggestionEngine::new(debounce),
            events_tx,
            events_rx,
            pending_resolutions: 0,
        }
    }

    pub fn slot(&self, slot: SlotIndex) -> &Slot {
        &self.slots[slot.index()]
    }

    pub fn suggestions(&self) -> Option<&SuggestionSet> {
        self.suggestions.current()
    }

    /// Applies a keystroke (or a paste) to a slot.
    ///
    /// The query is updated and any previous collection dropped right away.
    /// A playlist or album link starts a resolution; other non-empty text is
    /// handed to the suggestion engine; empty text clears the suggestions.
    pub fn set_query(&mut self, slot: SlotIndex, text: &str) {
        self.slots[slot.index()].edit(text);

        match classify(text) {
            Some(link) => {
                self.suggestions.release_slot(slot);
                self.resolve(slot, link.resource_type, link.resource_id);
            }
            None => {
                self.suggestions
                    .on_query_changed(slot, text, &self.gateway, &self.events_tx);
            }
        }
    }

    /// Uses a link from the user's library, exactly as if it had been pasted.
    pub fn pick_from_library(&mut self, slot: SlotIndex, external_url: &str) {
        self.set_query(slot, external_url);
    }

    /// Resolves a suggestion into the slot the current suggestions belong to.
    ///
    /// Artists are not comparable: the slot shows the artist's name but
    /// nothing is resolved. A search pending for the other slot keeps running.
    pub fn pick_suggestion(&mut self, entry: &CatalogEntry) -> Result<SlotIndex, ChooseError> {
        let slot = self
            .suggestions
            .current()
            .map(|set| set.for_slot)
            .ok_or(ChooseError::NoSuggestions)?;

        self.suggestions.release_slot(slot);
        self.slots[slot.index()].edit(&entry.name);

        match entry.kind.resource_type() {
            Some(resource_type) => self.resolve(slot, resource_type, entry.id.clone()),
            None => warning!(
                "'{}' ({}) cannot be compared, pick a playlist or an album",
                entry.name,
                entry.kind
            ),
        }

        Ok(slot)
    }

    /// Picks the entry at `position` of the currently selected category.
    pub fn pick_suggestion_at(&mut self, position: usize) -> Result<SlotIndex, ChooseError> {
        let entry = self
            .suggestions
            .current()
            .ok_or(ChooseError::NoSuggestions)?
            .selected_entries()
            .get(position)
            .cloned()
            .ok_or(ChooseError::NoSuchSuggestion(position))?;

        self.pick_suggestion(&entry)
    }

    pub fn select_category(&mut self, category: Category) -> bool {
        self.suggestions.select_category(category)
    }

    /// Sides whose resolved collection is `entry`.
    pub fn sides_holding(&self, entry: &CatalogEntry) -> Vec<SlotIndex> {
        SlotIndex::BOTH
            .into_iter()
            .filter(|slot| {
                self.slot(*slot).collection().is_some_and(|collection| {
                    collection.id == entry.id
                        && Some(collection.source_type) == entry.kind.resource_type()
                })
            })
            .collect()
    }

    pub fn is_ready_to_compare(&self) -> bool {
        self.slots.iter().all(|slot| slot.collection().is_some())
    }

    /// Hands both collections over for comparison.
    ///
    /// Warns and leaves everything as it is when a side is still missing.
    pub fn request_compare(&self) -> Result<ComparePair, ChooseError> {
        match (
            self.slot(SlotIndex::A).collection(),
            self.slot(SlotIndex::B).collection(),
        ) {
            (Some(a), Some(b)) => Ok(ComparePair {
                collection_a: a.clone(),
                collection_b: b.clone(),
            }),
            _ => {
                warning!("Choose two collections before comparing");
                Err(ChooseError::NotReady)
            }
        }
    }

    /// `true` when no search or resolution is outstanding.
    pub fn is_idle(&self) -> bool {
        self.pending_resolutions == 0 && !self.suggestions.is_armed() && self.events_rx.is_empty()
    }

    /// Waits for the next completion and applies it.
    ///
    /// Returns `None` once nothing is outstanding. An `Err` means the
    /// catalog rejected the session; nothing else is fatal.
    pub async fn settle(&mut self) -> Option<Result<Update, ChooseError>> {
        let event = match self.events_rx.try_recv() {
            Ok(event) => event,
            Err(_) if self.is_idle() => return None,
            Err(_) => self.events_rx.recv().await?,
        };
        Some(self.apply(event))
    }

    fn resolve(&mut self, slot: SlotIndex, resource_type: ResourceType, id: String) {
        let token = self.slots[slot.index()].begin_resolution();
        self.pending_resolutions += 1;
        debug!(
            "Resolving {} {} into side {} (request {})",
            resource_type, id, slot, token
        );

        let gateway = Arc::clone(&self.gateway);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = gateway.fetch_by_id(resource_type, &id).await.map(normalize);
            let _ = events.send(Event::Resolution {
                slot,
                token,
                result,
            });
        });
    }

    fn apply(&mut self, event: Event) -> Result<Update, ChooseError> {
        match event {
            Event::Resolution {
                slot,
                token,
                result,
            } => {
                self.pending_resolutions = self.pending_resolutions.saturating_sub(1);
                self.apply_resolution(slot, token, result)
            }
            Event::Search {
                slot,
                generation,
                result,
            } => self.apply_search(slot, generation, result),
        }
    }

    fn apply_resolution(
        &mut self,
        slot: SlotIndex,
        token: u64,
        result: Result<Collection, CatalogError>,
    ) -> Result<Update, ChooseError> {
        let state = &mut self.slots[slot.index()];
        if !state.is_latest(token) {
            debug!("Dropping stale resolution {} for side {}", token, slot);
            return Ok(Update::Stale(slot));
        }

        match result {
            Ok(collection) => {
                state.resolve(collection);
                self.suggestions.release_slot(slot);
                Ok(Update::Resolved(slot))
            }
            Err(CatalogError::Auth(message)) => {
                state.fail();
                Err(ChooseError::Auth(message))
            }
            Err(error) => {
                state.fail();
                warning!("Side {}: {}", slot, error);
                Ok(Update::ResolveFailed { slot, error })
            }
        }
    }

    fn apply_search(
        &mut self,
        slot: SlotIndex,
        generation: u64,
        result: Result<SearchResults, CatalogError>,
    ) -> Result<Update, ChooseError> {
        match result {
            Ok(results) => {
                if self.suggestions.commit(slot, generation, results) {
                    Ok(Update::Suggestions(slot))
                } else {
                    debug!("Dropping superseded search #{} for side {}", generation, slot);
                    Ok(Update::Stale(slot))
                }
            }
            Err(error) => {
                if !self.suggestions.finish(generation) {
                    return Ok(Update::Stale(slot));
                }
                match error {
                    CatalogError::Auth(message) => Err(ChooseError::Auth(message)),
                    error => {
                        warning!("Search for side {} failed: {}", slot, error);
                        Ok(Update::SearchFailed { slot, error })
                    }
                }
            }
        }
    }
}
