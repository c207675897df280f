use std::{fmt, str::FromStr};

use crate::types::Collection;

/// One of the two comparison sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotIndex {
    A,
    B,
}

impl SlotIndex {
    pub const BOTH: [SlotIndex; 2] = [SlotIndex::A, SlotIndex::B];

    pub fn index(self) -> usize {
        match self {
            SlotIndex::A => 0,
            SlotIndex::B => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SlotIndex::A => "A",
            SlotIndex::B => "B",
        }
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SlotIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "0" => Ok(SlotIndex::A),
            "b" | "1" => Ok(SlotIndex::B),
            other => Err(format!("unknown side '{}', expected a or b", other)),
        }
    }
}

/// Where a slot stands in its resolution lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    /// Nothing typed, nothing resolved.
    Empty,
    /// Free text that is not a link; suggestions may be on screen.
    Searching,
    /// A fetch for this slot's latest request is in flight.
    Resolving,
    Resolved,
}

impl fmt::Display for SlotPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            SlotPhase::Empty => "empty",
            SlotPhase::Searching => "searching",
            SlotPhase::Resolving => "resolving",
            SlotPhase::Resolved => "resolved",
        };
        f.write_str(phase)
    }
}

/// A comparison side: what the user typed and what it resolved to.
///
/// `latest` is the slot's request token. Every edit and every resolution
/// start bumps it; a completion carrying an older token is stale.
#[derive(Debug, Default)]
pub struct Slot {
    query: String,
    collection: Option<Collection>,
    latest: u64,
    resolving: bool,
}

impl Slot {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn collection(&self) -> Option<&Collection> {
        self.collection.as_ref()
    }

    pub fn phase(&self) -> SlotPhase {
        if self.collection.is_some() {
            SlotPhase::Resolved
        } else if self.resolving {
            SlotPhase::Resolving
        } else if self.query.is_empty() {
            SlotPhase::Empty
        } else {
            SlotPhase::Searching
        }
    }

    /// Replaces the query and drops whatever the slot held or was waiting for.
    pub(super) fn edit(&mut self, text: &str) {
        self.query = text.to_string();
        self.collection = None;
        self.resolving = false;
        self.latest += 1;
    }

    pub(super) fn begin_resolution(&mut self) -> u64 {
        self.latest += 1;
        self.resolving = true;
        self.latest
    }

    pub(super) fn is_latest(&self, token: u64) -> bool {
        self.latest == token
    }

    pub(super) fn resolve(&mut self, collection: Collection) {
        self.query = collection.name.clone();
        self.collection = Some(collection);
        self.resolving = false;
    }

    /// Keeps the query so the user can retry by editing it.
    pub(super) fn fail(&mut self) {
        self.collection = None;
        self.resolving = false;
    }
}
