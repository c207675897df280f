//! # CLI Module
//!
//! Command implementations for the `sptoolbox` binary. Each command wires the
//! selection pipeline to the terminal: it builds a [`SpotifyCatalog`] from the
//! stored session, drives a [`Chooser`], and prints what changed using the
//! crate's logging macros and `tabled` tables.
//!
//! ## Commands
//!
//! - [`auth`] - OAuth PKCE login, stores the token for all other commands
//! - [`classify`] - shows how a pasted link is understood, offline
//! - [`resolve`] - fetches one playlist or album and prints its flat track list
//! - [`search`] - one-shot categorized search
//! - [`library`] / [`whoami`] - the signed-in user's playlists and profile
//! - [`compare`] - resolves two links and writes the comparison handoff
//! - [`choose`] - interactive two-slot chooser reading commands from stdin
//!
//! ## Usage Patterns
//!
//! ```bash
//! sptoolbox auth
//! sptoolbox compare https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M \
//!                   https://open.spotify.com/album/1DFixLWuPkv3KT3TnV35m3 --output pair.json
//! sptoolbox choose
//! ```

mod auth;
mod choose;
mod classify;
mod compare;
mod library;
mod resolve;
mod search;

use std::{path::Path, sync::Arc};

use tabled::Table;

use crate::{
    config::Settings,
    error,
    selection::{Chooser, SlotIndex, SuggestionSet, Update},
    spotify::SpotifyCatalog,
    success,
    types::{ComparePair, SlotTableRow},
    utils,
};

pub use auth::auth;
pub use choose::{ChooseInput, choose, parse_input};
pub use classify::classify;
pub use compare::compare;
pub use library::{library, whoami};
pub use resolve::resolve;
pub use search::search;

async fn connect(settings: &Settings) -> Arc<SpotifyCatalog> {
    match SpotifyCatalog::connect(settings.clone()).await {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => error!("{}. Please run sptoolbox auth", e),
    }
}

/// Applies completions until the chooser is idle, reporting each one.
async fn settle_all(chooser: &mut Chooser) {
    while let Some(update) = chooser.settle().await {
        match update {
            Ok(update) => report(chooser, &update),
            Err(e) => error!("{}", e),
        }
    }
}

/// Failures and stale drops are already reported by the chooser itself.
fn report(chooser: &Chooser, update: &Update) {
    match update {
        Update::Resolved(slot) => {
            if let Some(collection) = chooser.slot(*slot).collection() {
                success!("Side {}: {}", slot, utils::describe(collection));
            }
        }
        Update::Suggestions(_) => {
            if let Some(set) = chooser.suggestions() {
                print_suggestions(set);
            }
        }
        Update::ResolveFailed { .. } | Update::SearchFailed { .. } | Update::Stale(_) => {}
    }
}

fn print_suggestions(set: &SuggestionSet) {
    use colored::Colorize;

    let tabs = crate::selection::Category::ALL
        .iter()
        .map(|category| {
            let label = format!("{} ({})", category, set.entries(*category).len());
            if *category == set.selected {
                label.bold().underline().to_string()
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join("   ");

    crate::info!("Suggestions for side {}: {}", set.for_slot, tabs);
    if set.selected_entries().is_empty() {
        println!("  (nothing found)");
    } else {
        println!("{}", Table::new(utils::entry_rows(set.selected_entries())));
    }
}

fn print_slots(chooser: &Chooser) {
    let rows = SlotIndex::BOTH.iter().map(|slot| {
        let state = chooser.slot(*slot);
        SlotTableRow {
            side: slot.to_string(),
            state: state.phase().to_string(),
            query: utils::truncate(state.query(), 60),
            tracks: state
                .collection()
                .map(|c| c.tracks.len().to_string())
                .unwrap_or_default(),
        }
    });
    println!("{}", Table::new(rows));
}

/// Writes the comparison handoff as pretty JSON to `output` or stdout.
async fn write_handoff(pair: &ComparePair, output: Option<&Path>) {
    let json = match serde_json::to_string_pretty(pair) {
        Ok(json) => json,
        Err(e) => error!("Cannot serialize comparison: {}", e),
    };

    match output {
        Some(path) => {
            if let Err(e) = async_fs::write(path, json).await {
                error!("Cannot write {}: {}", path.display(), e);
            }
            success!(
                "Comparison of {} and {} written to {}",
                pair.collection_a.name,
                pair.collection_b.name,
                path.display()
            );
        }
        None => println!("{}", json),
    }
}
