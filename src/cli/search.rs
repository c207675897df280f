use std::time::Duration;

use crate::{
    config::Settings,
    error, info,
    selection::{self, Category, Chooser, SlotIndex},
    utils, warning,
};

use super::{connect, print_suggestions};

/// Runs a single search and prints one category of suggestions.
pub async fn search(settings: &Settings, query: &str, category: Category) {
    if query.trim().is_empty() {
        error!("Nothing to search for");
    }
    if let Some(link) = selection::classify(query) {
        info!(
            "That is a {} link, try: sptoolbox resolve {}",
            link.resource_type, query
        );
        return;
    }

    let catalog = connect(settings).await;
    // one-shot, no keystrokes to wait for
    let mut chooser = Chooser::with_debounce(catalog, Duration::ZERO);

    let pb = utils::spinner(format!("Searching for '{}'...", query));
    chooser.set_query(SlotIndex::A, query);
    while let Some(update) = chooser.settle().await {
        if let Err(e) = update {
            pb.finish_and_clear();
            error!("{}", e);
        }
    }
    pb.finish_and_clear();

    if !chooser.select_category(category) {
        warning!("No suggestions for '{}'", query);
        return;
    }
    if let Some(set) = chooser.suggestions() {
        print_suggestions(set);
    }
}
