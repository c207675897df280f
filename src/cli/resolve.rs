use tabled::Table;

use crate::{
    config::Settings,
    error,
    selection::{self, Chooser, SlotIndex},
    utils,
};

use super::{connect, settle_all};

/// Fetches one playlist or album and prints its flat track list.
pub async fn resolve(settings: &Settings, link: &str) {
    if selection::classify(link).is_none() {
        error!("'{}' is not a playlist or album link", link);
    }

    let catalog = connect(settings).await;
    let mut chooser = Chooser::new(catalog);

    let pb = utils::spinner("Fetching collection...");
    chooser.set_query(SlotIndex::A, link);
    settle_all(&mut chooser).await;
    pb.finish_and_clear();

    match chooser.slot(SlotIndex::A).collection() {
        Some(collection) => {
            println!("{}", utils::describe(collection));
            println!("{}", collection.external_url);
            println!("{}", Table::new(utils::track_rows(&collection.tracks)));
        }
        None => error!("Could not resolve {}", link),
    }
}
