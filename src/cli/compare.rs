use std::path::Path;

use crate::{
    config::Settings,
    error,
    selection::{self, Chooser, SlotIndex},
    utils,
};

use super::{connect, settle_all, write_handoff};

/// Resolves two links and hands the pair over for comparison.
pub async fn compare(settings: &Settings, link_a: &str, link_b: &str, output: Option<&Path>) {
    for (slot, link) in [(SlotIndex::A, link_a), (SlotIndex::B, link_b)] {
        if selection::classify(link).is_none() {
            error!("Side {}: '{}' is not a playlist or album link", slot, link);
        }
    }

    let catalog = connect(settings).await;
    let mut chooser = Chooser::new(catalog);

    let pb = utils::spinner("Fetching both collections...");
    chooser.set_query(SlotIndex::A, link_a);
    chooser.set_query(SlotIndex::B, link_b);
    settle_all(&mut chooser).await;
    pb.finish_and_clear();

    match chooser.request_compare() {
        Ok(pair) => write_handoff(&pair, output).await,
        Err(e) => error!("{}", e),
    }
}
