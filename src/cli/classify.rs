use crate::{selection, success, warning};

/// Shows how a pasted text would be treated by the chooser. No network access.
pub fn classify(text: &str) {
    match selection::classify(text) {
        Some(link) => success!("{} {}", link.resource_type, link.resource_id),
        None => warning!(
            "'{}' is not a playlist or album link, it would be used as a search query",
            text
        ),
    }
}
