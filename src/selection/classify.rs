use reqwest::Url;

use crate::types::ResourceType;

/// A share link that points at a playlist or album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionLink {
    pub resource_type: ResourceType,
    pub resource_id: String,
}

/// Classifies pasted text as a playlist or album link.
///
/// The text must parse as an absolute URL whose last two path segments are
/// `playlist|album` and a non-empty id. Host and query string are ignored and
/// the id is taken verbatim; a bogus id only surfaces when the fetch fails.
///
/// Returns `None` for anything else. Free text typed into a slot lands here
/// on every keystroke, so an unrecognized link is the common case and not an
/// error.
///
/// # Example
///
/// ```
/// let link = classify("https://open.spotify.com/playlist/37i9dQZF1?si=abc").unwrap();
/// assert_eq!(link.resource_type, ResourceType::Playlist);
/// assert_eq!(link.resource_id, "37i9dQZF1");
/// ```
pub fn classify(text: &str) -> Option<CollectionLink> {
    let url = Url::parse(text).ok()?;
    let segments: Vec<&str> = url.path_segments()?.collect();

    let [.., kind, id] = segments.as_slice() else {
        return None;
    };

    let resource_type = ResourceType::from_path_segment(kind)?;
    if id.is_empty() {
        return None;
    }

    Some(CollectionLink {
        resource_type,
        resource_id: id.to_string(),
    })
}
