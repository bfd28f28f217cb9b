//! Conversion between [`TagSet`] and the backend's tag list.

use super::types::{ExternalTag, TagSet};

/// Convert a tag set into the list shape the backend expects.
///
/// The list is sorted by key so requests are deterministic. An empty set
/// yields an empty list; callers treat "no tags" and "empty tags" alike.
pub fn to_external_tag_list(tags: &TagSet) -> Vec<ExternalTag> {
    let mut list: Vec<ExternalTag> = tags
        .iter()
        .map(|(key, value)| ExternalTag::new(key, value))
        .collect();
    list.sort_by(|a, b| a.key.cmp(&b.key));
    list
}

/// Build a tag set from a backend tag list.
///
/// When a key repeats, the last occurrence wins.
pub fn from_external_tag_list<I>(tags: I) -> TagSet
where
    I: IntoIterator<Item = ExternalTag>,
{
    tags.into_iter().map(|tag| (tag.key, tag.value)).collect()
}
