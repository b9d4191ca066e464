/// Attribute carried by every thumbnail the viewer may magnify.
pub const MAGNIFIABLE_ATTR: &str = "data-magniview";

/// Optional attribute on a marked element pointing at a larger source than the
/// thumbnail `<img>`.
pub const FULL_SOURCE_ATTR: &str = "data-magniview-src";

/// Marks the element whose text becomes the caption; takes precedence over
/// the configured caption selector.
pub const CAPTION_ATTR: &str = "data-magniview-caption";

/// One marked thumbnail as read from the DOM, before it gets an ordinal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawItem {
    pub source_url: String,
    pub caption: String,
}

/// A thumbnail eligible for full-screen viewing.
///
/// Items are derived fresh on every scan and never mutated; `index` is stable
/// for one initialization pass only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MagnifiableItem {
    pub source_url: String,
    pub caption: String,
    pub index: usize,
}

/// Assigns document-order ordinals, dropping entries without a usable source.
pub fn index_items<I>(raw: I) -> Vec<MagnifiableItem>
where
    I: IntoIterator<Item = RawItem>,
{
    raw.into_iter()
        .filter(|item| !item.source_url.trim().is_empty())
        .enumerate()
        .map(|(index, item)| MagnifiableItem {
            source_url: item.source_url.trim().to_string(),
            caption: normalize_caption(&item.caption),
            index,
        })
        .collect()
}

/// Collapses runs of whitespace (including the newlines left by nested caption
/// markup) into single spaces.
pub fn normalize_caption(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
