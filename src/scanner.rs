use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlImageElement};

use magniview_core::{
    index_items, MagnifiableItem, RawItem, ViewerConfig, CAPTION_ATTR, FULL_SOURCE_ATTR,
};

/// Result of one marker scan: the items plus the marked elements they came
/// from, index-aligned.
pub(crate) struct Scan {
    pub(crate) items: Vec<MagnifiableItem>,
    pub(crate) targets: Vec<Element>,
}

impl Scan {
    pub(crate) fn empty() -> Self {
        Self {
            items: Vec::new(),
            targets: Vec::new(),
        }
    }
}

/// Collects every marked descendant of `root` in document order. Read only.
pub(crate) fn scan(root: &Element, config: &ViewerConfig) -> Scan {
    if !root.is_connected() {
        return Scan::empty();
    }
    let selector = config.marker_selector();
    let nodes = match root.query_selector_all(&selector) {
        Ok(nodes) => nodes,
        Err(_) => {
            gloo::console::warn!("magniview: invalid marker selector", selector);
            return Scan::empty();
        }
    };

    let mut raw = Vec::with_capacity(nodes.length() as usize);
    let mut targets = Vec::with_capacity(nodes.length() as usize);
    for idx in 0..nodes.length() {
        let Some(element) = nodes
            .get(idx)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        match read_item(&element, config) {
            Some(item) => {
                raw.push(item);
                targets.push(element);
            }
            None => {
                gloo::console::warn!("magniview: skipping marked element without image", idx);
            }
        }
    }

    let items = index_items(raw);
    debug_assert_eq!(items.len(), targets.len());
    Scan { items, targets }
}

fn read_item(element: &Element, config: &ViewerConfig) -> Option<RawItem> {
    let image = find_image(element)?;
    let source_url = element
        .get_attribute(FULL_SOURCE_ATTR)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| image.src());
    if source_url.trim().is_empty() {
        return None;
    }
    Some(RawItem {
        source_url,
        caption: caption_text(element, &image, config),
    })
}

fn find_image(element: &Element) -> Option<HtmlImageElement> {
    if let Some(image) = element.dyn_ref::<HtmlImageElement>() {
        return Some(image.clone());
    }
    element
        .query_selector("img")
        .ok()
        .flatten()
        .and_then(|node| node.dyn_into::<HtmlImageElement>().ok())
}

fn caption_text(element: &Element, image: &HtmlImageElement, config: &ViewerConfig) -> String {
    let marked = format!("[{CAPTION_ATTR}]");
    for selector in [marked.as_str(), config.caption_selector.as_str()] {
        let text = element
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|caption| caption.text_content())
            .filter(|text| !text.trim().is_empty());
        if let Some(text) = text {
            return text;
        }
    }
    let alt = image.alt();
    if !alt.trim().is_empty() {
        return alt;
    }
    image.title()
}
