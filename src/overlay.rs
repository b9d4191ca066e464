use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

use magniview_core::ViewerConfig;

use crate::error::MountError;

/// Attribute identifying overlays created by this crate, whatever their id.
pub(crate) const OVERLAY_ATTR: &str = "data-magniview-overlay";

const OVERLAY_STYLE: &str = "position:fixed;inset:0;z-index:1000;display:none;\
flex-direction:column;align-items:center;justify-content:center;";
const BACKDROP_STYLE: &str = "position:absolute;inset:0;background:rgba(0,0,0,0.85);";
const STAGE_STYLE: &str = "position:relative;z-index:1;max-width:90vw;max-height:80vh;\
overflow:hidden;display:flex;align-items:center;justify-content:center;touch-action:none;";
const IMAGE_STYLE: &str = "display:block;max-width:90vw;max-height:80vh;\
transform-origin:center center;user-select:none;";
// Slots after the backdrop must be positioned to stack above it.
const CAPTION_STYLE: &str = "position:relative;z-index:1;margin-top:0.75em;color:#fff;\
text-align:center;";
const COUNTER_STYLE: &str = "position:relative;z-index:1;color:#ccc;font-size:0.875em;";
const CONTROL_STYLE: &str = "position:absolute;z-index:2;border:0;background:transparent;\
color:#fff;font-size:2.5em;line-height:1;cursor:pointer;";
const PREV_STYLE: &str = "left:0.5em;top:50%;transform:translateY(-50%);";
const NEXT_STYLE: &str = "right:0.5em;top:50%;transform:translateY(-50%);";
const CLOSE_STYLE: &str = "right:0.5em;top:0.25em;";

/// Handles into the overlay subtree. The overlay root is owned by the viewer
/// cache; nothing else keeps these across a rebuild.
pub(crate) struct OverlayHandles {
    pub(crate) root: HtmlElement,
    pub(crate) backdrop: Element,
    pub(crate) stage: Element,
    pub(crate) image: HtmlImageElement,
    pub(crate) caption: Element,
    pub(crate) counter: Element,
    pub(crate) prev: Element,
    pub(crate) next: Element,
    pub(crate) close: Element,
}

/// Makes sure exactly one overlay exists under the mount point, clearing and
/// reusing a previous one. Attaches no behavior.
pub(crate) fn ensure_overlay(
    document: &Document,
    config: &ViewerConfig,
) -> Result<OverlayHandles, MountError> {
    let mount = resolve_mount(document, config)?;
    let root = match take_existing_overlay(document)? {
        Some(existing) => existing,
        None => {
            let root = create(document, "div", "magniview-overlay")?;
            root.set_attribute(OVERLAY_ATTR, "")?;
            root.set_attribute("role", "dialog")?;
            root.set_attribute("aria-modal", "true")?;
            root
        }
    };
    root.set_id(&config.overlay_id);
    root.set_inner_html("");
    root.set_attribute("style", OVERLAY_STYLE)?;
    root.set_attribute("aria-hidden", "true")?;
    let root = root
        .dyn_into::<HtmlElement>()
        .map_err(|_| MountError::Dom("overlay is not an html element".to_string()))?;
    if root.parent_element().as_ref() != Some(&mount) {
        mount.append_child(&root)?;
    }

    let backdrop = create(document, "div", "magniview-backdrop")?;
    backdrop.set_attribute("style", BACKDROP_STYLE)?;
    root.append_child(&backdrop)?;

    let stage = create(document, "div", "magniview-stage")?;
    stage.set_attribute("style", STAGE_STYLE)?;
    let image = create(document, "img", "magniview-image")?
        .dyn_into::<HtmlImageElement>()
        .map_err(|_| MountError::Dom("image slot is not an img".to_string()))?;
    image.set_attribute("style", IMAGE_STYLE)?;
    image.set_alt("");
    image.set_draggable(false);
    stage.append_child(&image)?;
    root.append_child(&stage)?;

    let caption = create(document, "div", "magniview-caption")?;
    caption.set_attribute("style", CAPTION_STYLE)?;
    caption.set_attribute("aria-live", "polite")?;
    root.append_child(&caption)?;
    let counter = create(document, "div", "magniview-counter")?;
    counter.set_attribute("style", COUNTER_STYLE)?;
    root.append_child(&counter)?;

    let prev = control(document, "magniview-prev", "\u{2039}", "Previous image", PREV_STYLE)?;
    root.append_child(&prev)?;
    let next = control(document, "magniview-next", "\u{203a}", "Next image", NEXT_STYLE)?;
    root.append_child(&next)?;
    let close = control(document, "magniview-close", "\u{00d7}", "Close", CLOSE_STYLE)?;
    root.append_child(&close)?;

    Ok(OverlayHandles {
        root,
        backdrop,
        stage,
        image,
        caption,
        counter,
        prev,
        next,
        close,
    })
}

/// Number of overlays currently in the document.
pub(crate) fn overlay_count(document: &Document) -> u32 {
    document
        .query_selector_all(&format!("[{OVERLAY_ATTR}]"))
        .map(|nodes| nodes.length())
        .unwrap_or(0)
}

fn resolve_mount(document: &Document, config: &ViewerConfig) -> Result<Element, MountError> {
    match config.mount_id.as_deref() {
        Some(id) => document
            .get_element_by_id(id)
            .ok_or_else(|| MountError::MissingMount { id: id.to_string() }),
        None => document
            .body()
            .map(Element::from)
            .ok_or_else(|| MountError::MissingMount {
                id: "body".to_string(),
            }),
    }
}

/// Keeps the first overlay found and removes any strays.
fn take_existing_overlay(document: &Document) -> Result<Option<Element>, MountError> {
    let nodes = document.query_selector_all(&format!("[{OVERLAY_ATTR}]"))?;
    let mut kept = None;
    for idx in 0..nodes.length() {
        let Some(element) = nodes
            .get(idx)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        if kept.is_none() {
            kept = Some(element);
        } else {
            element.remove();
        }
    }
    Ok(kept)
}

fn create(document: &Document, tag: &str, class: &str) -> Result<Element, MountError> {
    let element = document.create_element(tag)?;
    element.set_class_name(class);
    Ok(element)
}

fn control(
    document: &Document,
    class: &str,
    glyph: &str,
    label: &str,
    placement: &str,
) -> Result<Element, MountError> {
    let button = create(document, "button", class)?;
    button.set_attribute("type", "button")?;
    button.set_attribute("style", &format!("{CONTROL_STYLE}{placement}"))?;
    button.set_attribute("aria-label", label)?;
    button.set_text_content(Some(glyph));
    Ok(button)
}
