//! In-page image viewer for the Bagatelle gallery.
//!
//! Thumbnails carrying the `data-magniview` attribute open in a full-screen
//! overlay with keyboard navigation and wheel/drag zoom-pan. Whatever changes
//! the thumbnail DOM calls [`initialize_magniview`] (`initializeMagniview` from
//! JavaScript) afterwards; the call is idempotent and never duplicates the
//! overlay or its listeners.

mod cache;
mod config;
mod controller;
mod error;
mod events;
mod gallery;
mod input;
mod overlay;
mod render;
mod scanner;

use wasm_bindgen::prelude::*;

pub use error::MountError;
pub use magniview_core;
pub use magniview_core::{ViewerAction, ViewerState};

/// Rescans the page and rebuilds the viewer. Returns the number of
/// magnifiable items, or 0 when the viewer could not mount (the reason is
/// logged to the console).
#[wasm_bindgen(js_name = initializeMagniview)]
pub fn initialize_magniview() -> u32 {
    controller::initialize().map(|count| count as u32).unwrap_or(0)
}

#[wasm_bindgen(js_name = closeMagniview)]
pub fn close_magniview() {
    controller::shared().dispatch(ViewerAction::Close);
}

/// Renders the gallery from a JSON array of `{name, category?, link?}`.
#[wasm_bindgen(js_name = mountGallery)]
pub fn mount_gallery(images_json: &str) -> Result<u32, JsValue> {
    Ok(gallery::mount(images_json)? as u32)
}

/// Replaces the gallery selection with a `/retrieve` response body.
#[wasm_bindgen(js_name = applyRetrieved)]
pub fn apply_retrieved(response_json: &str) -> Result<u32, JsValue> {
    Ok(gallery::apply_retrieved(response_json)? as u32)
}

#[wasm_bindgen(js_name = selectionContext)]
pub fn selection_context() -> String {
    gallery::selection_context()
}

/// Current navigation state of the page's viewer.
pub fn magniview_state() -> ViewerState {
    controller::shared().state()
}

pub fn magniview_item_count() -> usize {
    controller::shared().item_count()
}

/// Listeners currently registered by the viewer; constant across
/// re-initializations.
pub fn magniview_listener_count() -> usize {
    controller::shared().listener_count()
}

/// Number of overlay containers in the document.
pub fn magniview_overlay_count() -> u32 {
    web_sys::window()
        .and_then(|window| window.document())
        .map(|document| overlay::overlay_count(&document))
        .unwrap_or(0)
}
