use js_sys::Reflect;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;

use magniview_core::{GalleryConfig, ViewerConfig};

pub(crate) const VIEWER_CONFIG_KEY: &str = "__MAGNIVIEW";
pub(crate) const GALLERY_CONFIG_KEY: &str = "__BAGATELLE_GALLERY";

/// Reads a page-provided override object (or JSON string) from `window`.
fn read_window_json(key: &str) -> Option<String> {
    let window = web_sys::window()?;
    let value = Reflect::get(&window, &JsValue::from_str(key)).ok()?;
    if value.is_null() || value.is_undefined() {
        return None;
    }
    if let Some(raw) = value.as_string() {
        return Some(raw);
    }
    js_sys::JSON::stringify(&value).ok().map(String::from)
}

fn load_overrides<T>(key: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    let raw = read_window_json(key)?;
    match serde_json::from_str::<T>(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            gloo::console::warn!("config: ignoring invalid overrides", key, err.to_string());
            None
        }
    }
}

pub(crate) fn load_viewer_config() -> ViewerConfig {
    load_overrides::<ViewerConfig>(VIEWER_CONFIG_KEY)
        .map(ViewerConfig::sanitized)
        .unwrap_or_default()
}

pub(crate) fn load_gallery_config() -> GalleryConfig {
    load_overrides::<GalleryConfig>(GALLERY_CONFIG_KEY).unwrap_or_default()
}
