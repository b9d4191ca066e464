use serde::Deserialize;

use crate::item::MAGNIFIABLE_ATTR;
use crate::navigation::{MAX_ZOOM, MIN_ZOOM};

pub const DEFAULT_OVERLAY_ID: &str = "magniview-overlay";
pub const DEFAULT_CAPTION_SELECTOR: &str = "figcaption";
pub const DEFAULT_WHEEL_ZOOM_RATE: f32 = 0.0015;
pub const DEFAULT_KEY_ZOOM_STEP: f32 = 1.25;
pub const DEFAULT_DRAG_SLOP_PX: f32 = 3.0;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub marker_attribute: String,
    /// Subtree scanned for marked thumbnails; `None` scans `<body>`.
    pub root_selector: Option<String>,
    /// Element the overlay is appended to; `None` uses `<body>`.
    pub mount_id: Option<String>,
    pub overlay_id: String,
    pub caption_selector: String,
    pub max_zoom: f32,
    pub wheel_zoom_rate: f32,
    pub key_zoom_step: f32,
    pub drag_slop_px: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            marker_attribute: MAGNIFIABLE_ATTR.to_string(),
            root_selector: None,
            mount_id: None,
            overlay_id: DEFAULT_OVERLAY_ID.to_string(),
            caption_selector: DEFAULT_CAPTION_SELECTOR.to_string(),
            max_zoom: MAX_ZOOM,
            wheel_zoom_rate: DEFAULT_WHEEL_ZOOM_RATE,
            key_zoom_step: DEFAULT_KEY_ZOOM_STEP,
            drag_slop_px: DEFAULT_DRAG_SLOP_PX,
        }
    }
}

impl ViewerConfig {
    /// Replaces out-of-range overrides with defaults so a bad page config
    /// cannot break the viewer.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.marker_attribute.trim().is_empty() {
            self.marker_attribute = defaults.marker_attribute;
        }
        if self.overlay_id.trim().is_empty() {
            self.overlay_id = defaults.overlay_id;
        }
        if self.caption_selector.trim().is_empty() {
            self.caption_selector = defaults.caption_selector;
        }
        self.root_selector = non_blank(self.root_selector);
        self.mount_id = non_blank(self.mount_id);
        if !self.max_zoom.is_finite() || self.max_zoom < MIN_ZOOM {
            self.max_zoom = defaults.max_zoom;
        }
        if !self.wheel_zoom_rate.is_finite() || self.wheel_zoom_rate <= 0.0 {
            self.wheel_zoom_rate = defaults.wheel_zoom_rate;
        }
        if !self.key_zoom_step.is_finite() || self.key_zoom_step <= 1.0 {
            self.key_zoom_step = defaults.key_zoom_step;
        }
        if !self.drag_slop_px.is_finite() || self.drag_slop_px < 0.0 {
            self.drag_slop_px = defaults.drag_slop_px;
        }
        self
    }

    /// CSS selector matching every marked element.
    pub fn marker_selector(&self) -> String {
        format!("[{}]", self.marker_attribute)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LinkSource {
    pub label: String,
    pub dir: String,
}

impl LinkSource {
    fn new(label: &str, dir: &str) -> Self {
        Self {
            label: label.to_string(),
            dir: dir.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub image_dir: String,
    pub link_sources: Vec<LinkSource>,
    pub label_max_len: usize,
    pub show_checkboxes: bool,
    pub marker_group: String,
    pub image_container_id: String,
    pub selected_container_id: String,
    pub category_container_id: String,
    pub update_button_id: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            image_dir: "./static/data/images/".to_string(),
            link_sources: vec![
                LinkSource::new("Claude-sonnet-4", "./static/data/html_claude-sonnet-4/"),
                LinkSource::new("GPT-4o", "./static/data/html_gpt-4o/"),
                LinkSource::new("GPT-5", "./static/data/html_gpt-5/"),
            ],
            label_max_len: 30,
            show_checkboxes: true,
            marker_group: "bagatelle".to_string(),
            image_container_id: "image-container".to_string(),
            selected_container_id: "selected-image-container".to_string(),
            category_container_id: "checkbox-container".to_string(),
            update_button_id: "update-button".to_string(),
        }
    }
}

impl GalleryConfig {
    pub fn image_path(&self, file_name: &str) -> String {
        format!("{}{}", self.image_dir, file_name)
    }
}
