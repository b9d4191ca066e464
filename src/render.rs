use magniview_core::{FrameSize, ViewerState};

use crate::cache::ViewerCache;

/// Writes the navigation state into the overlay. Closed (or an index the
/// cache does not hold) hides the overlay and empties the slots.
pub(crate) fn render(cache: &ViewerCache, state: ViewerState) {
    let overlay = cache.overlay();
    let item = state.open_index().and_then(|index| cache.item(index));
    let Some(item) = item else {
        let _ = overlay.root.style().set_property("display", "none");
        let _ = overlay.root.set_attribute("aria-hidden", "true");
        let _ = overlay.root.class_list().remove_1("magniview-open");
        let _ = overlay.image.remove_attribute("src");
        let _ = overlay.image.style().set_property("transform", "none");
        let _ = overlay.stage.remove_attribute("data-zoomed");
        overlay.caption.set_text_content(None);
        overlay.counter.set_text_content(None);
        return;
    };

    let _ = overlay.root.style().set_property("display", "flex");
    let _ = overlay.root.set_attribute("aria-hidden", "false");
    let _ = overlay.root.class_list().add_1("magniview-open");
    if overlay.image.get_attribute("src").as_deref() != Some(item.source_url.as_str()) {
        overlay.image.set_src(&item.source_url);
    }
    overlay.image.set_alt(&item.caption);
    overlay.caption.set_text_content(Some(&item.caption));
    overlay
        .counter
        .set_text_content(Some(&format!("{} / {}", item.index + 1, cache.len())));
    let _ = overlay
        .image
        .style()
        .set_property("transform", &state.transform_css());
    let _ = overlay
        .image
        .style()
        .set_property("cursor", if state.is_zoomed() { "grab" } else { "zoom-in" });
    if state.is_zoomed() {
        let _ = overlay.stage.set_attribute("data-zoomed", "");
    } else {
        let _ = overlay.stage.remove_attribute("data-zoomed");
    }

    let single = cache.len() <= 1;
    for control in [&overlay.prev, &overlay.next] {
        let _ = control.toggle_attribute_with_force("hidden", single);
    }
}

/// Layout size of the image slot, ignoring the zoom transform.
pub(crate) fn measure_frame(cache: &ViewerCache) -> FrameSize {
    let image = &cache.overlay().image;
    FrameSize::new(image.offset_width() as f32, image.offset_height() as f32)
}
