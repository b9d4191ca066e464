#![cfg(target_arch = "wasm32")]

use bagatelle::{
    apply_retrieved, close_magniview, initialize_magniview, magniview_item_count,
    magniview_listener_count, magniview_overlay_count, magniview_state, mount_gallery,
    selection_context, ViewerState,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    window, Document, Element, Event, HtmlElement, HtmlImageElement, HtmlInputElement,
    KeyboardEvent, KeyboardEventInit, MouseEvent, MouseEventInit, PointerEvent, PointerEventInit,
    WheelEvent, WheelEventInit,
};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    window()
        .and_then(|window| window.document())
        .expect("document")
}

/// Replaces the page body with `count` marked thumbnails.
fn thumbnails(count: usize) {
    let markup: String = (0..count)
        .map(|idx| {
            format!(
                "<figure data-magniview><img src=\"/img/{idx}.png\" alt=\"shot {idx}\">\
                 <figcaption>Shot  {idx}</figcaption></figure>"
            )
        })
        .collect();
    document()
        .body()
        .expect("body")
        .set_inner_html(&markup);
}

fn click(element: &Element) {
    element
        .clone()
        .dyn_into::<HtmlElement>()
        .expect("html element")
        .click();
}

fn thumbnail(idx: usize) -> Element {
    document()
        .query_selector_all("[data-magniview] img")
        .expect("query")
        .get(idx as u32)
        .expect("thumbnail")
        .dyn_into::<Element>()
        .expect("element")
}

fn press(key: &str) {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).expect("event");
    document().dispatch_event(&event).expect("dispatch");
}

fn overlay_part(class: &str) -> Element {
    document()
        .query_selector(&format!("[data-magniview-overlay] .{class}"))
        .expect("query")
        .expect("overlay part")
}

fn open_index() -> Option<usize> {
    magniview_state().open_index()
}

fn html(element: &Element) -> HtmlElement {
    element.clone().dyn_into::<HtmlElement>().expect("html element")
}

/// What the browser serializes for `css` as an inline transform.
fn serialized_transform(css: &str) -> String {
    let scratch = html(&document().create_element("div").expect("div"));
    scratch
        .style()
        .set_property("transform", css)
        .expect("transform");
    scratch.style().get_property_value("transform").expect("read")
}

fn image_transform() -> String {
    html(&overlay_part("magniview-image"))
        .style()
        .get_property_value("transform")
        .expect("read")
}

/// The element a real pointer would hit at the centre of `element`.
fn hit_at_centre(element: &Element) -> Element {
    let rect = element.get_bounding_client_rect();
    let x = rect.x() + rect.width() / 2.0;
    let y = rect.y() + rect.height() / 2.0;
    document()
        .element_from_point(x as f32, y as f32)
        .expect("something under the pointer")
}

fn wheel(target: &Element, delta_y: f64) {
    let init = WheelEventInit::new();
    init.set_delta_y(delta_y);
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = WheelEvent::new_with_event_init_dict("wheel", &init).expect("event");
    target.dispatch_event(&event).expect("dispatch");
}

fn pointer(target: &Element, kind: &str, x: i32, y: i32) {
    let init = PointerEventInit::new();
    init.set_pointer_id(7);
    init.set_pointer_type("mouse");
    init.set_button(0);
    init.set_client_x(x);
    init.set_client_y(y);
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = PointerEvent::new_with_event_init_dict(kind, &init).expect("event");
    target.dispatch_event(&event).expect("dispatch");
}

/// Gives the image slot a fixed layout box and lets the viewer measure it.
fn fix_frame(width: &str, height: &str) {
    let image = html(&overlay_part("magniview-image"));
    image.style().set_property("width", width).expect("width");
    image.style().set_property("height", height).expect("height");
    let resize = Event::new("resize").expect("event");
    window()
        .expect("window")
        .dispatch_event(&resize)
        .expect("dispatch");
}

#[wasm_bindgen_test]
fn repeated_initialization_keeps_one_overlay_and_listener_set() {
    thumbnails(3);
    assert_eq!(initialize_magniview(), 3);
    let listeners = magniview_listener_count();
    assert!(listeners > 0);

    assert_eq!(initialize_magniview(), 3);
    assert_eq!(initialize_magniview(), 3);
    assert_eq!(magniview_overlay_count(), 1);
    assert_eq!(magniview_listener_count(), listeners);

    click(&thumbnail(0));
    assert_eq!(open_index(), Some(0));
    close_magniview();
}

#[wasm_bindgen_test]
fn clicking_third_thumbnail_opens_it() {
    thumbnails(5);
    initialize_magniview();
    click(&thumbnail(2));

    assert_eq!(open_index(), Some(2));
    assert_eq!(overlay_part("magniview-counter").text_content().as_deref(), Some("3 / 5"));
    assert_eq!(
        overlay_part("magniview-caption").text_content().as_deref(),
        Some("Shot 2")
    );
    let overlay = document()
        .query_selector("[data-magniview-overlay]")
        .expect("query")
        .expect("overlay");
    assert_eq!(overlay.get_attribute("aria-hidden").as_deref(), Some("false"));

    press("Escape");
    assert_eq!(magniview_state(), ViewerState::Closed);
    assert_eq!(overlay.get_attribute("aria-hidden").as_deref(), Some("true"));
}

#[wasm_bindgen_test]
fn arrow_keys_wrap_around() {
    thumbnails(5);
    initialize_magniview();
    click(&thumbnail(4));

    press("ArrowRight");
    assert_eq!(open_index(), Some(0));
    press("ArrowLeft");
    assert_eq!(open_index(), Some(4));
    press("Home");
    assert_eq!(open_index(), Some(0));
    close_magniview();
}

#[wasm_bindgen_test]
fn keys_are_ignored_while_closed() {
    thumbnails(2);
    initialize_magniview();
    press("ArrowRight");
    assert_eq!(magniview_state(), ViewerState::Closed);
}

#[wasm_bindgen_test]
fn overlay_buttons_step_and_close() {
    thumbnails(3);
    initialize_magniview();
    click(&thumbnail(1));

    click(&overlay_part("magniview-next"));
    assert_eq!(open_index(), Some(2));
    click(&overlay_part("magniview-prev"));
    assert_eq!(open_index(), Some(1));
    click(&overlay_part("magniview-close"));
    assert_eq!(magniview_state(), ViewerState::Closed);
}

#[wasm_bindgen_test]
fn overlay_controls_are_hit_above_the_backdrop() {
    thumbnails(3);
    initialize_magniview();
    click(&thumbnail(0));

    let next = overlay_part("magniview-next");
    let hit = hit_at_centre(&next);
    assert_eq!(hit, next);
    click(&hit);
    assert_eq!(open_index(), Some(1));

    let prev = overlay_part("magniview-prev");
    assert_eq!(hit_at_centre(&prev), prev);

    let close = overlay_part("magniview-close");
    let hit = hit_at_centre(&close);
    assert_eq!(hit, close);
    click(&hit);
    assert_eq!(magniview_state(), ViewerState::Closed);
}

#[wasm_bindgen_test]
fn backdrop_click_closes() {
    thumbnails(3);
    initialize_magniview();
    click(&thumbnail(2));

    let hit = document()
        .element_from_point(2.0, 2.0)
        .expect("something under the pointer");
    assert!(hit.class_list().contains("magniview-backdrop"));
    click(&hit);
    assert_eq!(magniview_state(), ViewerState::Closed);
}

#[wasm_bindgen_test]
fn wheel_zoom_and_drag_reset_on_next() {
    thumbnails(3);
    initialize_magniview();
    click(&thumbnail(0));
    fix_frame("200px", "100px");

    let image = overlay_part("magniview-image");
    let stage = overlay_part("magniview-stage");
    assert!(!stage.has_attribute("data-zoomed"));

    wheel(&image, -200.0);
    let zoomed = magniview_state();
    assert!(zoomed.zoom() > 1.0);
    assert!(stage.has_attribute("data-zoomed"));
    assert_eq!(image_transform(), serialized_transform(&zoomed.transform_css()));

    pointer(&image, "pointerdown", 10, 10);
    pointer(&image, "pointermove", 11, 11);
    assert_eq!(magniview_state().pan(), (0.0, 0.0));
    pointer(&image, "pointermove", 40, 10);
    let (pan_x, pan_y) = magniview_state().pan();
    assert!((pan_x - 30.0).abs() < 1e-3, "pan x was {pan_x}");
    assert_eq!(pan_y, 0.0);
    pointer(&image, "pointerup", 40, 10);
    pointer(&image, "pointermove", 90, 10);
    assert!((magniview_state().pan().0 - 30.0).abs() < 1e-3);

    press("ArrowRight");
    let state = magniview_state();
    assert_eq!(state.open_index(), Some(1));
    assert_eq!(state.zoom(), 1.0);
    assert_eq!(state.pan(), (0.0, 0.0));
    assert!(!stage.has_attribute("data-zoomed"));
    assert_eq!(
        image_transform(),
        serialized_transform("translate(0.00px, 0.00px) scale(1.0000)")
    );
    let expected_src = thumbnail(1)
        .dyn_into::<HtmlImageElement>()
        .expect("img")
        .src();
    assert_eq!(image.get_attribute("src"), Some(expected_src));
    close_magniview();
}

#[wasm_bindgen_test]
fn double_click_resets_the_view() {
    thumbnails(2);
    initialize_magniview();
    click(&thumbnail(0));
    press("+");
    assert!(magniview_state().is_zoomed());

    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = MouseEvent::new_with_mouse_event_init_dict("dblclick", &init).expect("event");
    overlay_part("magniview-image")
        .dispatch_event(&event)
        .expect("dispatch");

    assert_eq!(magniview_state().open_index(), Some(0));
    assert!(!magniview_state().is_zoomed());
    close_magniview();
}

#[wasm_bindgen_test]
fn shrinking_the_page_while_open_closes_the_viewer() {
    thumbnails(5);
    initialize_magniview();
    click(&thumbnail(4));
    assert_eq!(open_index(), Some(4));

    thumbnails(2);
    assert_eq!(initialize_magniview(), 2);
    assert_eq!(magniview_state(), ViewerState::Closed);
    assert_eq!(magniview_item_count(), 2);
    assert_eq!(magniview_overlay_count(), 1);
}

#[wasm_bindgen_test]
fn empty_page_has_nothing_to_open() {
    thumbnails(0);
    assert_eq!(initialize_magniview(), 0);
    press("ArrowRight");
    assert_eq!(magniview_state(), ViewerState::Closed);
    assert_eq!(magniview_overlay_count(), 1);
}

#[wasm_bindgen_test]
fn caption_controls_do_not_open_the_viewer() {
    document().body().expect("body").set_inner_html(
        "<figure data-magniview><img src=\"/img/a.png\">\
         <figcaption><button type=\"button\">details</button></figcaption></figure>",
    );
    initialize_magniview();
    let button = document()
        .query_selector("figcaption button")
        .expect("query")
        .expect("button");
    click(&button);
    assert_eq!(magniview_state(), ViewerState::Closed);
}

#[wasm_bindgen_test]
fn gallery_mount_feeds_the_viewer() {
    document().body().expect("body").set_inner_html(
        "<div id=\"checkbox-container\"></div><button id=\"update-button\"></button>\
         <div id=\"image-container\"></div><div id=\"selected-image-container\"></div>",
    );
    let images = r#"[
        {"name": "a.png", "category": "charts"},
        {"name": "b.png", "category": "photos"},
        {"name": "c.png", "category": "charts"}
    ]"#;
    assert_eq!(mount_gallery(images).expect("mount"), 3);
    assert_eq!(magniview_item_count(), 3);
    assert_eq!(
        document()
            .query_selector_all("#checkbox-container input")
            .expect("query")
            .length(),
        2
    );

    let retrieved = r#"{"response": ["./static/data/images/b.png"]}"#;
    assert_eq!(apply_retrieved(retrieved).expect("retrieved"), 1);
    assert_eq!(magniview_item_count(), 4);
    assert_eq!(selection_context(), "./static/data/images/b.png");

    click(&thumbnail(3));
    assert_eq!(open_index(), Some(3));
    close_magniview();
}

#[wasm_bindgen_test]
fn gallery_rejects_malformed_image_list() {
    assert!(mount_gallery("{not json").is_err());
}

fn gallery_page() {
    document().body().expect("body").set_inner_html(
        "<div id=\"checkbox-container\"></div><button id=\"update-button\"></button>\
         <div id=\"image-container\"></div><div id=\"selected-image-container\"></div>",
    );
}

fn filter_to(category: &str) {
    let checkbox = document()
        .query_selector(&format!("#checkbox-container input[value=\"{category}\"]"))
        .expect("query")
        .expect("category checkbox")
        .dyn_into::<HtmlInputElement>()
        .expect("input");
    checkbox.set_checked(true);
    click(
        &document()
            .get_element_by_id("update-button")
            .expect("update button"),
    );
}

#[wasm_bindgen_test]
fn failed_remount_keeps_the_mounted_gallery() {
    gallery_page();
    let images = r#"[
        {"name": "a.png", "category": "charts"},
        {"name": "b.png", "category": "photos"},
        {"name": "c.png", "category": "charts"}
    ]"#;
    mount_gallery(images).expect("mount");
    assert!(mount_gallery(r#"[{"category": "charts"}]"#).is_err());

    assert_eq!(magniview_item_count(), 3);
    filter_to("photos");
    assert_eq!(magniview_item_count(), 1);
}

#[wasm_bindgen_test]
fn remount_replaces_the_previous_gallery_bindings() {
    gallery_page();
    mount_gallery(r#"[{"name": "a.png", "category": "charts"}]"#).expect("first mount");
    let second = r#"[
        {"name": "x.png", "category": "maps"},
        {"name": "y.png", "category": "maps"},
        {"name": "z.png", "category": "plots"}
    ]"#;
    assert_eq!(mount_gallery(second).expect("second mount"), 3);

    filter_to("maps");
    assert_eq!(magniview_item_count(), 2);
    assert_eq!(
        document()
            .query_selector_all("#image-container figure")
            .expect("query")
            .length(),
        2
    );
}
