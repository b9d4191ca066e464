use magniview_core::gallery::{checkbox_name, truncate_label};
use magniview_core::{GalleryConfig, GalleryImage, GalleryState, RetrieveResponse};

fn image(name: &str, category: Option<&str>) -> GalleryImage {
    GalleryImage {
        name: name.to_string(),
        category: category.map(str::to_string),
        link: None,
    }
}

fn sample_state() -> GalleryState {
    GalleryState::new(vec![
        image("a.jpg", Some("Birds")),
        image("b.jpg", Some("Animals")),
        image("c.jpg", Some("Architecture")),
        image("d.jpg", Some("Birds")),
        image("e.jpg", None),
    ])
}

#[test]
fn categories_are_sorted_with_running_acronyms() {
    let state = sample_state();
    assert_eq!(state.categories(), ["Animals", "Architecture", "Birds"]);
    assert_eq!(state.acronym("Animals"), Some("A1"));
    assert_eq!(state.acronym("Architecture"), Some("A2"));
    assert_eq!(state.acronym("Birds"), Some("B1"));
    assert_eq!(state.category_label("Birds"), "Birds (B1) - 2");
}

#[test]
fn empty_filter_shows_everything() {
    let state = sample_state();
    assert_eq!(state.visible_images().len(), 5);
}

#[test]
fn filter_keeps_matching_categories_and_clears_selection() {
    let mut state = sample_state();
    state.set_selected("static/data/images/a.jpg", true);
    state.apply_filter(["Birds", "Unknown"]);
    assert_eq!(state.filter().len(), 1);
    assert!(state.selection().is_empty());
    let names: Vec<_> = state
        .visible_images()
        .into_iter()
        .map(|image| image.name.as_str())
        .collect();
    assert_eq!(names, ["a.jpg", "d.jpg"]);
}

#[test]
fn thumbnail_labels_use_visible_position() {
    let state = sample_state();
    let images = state.images();
    assert_eq!(state.thumbnail_label(0, &images[0]), "Image 1(B1)");
    assert_eq!(state.thumbnail_label(4, &images[4]), "Image 5");
}

#[test]
fn selection_is_ordered_and_deduplicated() {
    let mut state = sample_state();
    assert!(state.set_selected("./static/data/images/c.jpg", true));
    assert!(state.set_selected("a.jpg", true));
    assert!(!state.set_selected("a.jpg", true));
    assert_eq!(state.selection(), ["c.jpg", "a.jpg"]);
    assert!(state.is_selected("x/y/a.jpg"));
    assert!(state.set_selected("a.jpg", false));
    assert!(!state.set_selected("a.jpg", false));
    assert_eq!(state.selection(), ["c.jpg"]);
}

#[test]
fn retrieved_images_replace_selection() {
    let mut state = sample_state();
    state.set_selected("e.jpg", true);
    let response = RetrieveResponse {
        response: vec![
            "data/images/d.jpg".to_string(),
            "data/images/b.jpg".to_string(),
            "other/d.jpg".to_string(),
        ],
    };
    assert_eq!(state.apply_retrieved(&response), 2);
    assert_eq!(state.selection(), ["d.jpg", "b.jpg"]);

    let config = GalleryConfig::default();
    assert_eq!(
        state.llm_context(&config),
        "./static/data/images/d.jpg\n./static/data/images/b.jpg"
    );
}

#[test]
fn label_truncation_and_checkbox_names() {
    let long = "a".repeat(40);
    let truncated = truncate_label(&long, 30);
    assert_eq!(truncated.chars().count(), 30);
    assert!(truncated.ends_with('…'));
    assert_eq!(truncate_label("short", 30), "short");
    assert_eq!(checkbox_name("static/img/my photo-1.jpg"), "chb_my_photo_1_jpg");
}

#[test]
fn image_link_prefers_explicit_value() {
    let mut img = image("dir/shot.png", None);
    assert_eq!(img.html_link(), "shot.html");
    img.link = Some("custom.html".to_string());
    assert_eq!(img.html_link(), "custom.html");
}

#[test]
fn images_deserialize_from_page_json() {
    let raw = r#"[{"name":"a.jpg","category":"Birds","link":"a.html"},{"name":"b.jpg"}]"#;
    let images: Vec<GalleryImage> = serde_json::from_str(raw).unwrap();
    let state = GalleryState::new(images);
    assert_eq!(state.images().len(), 2);
    assert_eq!(state.categories(), ["Birds"]);
}
