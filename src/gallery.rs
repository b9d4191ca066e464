use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement};

use magniview_core::gallery::{checkbox_name, file_name, html_link, truncate_label};
use magniview_core::{
    GalleryConfig, GalleryImage, GalleryState, RetrieveResponse, CAPTION_ATTR, MAGNIFIABLE_ATTR,
};

use crate::config::load_gallery_config;
use crate::controller;
use crate::error::MountError;

const FILE_ATTR: &str = "data-file";

thread_local! {
    static GALLERY: RefCell<Option<Rc<GalleryView>>> = RefCell::new(None);
}

/// Thumbnail gallery with category filter and selection panel. Every
/// re-render ends with an explicit viewer initialization.
pub(crate) struct GalleryView {
    config: GalleryConfig,
    document: Document,
    state: RefCell<GalleryState>,
    listeners: RefCell<Vec<EventListener>>,
}

pub(crate) fn mount(images_json: &str) -> Result<usize, MountError> {
    let images: Vec<GalleryImage> = serde_json::from_str(images_json)
        .map_err(|err| MountError::InvalidData(err.to_string()))?;
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(MountError::NoDocument)?;
    let view = Rc::new(GalleryView {
        config: load_gallery_config(),
        document,
        state: RefCell::new(GalleryState::new(images)),
        listeners: RefCell::new(Vec::new()),
    });
    view.render_categories()?;
    view.render_images()?;
    view.render_selected()?;

    // Listener closures keep their view alive, so the previous mount is
    // detached explicitly, and only once the new one has rendered.
    let previous = GALLERY.with(|slot| slot.borrow_mut().replace(Rc::clone(&view)));
    if let Some(previous) = previous {
        previous.listeners.borrow_mut().clear();
    }
    view.install_listeners();
    let count = view.state.borrow().visible_images().len();
    refresh_viewer();
    gloo::console::log!("gallery: mounted", count as u32);
    Ok(count)
}

/// Applies a `/retrieve` response body to the mounted gallery's selection.
pub(crate) fn apply_retrieved(response_json: &str) -> Result<usize, MountError> {
    let response: RetrieveResponse = serde_json::from_str(response_json)
        .map_err(|err| MountError::InvalidData(err.to_string()))?;
    let view = GALLERY
        .with(|slot| slot.borrow().clone())
        .ok_or_else(|| MountError::InvalidData("gallery not mounted".to_string()))?;
    let count = view.state.borrow_mut().apply_retrieved(&response);
    view.sync_checkboxes();
    view.render_selected()?;
    refresh_viewer();
    Ok(count)
}

/// Selected image paths joined for the `/ask_llm` context field.
pub(crate) fn selection_context() -> String {
    GALLERY
        .with(|slot| slot.borrow().clone())
        .map(|view| view.state.borrow().llm_context(&view.config))
        .unwrap_or_default()
}

fn refresh_viewer() {
    // Failures are already reported by the controller; browsing goes on.
    let _ = controller::initialize();
}

impl GalleryView {
    fn container(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn render_categories(&self) -> Result<(), MountError> {
        let Some(container) = self.container(&self.config.category_container_id) else {
            return Ok(());
        };
        container.set_inner_html("");
        let state = self.state.borrow();
        for category in state.categories() {
            let label = self.document.create_element("label")?;
            let checkbox = self.document.create_element("input")?;
            checkbox.set_attribute("type", "checkbox")?;
            checkbox.set_attribute("value", category)?;
            label.append_child(&checkbox)?;
            let text = self.document.create_text_node(&state.category_label(category));
            label.append_child(&text)?;
            container.append_child(&label)?;
            let br = self.document.create_element("br")?;
            container.append_child(&br)?;
        }
        Ok(())
    }

    fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();
        if let Some(button) = self.container(&self.config.update_button_id) {
            let view = Rc::clone(self);
            listeners.push(EventListener::new(&button, "click", move |_event: &Event| {
                view.apply_category_filter();
            }));
        }
        for id in [
            &self.config.image_container_id,
            &self.config.selected_container_id,
        ] {
            let Some(container) = self.container(id) else {
                continue;
            };
            let view = Rc::clone(self);
            listeners.push(EventListener::new(&container, "change", move |event: &Event| {
                view.toggle_selection(event);
            }));
        }
        *self.listeners.borrow_mut() = listeners;
    }

    fn checked_categories(&self) -> Vec<String> {
        let Some(container) = self.container(&self.config.category_container_id) else {
            return Vec::new();
        };
        let Ok(nodes) = container.query_selector_all("input[type=\"checkbox\"]:checked") else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|idx| nodes.get(idx))
            .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .collect()
    }

    fn apply_category_filter(&self) {
        let categories = self.checked_categories();
        self.state.borrow_mut().apply_filter(categories);
        if let Err(err) = self.render_images().and_then(|_| self.render_selected()) {
            gloo::console::warn!("gallery: render failed", err.to_string());
        }
        refresh_viewer();
    }

    fn toggle_selection(&self, event: &Event) {
        let Some(input) = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.get_attribute(FILE_ATTR) else {
            return;
        };
        let checked = input.checked();
        if !self.state.borrow_mut().set_selected(&file, checked) {
            return;
        }
        self.sync_checkboxes();
        if let Err(err) = self.render_selected() {
            gloo::console::warn!("gallery: render failed", err.to_string());
        }
        refresh_viewer();
    }

    /// Sets every selection checkbox from the state, so both panels agree.
    fn sync_checkboxes(&self) {
        let Ok(nodes) = self
            .document
            .query_selector_all(&format!("input[{FILE_ATTR}]"))
        else {
            return;
        };
        let state = self.state.borrow();
        for idx in 0..nodes.length() {
            let Some(input) = nodes
                .get(idx)
                .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
            else {
                continue;
            };
            if let Some(file) = input.get_attribute(FILE_ATTR) {
                input.set_checked(state.is_selected(&file));
            }
        }
    }

    fn render_images(&self) -> Result<(), MountError> {
        let Some(container) = self.container(&self.config.image_container_id) else {
            return Ok(());
        };
        container.set_inner_html("");
        let state = self.state.borrow();
        for (position, image) in state.visible_images().into_iter().enumerate() {
            let label = state.thumbnail_label(position, image);
            let src = self.config.image_path(&image.name);
            let figure = self.thumbnail(&src, &label, &image.html_link(), &state)?;
            container.append_child(&figure)?;
        }
        Ok(())
    }

    fn render_selected(&self) -> Result<(), MountError> {
        let Some(container) = self.container(&self.config.selected_container_id) else {
            return Ok(());
        };
        container.set_inner_html("");
        let state = self.state.borrow();
        for name in state.selection() {
            let src = self.config.image_path(name);
            let link = html_link(name);
            let figure = self.thumbnail(&src, name, &link, &state)?;
            container.append_child(&figure)?;
        }
        Ok(())
    }

    fn thumbnail(
        &self,
        src: &str,
        label: &str,
        link: &str,
        state: &GalleryState,
    ) -> Result<Element, MountError> {
        let document = &self.document;
        let figure = document.create_element("figure")?;
        figure.set_attribute(MAGNIFIABLE_ATTR, &self.config.marker_group)?;

        let image = document.create_element("img")?;
        image.set_attribute("src", src)?;
        image.set_class_name("thumbnail");
        image.set_attribute("title", file_name(src))?;
        image.set_attribute("alt", label)?;
        figure.append_child(&image)?;

        let caption = document.create_element("figcaption")?;
        let label_elem = document.create_element("div")?;
        label_elem.set_class_name("imageLabel");
        label_elem.set_attribute(CAPTION_ATTR, "")?;
        label_elem.set_text_content(Some(&truncate_label(label, self.config.label_max_len)));
        caption.append_child(&label_elem)?;

        let links = document.create_element("div")?;
        links.set_class_name("linkColumn");
        for source in &self.config.link_sources {
            let anchor = document.create_element("a")?;
            anchor.set_attribute("href", &format!("{}{}", source.dir, link))?;
            anchor.set_attribute("target", "_blank")?;
            anchor.set_text_content(Some(&source.label));
            links.append_child(&anchor)?;
        }
        caption.append_child(&links)?;
        figure.append_child(&caption)?;

        if self.config.show_checkboxes {
            let checkbox = document
                .create_element("input")?
                .dyn_into::<HtmlInputElement>()
                .map_err(|_| MountError::Dom("checkbox is not an input".to_string()))?;
            checkbox.set_type("checkbox");
            checkbox.set_class_name("imageCheckbox");
            checkbox.set_name(&checkbox_name(src));
            checkbox.set_attribute(FILE_ATTR, file_name(src))?;
            checkbox.set_checked(state.is_selected(src));
            figure.append_child(&checkbox)?;
        }
        Ok(figure)
    }
}
