use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::config::GalleryConfig;
use crate::protocol::RetrieveResponse;

pub const CHECKBOX_NAME_PREFIX: &str = "chb_";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GalleryImage {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl GalleryImage {
    pub fn html_link(&self) -> String {
        match self.link.as_deref().map(str::trim) {
            Some(link) if !link.is_empty() => link.to_string(),
            _ => html_link(file_name(&self.name)),
        }
    }
}

/// Category filter and image selection of one gallery page.
#[derive(Clone, Debug, Default)]
pub struct GalleryState {
    images: Vec<GalleryImage>,
    categories: Vec<String>,
    acronyms: BTreeMap<String, String>,
    filter: BTreeSet<String>,
    selection: Vec<String>,
}

impl GalleryState {
    pub fn new(images: Vec<GalleryImage>) -> Self {
        let categories: Vec<String> = images
            .iter()
            .filter_map(|image| image.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let acronyms = category_acronyms(&categories);
        Self {
            images,
            categories,
            acronyms,
            filter: BTreeSet::new(),
            selection: Vec::new(),
        }
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn acronym(&self, category: &str) -> Option<&str> {
        self.acronyms.get(category).map(String::as_str)
    }

    pub fn category_count(&self, category: &str) -> usize {
        self.images
            .iter()
            .filter(|image| image.category.as_deref() == Some(category))
            .count()
    }

    pub fn category_label(&self, category: &str) -> String {
        let acronym = self.acronym(category).unwrap_or("?");
        format!(
            "{category} ({acronym}) - {}",
            self.category_count(category)
        )
    }

    pub fn filter(&self) -> &BTreeSet<String> {
        &self.filter
    }

    /// Replaces the category filter and clears the selection, matching what
    /// the update button does.
    pub fn apply_filter<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter = categories
            .into_iter()
            .map(Into::into)
            .filter(|category: &String| self.acronyms.contains_key(category))
            .collect();
        self.selection.clear();
    }

    /// Images passing the filter; an empty filter lets everything through.
    pub fn visible_images(&self) -> Vec<&GalleryImage> {
        self.images
            .iter()
            .filter(|image| {
                self.filter.is_empty()
                    || image
                        .category
                        .as_ref()
                        .map(|category| self.filter.contains(category))
                        .unwrap_or(false)
            })
            .collect()
    }

    /// `position` is the 0-based slot in the visible list.
    pub fn thumbnail_label(&self, position: usize, image: &GalleryImage) -> String {
        let mut label = format!("Image {}", position + 1);
        if let Some(acronym) = image
            .category
            .as_deref()
            .and_then(|category| self.acronym(category))
        {
            label.push('(');
            label.push_str(acronym);
            label.push(')');
        }
        label
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn is_selected(&self, src: &str) -> bool {
        let name = file_name(src);
        self.selection.iter().any(|selected| selected == name)
    }

    /// Adds or removes an image by path or file name. Returns whether the
    /// selection changed.
    pub fn set_selected(&mut self, src: &str, selected: bool) -> bool {
        let name = file_name(src);
        if name.is_empty() {
            return false;
        }
        let position = self.selection.iter().position(|entry| entry == name);
        match (selected, position) {
            (true, None) => {
                self.selection.push(name.to_string());
                true
            }
            (false, Some(position)) => {
                self.selection.remove(position);
                true
            }
            _ => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Replaces the selection with the images ranked by the retrieval
    /// backend, keeping their order and dropping duplicates.
    pub fn apply_retrieved(&mut self, response: &RetrieveResponse) -> usize {
        self.selection.clear();
        for entry in &response.response {
            self.set_selected(entry, true);
        }
        self.selection.len()
    }

    /// Context string for `/ask_llm`: one image path per selected image.
    pub fn llm_context(&self, config: &GalleryConfig) -> String {
        self.selection
            .iter()
            .map(|name| config.image_path(name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// First letter of the category plus a running count among categories that
/// share it. `categories` must already be sorted.
pub fn category_acronyms(categories: &[String]) -> BTreeMap<String, String> {
    let mut acronyms = BTreeMap::new();
    let mut prev_letter: Option<char> = None;
    let mut prev_num = 0u32;
    for category in categories {
        let letter = category.chars().next();
        if letter.is_some() && letter == prev_letter {
            prev_num += 1;
        } else {
            prev_letter = letter;
            prev_num = 1;
        }
        let prefix = letter.map(String::from).unwrap_or_default();
        acronyms.insert(category.clone(), format!("{prefix}{prev_num}"));
    }
    acronyms
}

/// Last path segment, splitting on both slash kinds.
pub fn file_name(src: &str) -> &str {
    src.rsplit(['/', '\\']).next().unwrap_or(src)
}

pub fn checkbox_name(src: &str) -> String {
    let sanitized: String = file_name(src)
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect();
    format!("{CHECKBOX_NAME_PREFIX}{sanitized}")
}

/// Swaps the file extension for `.html`.
pub fn html_link(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < file_name.len() => {
            format!("{}.html", &file_name[..dot])
        }
        _ => format!("{file_name}.html"),
    }
}

pub fn truncate_label(label: &str, max_len: usize) -> String {
    if max_len == 0 || label.chars().count() <= max_len {
        return label.to_string();
    }
    let mut truncated: String = label.chars().take(max_len - 1).collect();
    truncated.push('…');
    truncated
}
