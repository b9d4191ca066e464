use std::fmt;

use wasm_bindgen::JsValue;

/// Conditions that leave the viewer (or the gallery) inert. None of them is
/// fatal to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    NoDocument,
    MissingMount { id: String },
    MissingRoot { selector: String },
    InvalidData(String),
    Dom(String),
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountError::NoDocument => write!(f, "no document available"),
            MountError::MissingMount { id } => write!(f, "overlay mount point '{id}' not found"),
            MountError::MissingRoot { selector } => {
                write!(f, "scan root '{selector}' not found")
            }
            MountError::InvalidData(message) => write!(f, "invalid data: {message}"),
            MountError::Dom(message) => write!(f, "dom operation failed: {message}"),
        }
    }
}

impl std::error::Error for MountError {}

impl From<JsValue> for MountError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::JSON::stringify(&value)
                    .ok()
                    .map(String::from)
            })
            .unwrap_or_else(|| "unknown error".to_string());
        MountError::Dom(message)
    }
}

impl From<MountError> for JsValue {
    fn from(err: MountError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
