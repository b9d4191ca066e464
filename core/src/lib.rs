pub mod action;
pub mod config;
pub mod gallery;
pub mod item;
pub mod navigation;
pub mod protocol;

pub use action::ViewerAction;
pub use config::{GalleryConfig, LinkSource, ViewerConfig};
pub use gallery::{GalleryImage, GalleryState};
pub use item::{
    index_items, normalize_caption, MagnifiableItem, RawItem, CAPTION_ATTR, FULL_SOURCE_ATTR,
    MAGNIFIABLE_ATTR,
};
pub use navigation::{
    clamp_pan, pan_bound, FrameSize, NavigationError, NavigationState, ViewerState, MAX_ZOOM,
    MIN_ZOOM,
};
pub use protocol::{
    AskLlmRequest, GenerateProgramRequest, GenerateProgramResponse, LoginRequest, LoginResponse,
    RetrieveRequest, RetrieveResponse, SessionResponse, TextResponse,
};
