use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Element};

use magniview_core::{FrameSize, NavigationState, ViewerAction, ViewerConfig, ViewerState};

use crate::cache::ViewerCache;
use crate::config::load_viewer_config;
use crate::error::MountError;
use crate::events::EventBinder;
use crate::input::PanDrag;
use crate::overlay;
use crate::render;
use crate::scanner::{self, Scan};

thread_local! {
    static VIEWER: RefCell<Option<Rc<Viewer>>> = RefCell::new(None);
}

/// Process-wide viewer: navigation state, the current cache and the
/// listeners bound against it.
pub(crate) struct Viewer {
    config: ViewerConfig,
    nav: RefCell<NavigationState>,
    cache: RefCell<Option<ViewerCache>>,
    binder: EventBinder,
    drag: RefCell<Option<PanDrag>>,
}

pub(crate) fn shared() -> Rc<Viewer> {
    VIEWER.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(|| Rc::new(Viewer::new(load_viewer_config())))
            .clone()
    })
}

/// Scans, closes, rebuilds the overlay and rebinds. Completes before
/// returning; a failure leaves the viewer inert and is only reported.
pub(crate) fn initialize() -> Result<usize, MountError> {
    console_error_panic_hook::set_once();
    let viewer = shared();
    let result = viewer.reinitialize();
    match &result {
        Ok(count) => gloo::console::log!("magniview: initialized", *count as u32),
        Err(err) => gloo::console::warn!("magniview: viewer inert", err.to_string()),
    }
    result
}

impl Viewer {
    fn new(config: ViewerConfig) -> Self {
        let nav = NavigationState::new(config.max_zoom);
        Self {
            config,
            nav: RefCell::new(nav),
            cache: RefCell::new(None),
            binder: EventBinder::default(),
            drag: RefCell::new(None),
        }
    }

    pub(crate) fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub(crate) fn state(&self) -> ViewerState {
        self.nav.borrow().state()
    }

    pub(crate) fn is_open(&self) -> bool {
        self.state().is_open()
    }

    pub(crate) fn is_zoomed(&self) -> bool {
        self.state().is_zoomed()
    }

    pub(crate) fn frame(&self) -> FrameSize {
        self.nav.borrow().frame()
    }

    pub(crate) fn item_count(&self) -> usize {
        self.cache
            .borrow()
            .as_ref()
            .map(ViewerCache::len)
            .unwrap_or(0)
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.binder.listener_count()
    }

    pub(crate) fn index_of(&self, target: &Element) -> Option<usize> {
        self.cache.borrow().as_ref()?.index_of(target)
    }

    fn reinitialize(self: &Rc<Self>) -> Result<usize, MountError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(MountError::NoDocument)?;

        let root = resolve_root(&document, &self.config);
        let scan = match &root {
            Ok(root) => scanner::scan(root, &self.config),
            Err(_) => Scan::empty(),
        };

        self.drag.borrow_mut().take();
        self.nav.borrow_mut().reinitialize(scan.items.len());
        if let Some(cache) = self.cache.borrow().as_ref() {
            render::render(cache, ViewerState::Closed);
        }
        self.binder.detach_all();
        self.cache.borrow_mut().take();

        let built = root.and_then(|root| {
            let overlay = overlay::ensure_overlay(&document, &self.config)?;
            Ok((root, overlay))
        });
        let (root, overlay) = match built {
            Ok(built) => built,
            Err(err) => {
                self.nav.borrow_mut().reinitialize(0);
                return Err(err);
            }
        };

        let cache = ViewerCache::new(scan, overlay);
        render::render(&cache, ViewerState::Closed);
        self.binder.bind(self, &root, &document, cache.overlay());
        let count = cache.len();
        *self.cache.borrow_mut() = Some(cache);
        Ok(count)
    }

    /// Runs one transition and re-renders if it changed anything.
    pub(crate) fn dispatch(&self, action: ViewerAction) {
        let result = self.nav.borrow_mut().apply(action);
        match result {
            Ok(true) => {
                if !self.is_open() {
                    self.drag.borrow_mut().take();
                }
                self.render();
                if self.is_open() {
                    self.sync_frame();
                }
            }
            Ok(false) => {}
            Err(err) => gloo::console::warn!("magniview: ignored", err.to_string()),
        }
    }

    fn render(&self) {
        let state = self.state();
        if let Some(cache) = self.cache.borrow().as_ref() {
            render::render(cache, state);
        }
    }

    /// Feeds the image slot's layout size into the pan bounds.
    pub(crate) fn sync_frame(&self) {
        let frame = match self.cache.borrow().as_ref() {
            Some(cache) => render::measure_frame(cache),
            None => return,
        };
        if !frame.is_known() || frame == self.frame() {
            return;
        }
        let changed = self
            .nav
            .borrow_mut()
            .apply(ViewerAction::Resize {
                width: frame.width,
                height: frame.height,
            })
            .unwrap_or(false);
        if changed {
            self.render();
        }
    }

    pub(crate) fn begin_drag(&self, drag: PanDrag) {
        *self.drag.borrow_mut() = Some(drag);
    }

    pub(crate) fn drag_delta(&self, pointer_id: i32, x: f32, y: f32) -> Option<(f32, f32)> {
        let mut guard = self.drag.borrow_mut();
        let drag = guard.as_mut().filter(|drag| drag.pointer_id == pointer_id)?;
        drag.advance(x, y)
    }

    pub(crate) fn end_drag(&self, pointer_id: i32) -> bool {
        let mut guard = self.drag.borrow_mut();
        if guard.as_ref().map(|drag| drag.pointer_id) == Some(pointer_id) {
            guard.take();
            return true;
        }
        false
    }
}

fn resolve_root(document: &Document, config: &ViewerConfig) -> Result<Element, MountError> {
    match config.root_selector.as_deref() {
        Some(selector) => document
            .query_selector(selector)
            .ok()
            .flatten()
            .ok_or_else(|| MountError::MissingRoot {
                selector: selector.to_string(),
            }),
        None => document
            .body()
            .map(Element::from)
            .ok_or_else(|| MountError::MissingRoot {
                selector: "body".to_string(),
            }),
    }
}
