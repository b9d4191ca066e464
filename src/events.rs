use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent, PointerEvent, WheelEvent};

use magniview_core::ViewerAction;

use crate::controller::Viewer;
use crate::input::{
    is_interactive_within, wheel_delta_px, wheel_zoom_factor, PanDrag, PointerKind,
};
use crate::overlay::OverlayHandles;

const ACTIVE_OPTIONS: EventListenerOptions = EventListenerOptions {
    phase: EventListenerPhase::Bubble,
    passive: false,
};

/// Owns every listener the viewer registers. Dropping a `gloo` listener
/// unregisters it, so clearing the list is the detach step.
#[derive(Default)]
pub(crate) struct EventBinder {
    listeners: RefCell<Vec<EventListener>>,
}

impl EventBinder {
    pub(crate) fn detach_all(&self) -> usize {
        let mut listeners = self.listeners.borrow_mut();
        let count = listeners.len();
        listeners.clear();
        count
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub(crate) fn bind(
        &self,
        viewer: &Rc<Viewer>,
        root: &Element,
        document: &Document,
        overlay: &OverlayHandles,
    ) {
        self.detach_all();
        let mut listeners = Vec::new();
        listeners.push(bind_open(viewer, root));
        listeners.push(bind_keys(viewer, document));
        listeners.push(bind_action(viewer, &overlay.backdrop, ViewerAction::Close));
        listeners.push(bind_action(viewer, &overlay.close, ViewerAction::Close));
        listeners.push(bind_action(viewer, &overlay.prev, ViewerAction::Prev));
        listeners.push(bind_action(viewer, &overlay.next, ViewerAction::Next));
        listeners.push(bind_stage_close(viewer, &overlay.stage));
        listeners.extend(bind_image(viewer, overlay));
        if let Some(window) = web_sys::window() {
            let view = Rc::clone(viewer);
            listeners.push(EventListener::new(&window, "resize", move |_event| {
                view.sync_frame();
            }));
        }
        *self.listeners.borrow_mut() = listeners;
    }
}

/// One delegated listener on the scanned root opens whichever marked
/// thumbnail was clicked.
fn bind_open(viewer: &Rc<Viewer>, root: &Element) -> EventListener {
    let view = Rc::clone(viewer);
    let marker = viewer.config().marker_selector();
    EventListener::new_with_options(root, "click", ACTIVE_OPTIONS, move |event: &Event| {
        let Some(target) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
        else {
            return;
        };
        let Some(marked) = target.closest(&marker).ok().flatten() else {
            return;
        };
        if is_interactive_within(&target, &marked) {
            return;
        }
        let Some(index) = view.index_of(&marked) else {
            return;
        };
        event.prevent_default();
        view.dispatch(ViewerAction::Open(index));
    })
}

fn bind_keys(viewer: &Rc<Viewer>, document: &Document) -> EventListener {
    let view = Rc::clone(viewer);
    EventListener::new_with_options(document, "keydown", ACTIVE_OPTIONS, move |event: &Event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if !view.is_open() || event.ctrl_key() || event.meta_key() || event.alt_key() {
            return;
        }
        let Some(action) = ViewerAction::from_key(&event.key(), view.config().key_zoom_step)
        else {
            return;
        };
        event.prevent_default();
        view.dispatch(action);
    })
}

fn bind_action(viewer: &Rc<Viewer>, target: &Element, action: ViewerAction) -> EventListener {
    let view = Rc::clone(viewer);
    EventListener::new(target, "click", move |event: &Event| {
        event.prevent_default();
        event.stop_propagation();
        view.dispatch(action);
    })
}

/// Clicks on the empty stage around the image close the viewer too.
fn bind_stage_close(viewer: &Rc<Viewer>, stage: &Element) -> EventListener {
    let view = Rc::clone(viewer);
    let stage_target: EventTarget = stage.clone().into();
    EventListener::new(stage, "click", move |event: &Event| {
        if event.target().as_ref() == Some(&stage_target) {
            view.dispatch(ViewerAction::Close);
        }
    })
}

fn bind_image(viewer: &Rc<Viewer>, overlay: &OverlayHandles) -> Vec<EventListener> {
    let image = overlay.image.clone();
    let mut listeners = Vec::new();

    let view = Rc::clone(viewer);
    listeners.push(EventListener::new_with_options(
        &image,
        "wheel",
        ACTIVE_OPTIONS,
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            if !view.is_open() {
                return;
            }
            event.prevent_default();
            let delta = wheel_delta_px(event, view.frame().height);
            let factor = wheel_zoom_factor(delta, view.config().wheel_zoom_rate);
            view.dispatch(ViewerAction::Zoom(factor));
        },
    ));

    let view = Rc::clone(viewer);
    let capture_target = image.clone();
    listeners.push(EventListener::new_with_options(
        &image,
        "pointerdown",
        ACTIVE_OPTIONS,
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            if !view.is_zoomed() {
                return;
            }
            let kind = PointerKind::from_pointer_type(&event.pointer_type());
            if !kind.drag_allowed(event.button()) {
                return;
            }
            event.prevent_default();
            let _ = capture_target.set_pointer_capture(event.pointer_id());
            view.begin_drag(PanDrag::begin(
                event.pointer_id(),
                event.client_x() as f32,
                event.client_y() as f32,
                view.config().drag_slop_px,
            ));
        },
    ));

    let view = Rc::clone(viewer);
    listeners.push(EventListener::new_with_options(
        &image,
        "pointermove",
        ACTIVE_OPTIONS,
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let Some((dx, dy)) = view.drag_delta(
                event.pointer_id(),
                event.client_x() as f32,
                event.client_y() as f32,
            ) else {
                return;
            };
            event.prevent_default();
            view.dispatch(ViewerAction::Pan { dx, dy });
        },
    ));

    for kind in ["pointerup", "pointercancel"] {
        let view = Rc::clone(viewer);
        let capture_target = image.clone();
        listeners.push(EventListener::new(&image, kind, move |event: &Event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            if view.end_drag(event.pointer_id()) {
                let _ = capture_target.release_pointer_capture(event.pointer_id());
            }
        }));
    }

    let view = Rc::clone(viewer);
    listeners.push(EventListener::new(&image, "dblclick", move |event: &Event| {
        event.prevent_default();
        view.dispatch(ViewerAction::ResetView);
    }));

    let view = Rc::clone(viewer);
    listeners.push(EventListener::new(&image, "load", move |_event: &Event| {
        view.sync_frame();
    }));

    listeners
}
