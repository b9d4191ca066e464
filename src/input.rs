use web_sys::{Element, Node, WheelEvent};

/// Elements inside a marked thumbnail that keep their own click behavior.
pub(crate) const INTERACTIVE_SELECTOR: &str = "a, button, input, label, select, textarea";

const WHEEL_LINE_PX: f32 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PointerKind {
    Mouse,
    Touch,
    Pen,
    Unknown,
}

impl PointerKind {
    pub(crate) fn from_pointer_type(value: &str) -> Self {
        match value {
            "mouse" => PointerKind::Mouse,
            "touch" => PointerKind::Touch,
            "pen" => PointerKind::Pen,
            _ => PointerKind::Unknown,
        }
    }

    /// Mouse drags only pan with the primary button held.
    pub(crate) fn drag_allowed(self, button: i16) -> bool {
        match self {
            PointerKind::Mouse => button == 0,
            _ => true,
        }
    }
}

/// One in-progress drag on the magnified image. Deltas are withheld until the
/// pointer leaves the slop radius around where it went down.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PanDrag {
    pub(crate) pointer_id: i32,
    origin: [f32; 2],
    last: [f32; 2],
    slop_sq: f32,
    panning: bool,
}

impl PanDrag {
    pub(crate) fn begin(pointer_id: i32, x: f32, y: f32, slop: f32) -> Self {
        let slop = slop.max(0.0);
        Self {
            pointer_id,
            origin: [x, y],
            last: [x, y],
            slop_sq: slop * slop,
            panning: false,
        }
    }

    /// Delta since the previous sample, or `None` while inside the slop
    /// radius or when the pointer did not move.
    pub(crate) fn advance(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        if !self.panning {
            let (ox, oy) = (x - self.origin[0], y - self.origin[1]);
            if ox * ox + oy * oy <= self.slop_sq {
                return None;
            }
            self.panning = true;
        }
        let delta = (x - self.last[0], y - self.last[1]);
        self.last = [x, y];
        (delta != (0.0, 0.0)).then_some(delta)
    }
}

/// Vertical wheel delta in CSS pixels, whatever unit the browser reported.
pub(crate) fn wheel_delta_px(event: &WheelEvent, page_height: f32) -> f32 {
    normalize_wheel_delta(event.delta_y() as f32, event.delta_mode(), page_height)
}

pub(crate) fn normalize_wheel_delta(delta: f32, delta_mode: u32, page_height: f32) -> f32 {
    match delta_mode {
        1 => delta * WHEEL_LINE_PX,
        2 => delta * page_height.max(1.0),
        _ => delta,
    }
}

/// Scrolling up (negative delta) zooms in.
pub(crate) fn wheel_zoom_factor(delta_px: f32, rate: f32) -> f32 {
    if !delta_px.is_finite() {
        return 1.0;
    }
    (-delta_px * rate).exp()
}

/// Whether the click landed on a control nested inside the marked element
/// (a caption link, a selection checkbox). The marked element itself may be
/// a link.
pub(crate) fn is_interactive_within(target: &Element, marked: &Element) -> bool {
    match target.closest(INTERACTIVE_SELECTOR).ok().flatten() {
        Some(control) => {
            let node: &Node = control.as_ref();
            control != *marked && marked.contains(Some(node))
        }
        None => false,
    }
}
