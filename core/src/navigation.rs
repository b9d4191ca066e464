use std::fmt;

use crate::action::ViewerAction;

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 4.0;

/// Rendered size of the image slot at zoom 1, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameSize {
    pub width: f32,
    pub height: f32,
}

impl FrameSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
        }
    }

    pub fn is_known(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

fn sanitize_extent(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewerState {
    Closed,
    Open {
        index: usize,
        zoom: f32,
        pan: (f32, f32),
    },
}

impl ViewerState {
    fn opened_at(index: usize) -> Self {
        ViewerState::Open {
            index,
            zoom: MIN_ZOOM,
            pan: (0.0, 0.0),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ViewerState::Open { .. })
    }

    pub fn open_index(&self) -> Option<usize> {
        match self {
            ViewerState::Open { index, .. } => Some(*index),
            ViewerState::Closed => None,
        }
    }

    pub fn zoom(&self) -> f32 {
        match self {
            ViewerState::Open { zoom, .. } => *zoom,
            ViewerState::Closed => MIN_ZOOM,
        }
    }

    pub fn pan(&self) -> (f32, f32) {
        match self {
            ViewerState::Open { pan, .. } => *pan,
            ViewerState::Closed => (0.0, 0.0),
        }
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoom() > MIN_ZOOM
    }

    /// CSS transform for the image slot; origin is expected at the center.
    pub fn transform_css(&self) -> String {
        let (x, y) = self.pan();
        format!("translate({x:.2}px, {y:.2}px) scale({:.4})", self.zoom())
    }
}

/// Largest pan offset per axis that still keeps the zoomed image covering the
/// whole frame.
pub fn pan_bound(zoom: f32, frame: FrameSize) -> (f32, f32) {
    let excess = (zoom - MIN_ZOOM).max(0.0);
    (excess * frame.width * 0.5, excess * frame.height * 0.5)
}

pub fn clamp_pan(pan: (f32, f32), zoom: f32, frame: FrameSize) -> (f32, f32) {
    let (bound_x, bound_y) = pan_bound(zoom, frame);
    (pan.0.clamp(-bound_x, bound_x), pan.1.clamp(-bound_y, bound_y))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    OutOfRange { index: usize, len: usize },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::OutOfRange { index, len } => {
                write!(f, "image index {index} out of range for {len} items")
            }
        }
    }
}

impl std::error::Error for NavigationError {}

/// Which image is magnified and how.
///
/// `len` mirrors the length of the item list currently held by the viewer
/// cache, so `Open { index }` always satisfies `index < len`.
#[derive(Clone, Debug)]
pub struct NavigationState {
    state: ViewerState,
    len: usize,
    max_zoom: f32,
    frame: FrameSize,
}

impl NavigationState {
    pub fn new(max_zoom: f32) -> Self {
        let max_zoom = if max_zoom.is_finite() {
            max_zoom.max(MIN_ZOOM)
        } else {
            MAX_ZOOM
        };
        Self {
            state: ViewerState::Closed,
            len: 0,
            max_zoom,
            frame: FrameSize::default(),
        }
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    pub fn frame(&self) -> FrameSize {
        self.frame
    }

    /// Forces the viewer closed and adopts a new item count. Returns whether
    /// the viewer was open before.
    pub fn reinitialize(&mut self, len: usize) -> bool {
        let was_open = self.state.is_open();
        self.state = ViewerState::Closed;
        self.len = len;
        was_open
    }

    /// Applies one transition. `Ok(true)` means the visible state changed and
    /// must be rendered; `Ok(false)` is a silent no-op.
    pub fn apply(&mut self, action: ViewerAction) -> Result<bool, NavigationError> {
        if action.requires_open() && !self.state.is_open() {
            return Ok(false);
        }
        let changed = match action {
            ViewerAction::Open(index) => self.open(index)?,
            ViewerAction::Next => self.step(1),
            ViewerAction::Prev => self.step(-1),
            ViewerAction::First => self.go_to(0),
            ViewerAction::Last => self.go_to(self.len.saturating_sub(1)),
            ViewerAction::Close => self.close(),
            ViewerAction::Zoom(factor) => self.zoom_by(factor),
            ViewerAction::Pan { dx, dy } => self.pan_by(dx, dy),
            ViewerAction::ResetView => self.reset_view(),
            ViewerAction::Resize { width, height } => self.resize(FrameSize::new(width, height)),
        };
        Ok(changed)
    }

    fn open(&mut self, index: usize) -> Result<bool, NavigationError> {
        if index >= self.len {
            return Err(NavigationError::OutOfRange {
                index,
                len: self.len,
            });
        }
        let next = ViewerState::opened_at(index);
        let changed = self.state != next;
        self.state = next;
        Ok(changed)
    }

    fn step(&mut self, offset: isize) -> bool {
        let Some(index) = self.state.open_index() else {
            return false;
        };
        if self.len == 0 {
            return false;
        }
        let len = self.len as isize;
        let target = (index as isize + offset).rem_euclid(len) as usize;
        self.go_to(target)
    }

    fn go_to(&mut self, index: usize) -> bool {
        if !self.state.is_open() || index >= self.len {
            return false;
        }
        let next = ViewerState::opened_at(index);
        let changed = self.state != next;
        self.state = next;
        changed
    }

    fn close(&mut self) -> bool {
        let was_open = self.state.is_open();
        self.state = ViewerState::Closed;
        was_open
    }

    fn zoom_by(&mut self, factor: f32) -> bool {
        let ViewerState::Open { index, zoom, pan } = self.state else {
            return false;
        };
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let next_zoom = (zoom * factor).clamp(MIN_ZOOM, self.max_zoom);
        let next_pan = clamp_pan(pan, next_zoom, self.frame);
        let next = ViewerState::Open {
            index,
            zoom: next_zoom,
            pan: next_pan,
        };
        let changed = self.state != next;
        self.state = next;
        changed
    }

    fn pan_by(&mut self, dx: f32, dy: f32) -> bool {
        let ViewerState::Open { index, zoom, pan } = self.state else {
            return false;
        };
        if zoom <= MIN_ZOOM || !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        let next_pan = clamp_pan((pan.0 + dx, pan.1 + dy), zoom, self.frame);
        let next = ViewerState::Open {
            index,
            zoom,
            pan: next_pan,
        };
        let changed = self.state != next;
        self.state = next;
        changed
    }

    fn reset_view(&mut self) -> bool {
        let Some(index) = self.state.open_index() else {
            return false;
        };
        let next = ViewerState::opened_at(index);
        let changed = self.state != next;
        self.state = next;
        changed
    }

    fn resize(&mut self, frame: FrameSize) -> bool {
        self.frame = frame;
        let ViewerState::Open { index, zoom, pan } = self.state else {
            return false;
        };
        let next_pan = clamp_pan(pan, zoom, frame);
        let changed = next_pan != pan;
        self.state = ViewerState::Open {
            index,
            zoom,
            pan: next_pan,
        };
        changed
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(MAX_ZOOM)
    }
}
