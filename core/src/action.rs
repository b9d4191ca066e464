#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewerAction {
    Open(usize),
    Next,
    Prev,
    First,
    Last,
    Close,
    /// Multiplies the current zoom by the given factor.
    Zoom(f32),
    /// Screen-space pan delta in CSS pixels.
    Pan { dx: f32, dy: f32 },
    ResetView,
    /// Rendered size of the image slot at zoom 1.
    Resize { width: f32, height: f32 },
}

impl ViewerAction {
    /// Maps a `KeyboardEvent.key` value to an action, given the configured
    /// keyboard zoom step.
    pub fn from_key(key: &str, zoom_step: f32) -> Option<Self> {
        let step = zoom_step.max(1.0);
        match key {
            "Escape" | "Esc" => Some(ViewerAction::Close),
            "ArrowRight" | "Right" => Some(ViewerAction::Next),
            "ArrowLeft" | "Left" => Some(ViewerAction::Prev),
            "Home" => Some(ViewerAction::First),
            "End" => Some(ViewerAction::Last),
            "+" | "=" => Some(ViewerAction::Zoom(step)),
            "-" | "_" => Some(ViewerAction::Zoom(1.0 / step)),
            "0" => Some(ViewerAction::ResetView),
            _ => None,
        }
    }

    /// Whether the action only makes sense while the viewer is open.
    pub fn requires_open(&self) -> bool {
        !matches!(self, ViewerAction::Open(_) | ViewerAction::Resize { .. })
    }
}
