use web_sys::Element;

use magniview_core::MagnifiableItem;

use crate::overlay::OverlayHandles;
use crate::scanner::Scan;

/// Overlay handles plus the item list of the current initialization pass.
/// Replaced as a whole on every initialization.
pub(crate) struct ViewerCache {
    items: Vec<MagnifiableItem>,
    targets: Vec<Element>,
    overlay: OverlayHandles,
}

impl ViewerCache {
    pub(crate) fn new(scan: Scan, overlay: OverlayHandles) -> Self {
        Self {
            items: scan.items,
            targets: scan.targets,
            overlay,
        }
    }

    pub(crate) fn item(&self, index: usize) -> Option<&MagnifiableItem> {
        self.items.get(index)
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn overlay(&self) -> &OverlayHandles {
        &self.overlay
    }

    /// Ordinal of the marked element, if it was part of this scan.
    pub(crate) fn index_of(&self, target: &Element) -> Option<usize> {
        self.targets.iter().position(|candidate| candidate == target)
    }
}
