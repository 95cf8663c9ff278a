//! Pane visibility: exactly one pane shown, exactly one selector active.

use crate::playground::buffers::Pane;
use crate::playground::schedule::{FrameQueue, FrameTask};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabController {
    current: Pane,
    /// Container visibility per pane, indexed like `Pane::ALL`.
    shown: [bool; 3],
    /// Selector "active" marks per pane.
    active: [bool; 3],
}

impl Default for TabController {
    fn default() -> Self {
        Self::new()
    }
}

impl TabController {
    /// Starts on the HTML pane, matching the initial view.
    pub fn new() -> Self {
        Self {
            current: Pane::Html,
            shown: [true, false, false],
            active: [true, false, false],
        }
    }

    pub fn current(&self) -> Pane {
        self.current
    }

    pub fn is_shown(&self, pane: Pane) -> bool {
        self.shown[pane.index()]
    }

    pub fn is_active(&self, pane: Pane) -> bool {
        self.active[pane.index()]
    }

    /// Shows `pane`, hides the others and schedules the newly shown buffer
    /// for resize + focus once the visibility change has been drawn. A
    /// buffer laid out while still collapsed measures the wrong geometry.
    pub fn select(&mut self, pane: Pane, frames: &mut FrameQueue) {
        self.current = pane;
        for candidate in Pane::ALL {
            self.shown[candidate.index()] = candidate == pane;
            self.active[candidate.index()] = candidate == pane;
        }
        frames.request(FrameTask::ResizeAndFocus(pane));
    }
}
