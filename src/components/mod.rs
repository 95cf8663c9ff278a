use ratatui::layout::Rect;

use crate::playground::buffers::Pane;
use crate::playground::listeners::ElementId;

pub mod editor;
pub mod header;
pub mod output;
pub mod preview;
pub mod sidebar;
pub mod status;

/// A rendered, clickable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    pub area: Rect,
    pub element: ElementId,
    /// Set for pane selectors on the tab strip.
    pub pane: Option<Pane>,
}

impl HitRegion {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x + self.area.width
            && row >= self.area.y
            && row < self.area.y + self.area.height
    }
}
