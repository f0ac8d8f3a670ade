//! Geometry consumed by renderers while a drag hovers a station.

use stackdock_core::geometry::LayoutRect;

use super::StackStation;
use crate::station::{Container, StructuralMode};

impl StackStation {
    /// Line marking the pending gap, in layout coordinates.
    ///
    /// Only present while drawing is on, a placement is pending and the
    /// station shows its tab strip.
    pub fn insertion_indicator(&self) -> Option<LayoutRect> {
        if !self.draw_indicator || self.mode() != StructuralMode::Stacked {
            return None;
        }
        let gap = self.pending?.gap;
        let tab = self.strip.tab_bounds(gap.base)?;
        let width = self.style.insertion_line_width;
        let edge = if gap.after { tab.right() } else { tab.x };
        let line = LayoutRect::new(edge - width / 2.0, tab.y, width, tab.height);
        Some(line.translate(self.strip.bounds().position()))
    }

    /// Area to highlight as the drop target.
    pub fn insertion_area(&self) -> LayoutRect {
        if self.count() < 2 {
            return self.bounds;
        }
        self.front_panel()
            .and_then(|front| self.displayer_of(front))
            .map_or(self.bounds, |displayer| displayer.bounds())
    }
}
