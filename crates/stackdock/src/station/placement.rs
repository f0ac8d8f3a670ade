//! Where a dragged panel lands in a stack.

use stackdock_core::geometry::LayoutRect;
use stackdock_core::math::Vec2;
use stackdock_core::profiling::profile_function;

use crate::station::TabStrip;
use crate::tree::PanelId;

/// Candidate insertion point: before or after the tab at `base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub base: usize,
    pub after: bool,
}

impl Gap {
    pub const fn new(base: usize, after: bool) -> Self {
        Self { base, after }
    }

    /// Child index a panel inserted at this gap ends up at.
    pub fn target_index(&self) -> usize {
        self.base + usize::from(self.after)
    }
}

/// The gesture a placement was prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementKind {
    Drop,
    Move,
}

/// Placement cached between prepare and commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPlacement {
    pub panel: PanelId,
    pub gap: Gap,
    pub kind: PlacementKind,
}

/// Inputs for [`PlacementResolver::resolve`].
#[derive(Debug, Clone, Copy)]
pub struct PlacementQuery {
    pub kind: PlacementKind,
    /// Children currently in the station.
    pub count: usize,
    /// Pointer position in layout coordinates.
    pub point: Vec2,
    /// Whether the station's parent claims `point`.
    pub parent_override: bool,
    /// Title bounds of the lone child, if it has a title.
    pub lone_title: Option<LayoutRect>,
}

/// Hit-testing of pointer positions against a tab strip.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementResolver;

impl PlacementResolver {
    /// The tab under `point`, split at its horizontal midpoint.
    pub fn exact_tab_index_at(strip: &dyn TabStrip, point: Vec2) -> Option<Gap> {
        let local = point - strip.bounds().position();
        (0..strip.tab_count()).find_map(|index| {
            let bounds = strip.tab_bounds(index)?;
            bounds
                .contains(local)
                .then(|| Gap::new(index, local.x > bounds.center_x()))
        })
    }

    /// Gap for `point`, falling back to the end of the strip.
    pub fn tab_index_at(strip: &dyn TabStrip, count: usize, point: Vec2) -> Gap {
        match count {
            0 => Gap::new(0, false),
            1 => Gap::new(1, false),
            _ => Self::exact_tab_index_at(strip, point).unwrap_or(Gap::new(count - 1, true)),
        }
    }

    /// Resolve the gap for a drag, or `None` if the station must decline.
    ///
    /// When the parent claims the point, only an exact tab hit is accepted,
    /// except that a drop may still land on the title of a lone child.
    pub fn resolve(strip: &dyn TabStrip, query: &PlacementQuery) -> Option<Gap> {
        profile_function!();

        let gap = if query.parent_override {
            if query.count > 1 {
                Self::exact_tab_index_at(strip, query.point)
            } else if query.count == 1 && query.kind == PlacementKind::Drop {
                query
                    .lone_title
                    .filter(|title| title.contains(query.point))
                    .map(|_| Gap::new(0, true))
            } else {
                None
            }
        } else {
            Some(Self::tab_index_at(strip, query.count, query.point))
        };

        tracing::trace!("Resolved {:?} at {:?} to {:?}", query.kind, query.point, gap);
        gap
    }
}
