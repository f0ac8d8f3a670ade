//! Stack station and the collaborators it is built from.
//!
//! [`StackStation`] owns an ordered list of [`DockableDisplayer`]s and keeps a
//! [`TabStrip`] in sync with it. Placement during a drag is computed by
//! [`PlacementResolver`], visibility by [`VisibilityCoordinator`], and layouts
//! are persisted through [`StackLayout`].

mod actions;
mod displayer;
mod layout;
mod placement;
mod stack;
mod support;
mod tab_strip;
mod visibility;

pub use actions::{ActionEvent, ActionHint, ActionOffers, DockAction, HintOrigin, HintPosition};
pub use displayer::{DisplayerId, DisplayerPool, DockableDisplayer, TitleDecoration, TitleVersion};
pub use layout::{StackLayout, StackProperty};
pub use placement::{Gap, PendingPlacement, PlacementKind, PlacementQuery, PlacementResolver};
pub use stack::{Background, Mounted, StackStation};
pub use support::{ListenerId, Listeners, StationEvent, StationSupport};
pub use tab_strip::{DefaultTabStrip, TabStrip, TabStripEvent};
pub use visibility::{VisibilityChange, VisibilityCoordinator};

use stackdock_core::math::Vec2;

use crate::error::DockResult;
use crate::tree::{DockTree, PanelId};

/// Visual configuration of a station, derived from its child count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralMode {
    /// No children.
    Empty,
    /// One child shown directly, no tab strip.
    Single,
    /// Two or more children behind a tab strip.
    Stacked,
}

impl StructuralMode {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Self::Empty,
            1 => Self::Single,
            _ => Self::Stacked,
        }
    }
}

/// Child-list and placement protocol of a docking container.
///
/// Mutating operations take the [`DockTree`] so the container can update the
/// parent links, title bindings and nested stations of its children.
pub trait Container {
    /// Identity of the container itself.
    fn id(&self) -> PanelId;

    fn count(&self) -> usize;

    /// Child at `index`; [`IndexOutOfRange`](crate::DockError::IndexOutOfRange) otherwise.
    fn panel_at(&self, index: usize) -> DockResult<PanelId>;

    fn index_of(&self, panel: PanelId) -> Option<usize>;

    /// The child currently visible, if any.
    fn front_panel(&self) -> Option<PanelId>;

    /// Make `panel` the visible child. No effect with fewer than two
    /// children or when `panel` is not a child.
    fn set_front(&mut self, tree: &mut DockTree, panel: PanelId);

    /// Insert `panel` at `index`, clamped to `[0, count]`.
    fn add(&mut self, tree: &mut DockTree, panel: PanelId, index: usize) -> DockResult<()>;

    /// Remove the child at `index` and return it.
    fn remove(&mut self, tree: &mut DockTree, index: usize) -> DockResult<PanelId>;

    /// Put `next` where `old` is.
    fn replace(&mut self, tree: &mut DockTree, old: PanelId, next: PanelId) -> DockResult<()>;

    /// Compute and cache where a drop of `panel` at `point` would land.
    ///
    /// Declines when the accept predicates of the container or of `panel`
    /// reject the pair, so callers need not check them before preparing.
    /// Placement itself never declines outside a parent's override zone.
    fn prepare_drop(&mut self, tree: &DockTree, point: Vec2, panel: PanelId) -> bool;

    /// Commit the placement cached by [`prepare_drop`](Self::prepare_drop).
    fn drop_prepared(&mut self, tree: &mut DockTree) -> DockResult<()>;

    /// Append `panel` unconditionally.
    fn drop_append(&mut self, tree: &mut DockTree, panel: PanelId) -> DockResult<()>;

    /// Place `panel` following a persisted location hint.
    ///
    /// Returns `Ok(false)` when an accept predicate rejects the panel.
    fn drop_with_hint(
        &mut self,
        tree: &mut DockTree,
        panel: PanelId,
        hint: &StackProperty,
    ) -> DockResult<bool>;

    /// Like [`prepare_drop`](Self::prepare_drop) for a panel that is already a child.
    fn prepare_move(&mut self, tree: &DockTree, point: Vec2, panel: PanelId) -> bool;

    /// Commit the placement cached by [`prepare_move`](Self::prepare_move).
    fn move_prepared(&mut self, tree: &mut DockTree) -> DockResult<()>;

    /// Show the insertion indicator.
    fn draw(&mut self);

    /// Hide the insertion indicator and drop any cached placement.
    fn forget(&mut self);

    /// Whether this container claims `point` for a drag over `invoker`.
    fn is_in_override_zone(
        &self,
        tree: &DockTree,
        point: Vec2,
        invoker: PanelId,
        candidate: PanelId,
    ) -> bool;
}

/// A parent container implemented by the host application.
pub trait ExternalContainer {
    /// Whether a drag of `candidate` over the child `invoker` at `point`
    /// belongs to this container rather than the child.
    fn is_in_override_zone(&self, point: Vec2, invoker: PanelId, candidate: PanelId) -> bool;

    /// Whether `child` is currently shown.
    fn is_child_visible(&self, _child: PanelId) -> bool {
        true
    }
}
