//! Stackdock - a tab-stack docking station.
//!
//! A [`StackStation`] hosts any number of panels. With one child the panel is
//! shown directly; with two or more a [`TabStrip`] appears and the user picks
//! the visible panel. Panels move between stations through a two-phase
//! placement protocol: a drag controller calls
//! [`prepare_drop`](Container::prepare_drop) or
//! [`prepare_move`](Container::prepare_move) while the pointer moves and
//! commits once with [`drop_prepared`](Container::drop_prepared) or
//! [`move_prepared`](Container::move_prepared).
//!
//! # Quick Start
//!
//! ```
//! use stackdock::prelude::*;
//!
//! let mut tree = DockTree::new(DockConfig::default());
//! let stack = tree.insert_stack(Panel::new("Editors"));
//! let readme = tree.insert_panel(Panel::new("README.md"));
//! let main = tree.insert_panel(Panel::new("main.rs"));
//!
//! tree.with_stack(stack, |station, tree| {
//!     station.set_bounds(tree, LayoutRect::new(0.0, 0.0, 640.0, 480.0));
//!     station.drop_append(tree, readme)?;
//!     station.drop_append(tree, main)?;
//!     assert_eq!(station.mode(), StructuralMode::Stacked);
//!     assert_eq!(station.front_panel(), Some(main));
//!     Ok(())
//! })
//! .unwrap();
//! ```

pub mod config;
pub mod error;
pub mod station;
pub mod tree;

pub use config::{DockConfig, StackStyle};
pub use error::{DockError, DockResult};
pub use station::{
    ActionEvent, ActionHint, ActionOffers, Background, Container, DefaultTabStrip, DisplayerId,
    DisplayerPool, DockAction, DockableDisplayer, ExternalContainer, Gap, HintOrigin,
    HintPosition, ListenerId, Listeners, Mounted, PendingPlacement, PlacementKind,
    PlacementQuery, PlacementResolver, StackLayout, StackProperty, StackStation, StationEvent,
    StationSupport, StructuralMode, TabStrip, TabStripEvent, TitleDecoration, TitleVersion,
    VisibilityChange, VisibilityCoordinator,
};
pub use tree::{AcceptFn, DockTree, Icon, Panel, PanelId, PanelKind};

pub use stackdock_core::geometry::LayoutRect;
pub use stackdock_core::math::Vec2;

/// Everything needed to build and drive stations.
pub mod prelude {
    pub use crate::config::{DockConfig, StackStyle};
    pub use crate::error::{DockError, DockResult};
    pub use crate::station::{
        Container, ExternalContainer, Gap, StackProperty, StackStation, StationEvent,
        StructuralMode, TabStrip,
    };
    pub use crate::tree::{DockTree, Icon, Panel, PanelId, PanelKind};
    pub use stackdock_core::geometry::LayoutRect;
    pub use stackdock_core::math::Vec2;
}
