//! Dock tree arena.
//!
//! Panels, stack stations and host-provided containers all live in one
//! [`DockTree`] and refer to each other through [`PanelId`]s. A station is
//! borrowed out of the tree with [`DockTree::with_stack`] while the rest of
//! the tree stays available to it.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use stackdock_core::alloc::HashMap;
use stackdock_core::geometry::LayoutRect;
use stackdock_core::math::Vec2;

use crate::config::DockConfig;
use crate::error::{DockError, DockResult};
use crate::station::{
    Container, DefaultTabStrip, ExternalContainer, StackProperty, StackStation, TabStrip,
};

/// Stable identity of a panel within a [`DockTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(pub usize);

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// Icon shown next to a panel's title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Icon(pub String);

impl Icon {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Predicate deciding whether a panel may be hosted by a station.
pub type AcceptFn = Box<dyn Fn(PanelId) -> bool>;

/// Host-facing record of a dockable panel.
pub struct Panel {
    title: String,
    icon: Option<Icon>,
    parent: Option<PanelId>,
    accept: Option<AcceptFn>,
    titled: bool,
    title_bindings: usize,
}

impl Panel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: None,
            parent: None,
            accept: None,
            titled: true,
            title_bindings: 0,
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Restrict the stations this panel may be dropped onto.
    pub fn with_accept(mut self, accept: impl Fn(PanelId) -> bool + 'static) -> Self {
        self.accept = Some(Box::new(accept));
        self
    }

    /// The panel never gets a title decoration.
    pub fn without_title(mut self) -> Self {
        self.titled = false;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn parent(&self) -> Option<PanelId> {
        self.parent
    }

    /// Whether this panel agrees to be hosted by `station`.
    pub fn accepts(&self, station: PanelId) -> bool {
        self.accept.as_ref().is_none_or(|accept| accept(station))
    }

    pub fn is_titled(&self) -> bool {
        self.titled
    }

    /// Number of title decorations currently bound to this panel.
    pub fn title_bindings(&self) -> usize {
        self.title_bindings
    }
}

impl fmt::Debug for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("title", &self.title)
            .field("icon", &self.icon)
            .field("parent", &self.parent)
            .field("accept", &self.accept.is_some())
            .field("titled", &self.titled)
            .field("title_bindings", &self.title_bindings)
            .finish()
    }
}

/// What a panel is, as far as recursive placement is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    /// Plain content.
    Leaf,
    /// A nested stack station.
    Stack,
    /// A container implemented by the host.
    External,
}

struct PanelNode {
    panel: Panel,
    kind: PanelKind,
}

#[derive(Debug, Default)]
struct FocusState {
    focused: Option<PanelId>,
    held: bool,
}

/// Owner of every panel and station.
pub struct DockTree {
    config: DockConfig,
    panels: HashMap<PanelId, PanelNode>,
    stacks: HashMap<PanelId, Box<StackStation>>,
    externals: HashMap<PanelId, Box<dyn ExternalContainer>>,
    next_id: usize,
    focus: FocusState,
}

impl DockTree {
    pub fn new(config: DockConfig) -> Self {
        Self {
            config,
            panels: HashMap::new(),
            stacks: HashMap::new(),
            externals: HashMap::new(),
            next_id: 0,
            focus: FocusState::default(),
        }
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    fn allocate(&mut self, panel: Panel, kind: PanelKind) -> PanelId {
        let id = PanelId(self.next_id);
        self.next_id += 1;
        self.panels.insert(id, PanelNode { panel, kind });
        id
    }

    /// Add a leaf panel.
    pub fn insert_panel(&mut self, panel: Panel) -> PanelId {
        self.allocate(panel, PanelKind::Leaf)
    }

    /// Add a stack station using the default tab strip.
    pub fn insert_stack(&mut self, panel: Panel) -> PanelId {
        let strip = DefaultTabStrip::new(self.config.stack.clone());
        self.insert_stack_with(panel, Box::new(strip))
    }

    /// Add a stack station using a custom tab strip.
    pub fn insert_stack_with(&mut self, panel: Panel, strip: Box<dyn TabStrip>) -> PanelId {
        let id = self.allocate(panel, PanelKind::Stack);
        let station = StackStation::new(id, &self.config, strip);
        self.stacks.insert(id, Box::new(station));
        tracing::debug!("Created stack station {}", id);
        id
    }

    /// Add a container implemented by the host.
    pub fn insert_external(
        &mut self,
        panel: Panel,
        container: Box<dyn ExternalContainer>,
    ) -> PanelId {
        let id = self.allocate(panel, PanelKind::External);
        self.externals.insert(id, container);
        id
    }

    /// Remove a panel that is no longer docked anywhere.
    pub fn remove_panel(&mut self, id: PanelId) -> DockResult<Panel> {
        let node = self.panels.get(&id).ok_or(DockError::PanelNotFound(id))?;
        if node.panel.parent.is_some() {
            return Err(DockError::PanelDocked(id));
        }
        match node.kind {
            PanelKind::Leaf => {}
            PanelKind::Stack => {
                let station = self.stacks.get(&id).ok_or(DockError::StationBusy(id))?;
                if station.count() > 0 {
                    return Err(DockError::StationNotEmpty(id));
                }
                self.stacks.remove(&id);
            }
            PanelKind::External => {
                if self.panels.values().any(|n| n.panel.parent == Some(id)) {
                    return Err(DockError::StationNotEmpty(id));
                }
                self.externals.remove(&id);
            }
        }
        if self.focus.focused == Some(id) {
            self.focus.focused = None;
        }
        let node = self.panels.remove(&id).ok_or(DockError::PanelNotFound(id))?;
        Ok(node.panel)
    }

    pub fn contains(&self, id: PanelId) -> bool {
        self.panels.contains_key(&id)
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(&id).map(|n| &n.panel)
    }

    pub fn parent_of(&self, id: PanelId) -> Option<PanelId> {
        self.panels.get(&id).and_then(|n| n.panel.parent)
    }

    pub fn kind_of(&self, id: PanelId) -> Option<PanelKind> {
        self.panels.get(&id).map(|n| n.kind)
    }

    /// Read access to a station. `None` while it is borrowed by [`with_stack`](Self::with_stack).
    pub fn stack(&self, id: PanelId) -> Option<&StackStation> {
        self.stacks.get(&id).map(|s| s.as_ref())
    }

    pub fn stack_mut(&mut self, id: PanelId) -> Option<&mut StackStation> {
        self.stacks.get_mut(&id).map(|s| s.as_mut())
    }

    /// Run `f` with exclusive access to one station and the rest of the tree.
    ///
    /// The station is back in the tree when this returns, also when `f` panics.
    pub fn with_stack<R>(
        &mut self,
        id: PanelId,
        f: impl FnOnce(&mut StackStation, &mut DockTree) -> DockResult<R>,
    ) -> DockResult<R> {
        match self.kind_of(id) {
            None => return Err(DockError::PanelNotFound(id)),
            Some(PanelKind::Stack) => {}
            Some(_) => return Err(DockError::NotAStack(id)),
        }
        let mut station = self.stacks.remove(&id).ok_or(DockError::StationBusy(id))?;
        let result = panic::catch_unwind(AssertUnwindSafe(|| f(&mut station, self)));
        self.stacks.insert(id, station);
        result.unwrap_or_else(|payload| panic::resume_unwind(payload))
    }

    /// Change a panel's title and keep its tab label in sync.
    pub fn set_title(&mut self, id: PanelId, title: impl Into<String>) -> DockResult<()> {
        let node = self.panels.get_mut(&id).ok_or(DockError::PanelNotFound(id))?;
        node.panel.title = title.into();
        let parent = node.panel.parent;
        let title = node.panel.title.clone();
        if let Some(parent) = parent {
            if let Some(station) = self.stacks.get_mut(&parent) {
                station.title_changed(id, &title);
            } else if self.kind_of(parent) == Some(PanelKind::Stack) {
                tracing::warn!("Title of {} changed while {} is busy", id, parent);
            }
        }
        Ok(())
    }

    /// Change a panel's icon and keep its tab in sync.
    pub fn set_icon(&mut self, id: PanelId, icon: Option<Icon>) -> DockResult<()> {
        let node = self.panels.get_mut(&id).ok_or(DockError::PanelNotFound(id))?;
        node.panel.icon = icon.clone();
        let parent = node.panel.parent;
        if let Some(parent) = parent {
            if let Some(station) = self.stacks.get_mut(&parent) {
                station.icon_changed(id, icon.as_ref());
            } else if self.kind_of(parent) == Some(PanelKind::Stack) {
                tracing::warn!("Icon of {} changed while {} is busy", id, parent);
            }
        }
        Ok(())
    }

    /// Whether `container` claims the override zone at `point` for a drag of
    /// `candidate` over `invoker`.
    ///
    /// Stacks pass the question to their own parent; a container without a
    /// parent never claims the zone.
    pub fn is_in_override_zone(
        &self,
        container: PanelId,
        point: Vec2,
        invoker: PanelId,
        candidate: PanelId,
    ) -> bool {
        match self.kind_of(container) {
            Some(PanelKind::Stack) => match self.parent_of(container) {
                Some(parent) => self.is_in_override_zone(parent, point, invoker, candidate),
                None => false,
            },
            Some(PanelKind::External) => self
                .externals
                .get(&container)
                .is_some_and(|external| external.is_in_override_zone(point, invoker, candidate)),
            Some(PanelKind::Leaf) | None => false,
        }
    }

    /// Dock `child` on a host container.
    pub fn attach_to_external(&mut self, child: PanelId, external: PanelId) -> DockResult<()> {
        match self.kind_of(external) {
            Some(PanelKind::External) => {}
            Some(_) => return Err(DockError::InvalidParent { panel: child, parent: external }),
            None => return Err(DockError::PanelNotFound(external)),
        }
        if let Some(parent) = self.parent_of(child) {
            return Err(DockError::InvalidParent { panel: child, parent });
        }
        if child == external || self.is_ancestor(child, external) {
            return Err(DockError::InvalidParent { panel: child, parent: external });
        }
        self.set_parent(child, Some(external))?;
        let visible = self
            .externals
            .get(&external)
            .is_some_and(|e| e.is_child_visible(child));
        self.notify_child_shown(child, visible);
        Ok(())
    }

    /// Undock `child` from its host container.
    pub fn detach_from_external(&mut self, child: PanelId) -> DockResult<()> {
        match self.parent_of(child) {
            Some(parent) if self.kind_of(parent) == Some(PanelKind::External) => {
                self.set_parent(child, None)
            }
            Some(parent) => Err(DockError::InvalidParent { panel: child, parent }),
            None => Err(DockError::PanelNotFound(child)),
        }
    }

    /// Tell a stack whether its host container currently shows it.
    pub fn set_shown_by_parent(&mut self, child: PanelId, visible: bool) -> DockResult<()> {
        self.with_stack(child, |station, tree| {
            station.set_shown_by_parent(tree, visible);
            Ok(())
        })
    }

    /// Tell a root stack whether it is part of a displayed window.
    pub fn set_displayable(&mut self, stack: PanelId, displayable: bool) -> DockResult<()> {
        self.with_stack(stack, |station, tree| {
            station.set_displayable(tree, displayable);
            Ok(())
        })
    }

    pub fn focused(&self) -> Option<PanelId> {
        self.focus.focused
    }

    /// Move focus to `panel` unless focus is held elsewhere.
    pub fn request_focus(&mut self, panel: PanelId) -> bool {
        if self.focus.held {
            tracing::warn!("Focus request for {} ignored, focus is held", panel);
            return false;
        }
        if !self.contains(panel) {
            return false;
        }
        self.focus.focused = Some(panel);
        true
    }

    /// Block or allow focus transfers.
    pub fn hold_focus(&mut self, held: bool) {
        self.focus.held = held;
    }

    /// Location hint restoring `panel` at its place in the surrounding stacks.
    pub fn location_of(&self, panel: PanelId) -> Option<StackProperty> {
        let parent = self.parent_of(panel)?;
        let index = self.stack(parent)?.index_of(panel)?;
        let mut property = StackProperty::new(index);
        let mut current = parent;
        while let Some(outer) = self.parent_of(current) {
            let Some(index) = self.stack(outer).and_then(|s| s.index_of(current)) else {
                break;
            };
            property = StackProperty::new(index).with_successor(property);
            current = outer;
        }
        Some(property)
    }

    /// Whether `ancestor` appears in the parent chain of `id`.
    pub(crate) fn is_ancestor(&self, ancestor: PanelId, id: PanelId) -> bool {
        let mut current = self.parent_of(id);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent_of(parent);
        }
        false
    }

    pub(crate) fn set_parent(&mut self, child: PanelId, parent: Option<PanelId>) -> DockResult<()> {
        let node = self.panels.get_mut(&child).ok_or(DockError::PanelNotFound(child))?;
        node.panel.parent = parent;
        if node.kind == PanelKind::Stack {
            match self.stacks.remove(&child) {
                Some(mut station) => {
                    station.parent_changed(self);
                    self.stacks.insert(child, station);
                }
                None => tracing::warn!("Parent of busy station {} changed", child),
            }
        }
        Ok(())
    }

    pub(crate) fn notify_child_shown(&mut self, child: PanelId, visible: bool) {
        if self.kind_of(child) != Some(PanelKind::Stack) {
            return;
        }
        match self.stacks.remove(&child) {
            Some(mut station) => {
                station.set_shown_by_parent(self, visible);
                self.stacks.insert(child, station);
            }
            None => tracing::warn!("Visibility of busy station {} not updated", child),
        }
    }

    pub(crate) fn layout_nested(&mut self, child: PanelId, bounds: LayoutRect) {
        if self.kind_of(child) != Some(PanelKind::Stack) {
            return;
        }
        match self.stacks.remove(&child) {
            Some(mut station) => {
                station.set_bounds(self, bounds);
                self.stacks.insert(child, station);
            }
            None => tracing::warn!("Bounds of busy station {} not updated", child),
        }
    }

    pub(crate) fn bind_title(&mut self, panel: PanelId) {
        if let Some(node) = self.panels.get_mut(&panel) {
            node.panel.title_bindings += 1;
        }
    }

    pub(crate) fn unbind_title(&mut self, panel: PanelId) {
        if let Some(node) = self.panels.get_mut(&panel) {
            node.panel.title_bindings = node.panel.title_bindings.saturating_sub(1);
        }
    }
}

impl fmt::Debug for DockTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DockTree")
            .field("panels", &self.panels.len())
            .field("stacks", &self.stacks.len())
            .field("externals", &self.externals.len())
            .field("focused", &self.focus.focused)
            .finish()
    }
}
