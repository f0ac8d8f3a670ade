//! The stack station: children shown one at a time behind a tab strip.

mod codec;
mod indicator;

use std::fmt;

use stackdock_core::geometry::LayoutRect;
use stackdock_core::math::Vec2;
use stackdock_core::profiling::profile_function;

use crate::config::{DockConfig, StackStyle};
use crate::error::{DockError, DockResult};
use crate::station::{
    ActionOffers, Container, DisplayerId, DisplayerPool, DockableDisplayer, ListenerId,
    PendingPlacement, PlacementKind, PlacementQuery, PlacementResolver, StackProperty,
    StationEvent, StationSupport, StructuralMode, TabStrip, TabStripEvent, TitleDecoration,
    TitleVersion, VisibilityCoordinator,
};
use crate::tree::{AcceptFn, DockTree, Icon, PanelId, PanelKind};

/// What the station currently shows as its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mounted {
    #[default]
    Nothing,
    /// The lone child's displayer.
    Displayer(DisplayerId),
    /// The tab strip with the displayers behind it.
    TabStrip,
}

/// Content slot of a station, counting tab strip attachments.
#[derive(Debug, Clone, Default)]
pub struct Background {
    mounted: Mounted,
    strip_attached: usize,
    strip_detached: usize,
}

impl Background {
    pub fn mounted(&self) -> Mounted {
        self.mounted
    }

    /// How often the tab strip was mounted.
    pub fn strip_attachments(&self) -> usize {
        self.strip_attached
    }

    /// How often the tab strip was unmounted.
    pub fn strip_detachments(&self) -> usize {
        self.strip_detached
    }

    fn mount_displayer(&mut self, id: DisplayerId) {
        self.clear();
        self.mounted = Mounted::Displayer(id);
    }

    fn mount_strip(&mut self) {
        self.clear();
        self.mounted = Mounted::TabStrip;
        self.strip_attached += 1;
    }

    fn clear(&mut self) {
        if self.mounted == Mounted::TabStrip {
            self.strip_detached += 1;
        }
        self.mounted = Mounted::Nothing;
    }
}

/// A station showing one child at a time.
///
/// With a single child the child's displayer fills the station. From two
/// children on, a [`TabStrip`] along the top selects the visible one.
pub struct StackStation {
    support: StationSupport,
    style: StackStyle,
    focus_on_selection: bool,
    children: Vec<DockableDisplayer>,
    strip: Box<dyn TabStrip>,
    pool: DisplayerPool,
    visibility: VisibilityCoordinator,
    actions: ActionOffers,
    background: Background,
    title_version: Option<TitleVersion>,
    accept: Option<AcceptFn>,
    pending: Option<PendingPlacement>,
    draw_indicator: bool,
    last_front: Option<PanelId>,
    bounds: LayoutRect,
}

impl StackStation {
    pub fn new(id: PanelId, config: &DockConfig, strip: Box<dyn TabStrip>) -> Self {
        Self {
            support: StationSupport::new(id),
            style: config.stack.clone(),
            focus_on_selection: config.focus_on_selection,
            children: Vec::new(),
            strip,
            pool: DisplayerPool::new(),
            visibility: VisibilityCoordinator::new(),
            actions: ActionOffers::new(),
            background: Background::default(),
            title_version: Some(TitleVersion::new(config.title_id.clone())),
            accept: None,
            pending: None,
            draw_indicator: false,
            last_front: None,
            bounds: LayoutRect::ZERO,
        }
    }

    pub fn mode(&self) -> StructuralMode {
        StructuralMode::from_count(self.children.len())
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn style(&self) -> &StackStyle {
        &self.style
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&StationEvent) + 'static) -> ListenerId {
        self.support.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.support.unsubscribe(id)
    }

    pub fn tab_strip(&self) -> &dyn TabStrip {
        self.strip.as_ref()
    }

    /// Replace the tab strip, moving existing tabs onto the new one.
    pub fn set_tab_strip(&mut self, tree: &mut DockTree, strip: Box<dyn TabStrip>) {
        if self.children.len() < 2 {
            self.strip = strip;
            return;
        }

        let selected = self.strip.selected_index();
        self.strip.remove_all();
        self.strip.drain_events();
        self.background.clear();

        self.strip = strip;
        for displayer in &self.children {
            let (label, icon) = label_of(tree, displayer.panel());
            self.strip.add_tab(&label, icon.as_ref(), displayer.id());
        }
        self.background.mount_strip();
        if let Some(selected) = selected.filter(|&s| s < self.strip.tab_count()) {
            self.strip.set_selected_index(selected);
        }
        self.layout(tree);
        self.finish_mutation(tree);
    }

    pub fn displayers(&self) -> &[DockableDisplayer] {
        &self.children
    }

    pub fn displayer_of(&self, panel: PanelId) -> Option<&DockableDisplayer> {
        self.children.iter().find(|d| d.panel() == panel)
    }

    /// Selected tab; only meaningful with two or more children.
    pub fn selected_index(&self) -> Option<usize> {
        if self.children.len() < 2 {
            return None;
        }
        self.strip
            .selected_index()
            .filter(|&index| index < self.children.len())
    }

    /// Select the tab at `index`, as a click on the strip would.
    pub fn select_tab(&mut self, tree: &mut DockTree, index: usize) -> DockResult<()> {
        let count = self.children.len();
        if index >= count {
            return Err(DockError::IndexOutOfRange { index, count });
        }
        if count >= 2 {
            self.strip.set_selected_index(index);
        }
        self.finish_mutation(tree);
        Ok(())
    }

    /// Placement cached by the last successful prepare.
    pub fn pending(&self) -> Option<PendingPlacement> {
        self.pending
    }

    pub fn is_drawing(&self) -> bool {
        self.draw_indicator
    }

    pub fn title_version(&self) -> Option<&TitleVersion> {
        self.title_version.as_ref()
    }

    /// Rebind the titles of all children to `version`.
    pub fn set_title_version(&mut self, tree: &mut DockTree, version: Option<TitleVersion>) {
        for index in 0..self.children.len() {
            let panel = self.children[index].panel();
            if self.children[index].set_title(None).is_some() {
                tree.unbind_title(panel);
            }
        }
        self.title_version = version;
        for index in 0..self.children.len() {
            let panel = self.children[index].panel();
            let title = self.make_title(tree, panel);
            self.children[index].set_title(title);
        }
        self.layout(tree);
    }

    pub fn title_of(&self, panel: PanelId) -> Option<&TitleDecoration> {
        self.displayer_of(panel).and_then(DockableDisplayer::title)
    }

    pub fn title_changed(&mut self, panel: PanelId, title: &str) {
        if self.children.len() > 1
            && let Some(index) = self.index_of(panel)
        {
            self.strip.set_title_at(index, title);
        }
    }

    pub fn icon_changed(&mut self, panel: PanelId, icon: Option<&Icon>) {
        if self.children.len() > 1
            && let Some(index) = self.index_of(panel)
        {
            self.strip.set_icon_at(index, icon);
        }
    }

    /// Location hint that puts `panel` back where it is now.
    pub fn property_of(&self, panel: PanelId) -> Option<StackProperty> {
        self.index_of(panel).map(StackProperty::new)
    }

    /// Remove `panel` because the user started dragging it away.
    pub fn drag(&mut self, tree: &mut DockTree, panel: PanelId) -> DockResult<()> {
        let index = self.index_of(panel).ok_or(DockError::PanelNotFound(panel))?;
        self.remove(tree, index)?;
        Ok(())
    }

    pub fn can_drag(&self, _panel: PanelId) -> bool {
        true
    }

    pub fn can_replace(&self, _old: PanelId, _next: PanelId) -> bool {
        true
    }

    /// Restrict which panels this station takes.
    pub fn set_accept(&mut self, accept: impl Fn(PanelId) -> bool + 'static) {
        self.accept = Some(Box::new(accept));
    }

    /// Whether this station and `panel` agree on hosting it here.
    pub fn accepts(&self, tree: &DockTree, panel: PanelId) -> bool {
        let id = self.id();
        if panel == id || tree.is_ancestor(panel, id) {
            return false;
        }
        let station_accepts = self.accept.as_ref().is_none_or(|accept| accept(panel));
        station_accepts && tree.panel(panel).is_some_and(|p| p.accepts(id))
    }

    pub fn action_offers(&self) -> &ActionOffers {
        &self.actions
    }

    pub fn action_offers_mut(&mut self) -> &mut ActionOffers {
        &mut self.actions
    }

    /// Actions offered to `panel`, the same list for every child.
    pub fn action_offers_for(&self, panel: PanelId) -> Option<&ActionOffers> {
        self.index_of(panel).map(|_| &self.actions)
    }

    pub fn is_station_visible(&self, tree: &DockTree) -> bool {
        self.visibility
            .is_station_visible(tree.parent_of(self.id()).is_some())
    }

    pub fn is_child_visible(&self, panel: PanelId) -> bool {
        self.visibility.is_child_visible(panel)
    }

    pub(crate) fn parent_changed(&mut self, tree: &mut DockTree) {
        self.visibility.parent_changed();
        self.refresh_visibility(tree);
    }

    pub(crate) fn set_shown_by_parent(&mut self, tree: &mut DockTree, shown: bool) {
        self.visibility.set_shown_by_parent(shown);
        self.refresh_visibility(tree);
    }

    pub(crate) fn set_displayable(&mut self, tree: &mut DockTree, displayable: bool) {
        self.visibility.set_displayable(displayable);
        self.refresh_visibility(tree);
    }

    pub fn bounds(&self) -> LayoutRect {
        self.bounds
    }

    /// Place the station and lay out its children, nested stations included.
    pub fn set_bounds(&mut self, tree: &mut DockTree, bounds: LayoutRect) {
        self.bounds = bounds;
        self.layout(tree);
    }

    fn layout(&mut self, tree: &mut DockTree) {
        profile_function!();

        let title_height = self.style.title_height;
        match self.mode() {
            StructuralMode::Empty => {}
            StructuralMode::Single => {
                if let Some(displayer) = self.children.first_mut() {
                    displayer.set_bounds(self.bounds, title_height);
                }
            }
            StructuralMode::Stacked => {
                let (bar, content) = self.bounds.split_top(self.style.tab_bar_height);
                self.strip.set_bounds(bar);
                for displayer in &mut self.children {
                    displayer.set_bounds(content, title_height);
                }
            }
        }

        for displayer in &self.children {
            tree.layout_nested(displayer.panel(), displayer.content_bounds());
        }
    }

    fn make_title(&self, tree: &mut DockTree, panel: PanelId) -> Option<TitleDecoration> {
        let version = self.title_version.clone()?;
        if !tree.panel(panel).is_some_and(|p| p.is_titled()) {
            return None;
        }
        tree.bind_title(panel);
        Some(TitleDecoration::new(version, panel))
    }

    fn check_insertable(&self, tree: &DockTree, panel: PanelId) -> DockResult<()> {
        let id = self.id();
        if !tree.contains(panel) {
            return Err(DockError::PanelNotFound(panel));
        }
        if panel == id || tree.is_ancestor(panel, id) {
            return Err(DockError::InvalidParent { panel, parent: id });
        }
        match tree.parent_of(panel) {
            Some(parent) if parent == id => Err(DockError::AlreadyDocked(panel)),
            Some(parent) => Err(DockError::InvalidParent { panel, parent }),
            None => Ok(()),
        }
    }

    fn insert_child(&mut self, tree: &mut DockTree, panel: PanelId, index: usize) -> DockResult<()> {
        self.check_insertable(tree, panel)?;
        let index = index.min(self.children.len());

        self.support.fire(StationEvent::ChildAdding(panel));

        let title = self.make_title(tree, panel);
        let displayer = self.pool.fetch(panel, title);
        let displayer_id = displayer.id();
        let (label, icon) = label_of(tree, panel);

        match self.children.len() {
            0 => {
                self.children.push(displayer);
                self.background.mount_displayer(displayer_id);
            }
            1 => {
                tracing::debug!("{} becomes stacked", self.id());
                self.background.clear();
                let first = &self.children[0];
                let (first_label, first_icon) = label_of(tree, first.panel());
                self.strip.add_tab(&first_label, first_icon.as_ref(), first.id());
                self.background.mount_strip();

                self.children.insert(index, displayer);
                self.strip.insert_tab(index, &label, icon.as_ref(), displayer_id);
                self.strip.set_selected_index(index);
            }
            _ => {
                self.children.insert(index, displayer);
                self.strip.insert_tab(index, &label, icon.as_ref(), displayer_id);
                self.strip.set_selected_index(index);
            }
        }

        tree.set_parent(panel, Some(self.id()))?;
        self.layout(tree);

        self.support.fire(StationEvent::ChildAdded(panel));
        Ok(())
    }

    fn remove_child(&mut self, tree: &mut DockTree, index: usize, fire: bool) -> DockResult<PanelId> {
        let count = self.children.len();
        if index >= count {
            return Err(DockError::IndexOutOfRange { index, count });
        }
        let panel = self.children[index].panel();

        if fire {
            self.support.fire(StationEvent::ChildRemoving(panel));
        }

        let displayer = match count {
            1 => {
                self.background.clear();
                self.children.remove(index)
            }
            2 => {
                tracing::debug!("{} leaves stacked mode", self.id());
                self.background.clear();
                self.strip.remove_all();
                let displayer = self.children.remove(index);
                if let Some(remaining) = self.children.first() {
                    self.background.mount_displayer(remaining.id());
                }
                displayer
            }
            _ => {
                let displayer = self.children.remove(index);
                self.strip.remove_tab(index);
                displayer
            }
        };
        if self.pool.release(displayer).is_some() {
            tree.unbind_title(panel);
        }
        self.visibility.forget_child(panel);
        self.layout(tree);

        tree.set_parent(panel, None)?;

        if fire {
            self.support.fire(StationEvent::ChildRemoved(panel));
        }
        Ok(panel)
    }

    /// Process tab strip notifications and re-derive visibility.
    fn finish_mutation(&mut self, tree: &mut DockTree) {
        let strip_changed = self
            .strip
            .drain_events()
            .iter()
            .any(|event| matches!(event, TabStripEvent::SelectionChanged { .. }));

        let front = self.front_panel();
        if front != self.last_front {
            self.last_front = front;
            self.support.fire(StationEvent::SelectionChanged { front });
            if strip_changed
                && self.focus_on_selection
                && let Some(front) = front
            {
                self.visibility.request_focus(tree, front);
            }
        }

        self.refresh_visibility(tree);
    }

    fn refresh_visibility(&mut self, tree: &mut DockTree) {
        let visible = self.is_station_visible(tree);
        let panels: Vec<PanelId> = self.children.iter().map(DockableDisplayer::panel).collect();
        let selected = self.selected_index();
        for change in self.visibility.update(visible, &panels, selected) {
            self.support.fire(StationEvent::VisibilitySet {
                panel: change.panel,
                visible: change.visible,
            });
            tree.notify_child_shown(change.panel, change.visible);
        }
    }

    fn prepare(&mut self, tree: &DockTree, point: Vec2, panel: PanelId, kind: PlacementKind) -> bool {
        profile_function!();

        let count = self.children.len();
        let query = PlacementQuery {
            kind,
            count,
            point,
            parent_override: self.support.is_in_override_zone(tree, point, self.id(), panel),
            lone_title: match self.children.as_slice() {
                [lone] => lone.title_bounds(),
                _ => None,
            },
        };
        self.pending = PlacementResolver::resolve(self.strip.as_ref(), &query)
            .map(|gap| PendingPlacement { panel, gap, kind });
        self.pending.is_some()
    }

    fn take_pending(&mut self, kind: PlacementKind) -> DockResult<PendingPlacement> {
        match self.pending.take() {
            Some(pending) if pending.kind == kind => Ok(pending),
            other => {
                self.pending = other;
                Err(DockError::NoPendingPlacement)
            }
        }
    }
}

fn label_of(tree: &DockTree, panel: PanelId) -> (String, Option<Icon>) {
    tree.panel(panel)
        .map(|p| (p.title().to_string(), p.icon().cloned()))
        .unwrap_or_default()
}

impl Container for StackStation {
    fn id(&self) -> PanelId {
        self.support.station()
    }

    fn count(&self) -> usize {
        self.children.len()
    }

    fn panel_at(&self, index: usize) -> DockResult<PanelId> {
        self.children
            .get(index)
            .map(DockableDisplayer::panel)
            .ok_or(DockError::IndexOutOfRange {
                index,
                count: self.children.len(),
            })
    }

    fn index_of(&self, panel: PanelId) -> Option<usize> {
        self.children.iter().position(|d| d.panel() == panel)
    }

    fn front_panel(&self) -> Option<PanelId> {
        match self.children.as_slice() {
            [] => None,
            [lone] => Some(lone.panel()),
            children => self
                .strip
                .selected_index()
                .and_then(|index| children.get(index))
                .map(DockableDisplayer::panel),
        }
    }

    fn set_front(&mut self, tree: &mut DockTree, panel: PanelId) {
        if self.children.len() < 2 {
            return;
        }
        if let Some(index) = self.index_of(panel) {
            self.strip.set_selected_index(index);
            self.finish_mutation(tree);
        }
    }

    fn add(&mut self, tree: &mut DockTree, panel: PanelId, index: usize) -> DockResult<()> {
        self.insert_child(tree, panel, index)?;
        self.finish_mutation(tree);
        Ok(())
    }

    fn remove(&mut self, tree: &mut DockTree, index: usize) -> DockResult<PanelId> {
        let panel = self.remove_child(tree, index, true)?;
        self.finish_mutation(tree);
        Ok(panel)
    }

    fn replace(&mut self, tree: &mut DockTree, old: PanelId, next: PanelId) -> DockResult<()> {
        let index = self.index_of(old).ok_or(DockError::PanelNotFound(old))?;
        self.check_insertable(tree, next)?;
        self.remove_child(tree, index, true)?;
        self.insert_child(tree, next, index)?;
        self.finish_mutation(tree);
        Ok(())
    }

    fn prepare_drop(&mut self, tree: &DockTree, point: Vec2, panel: PanelId) -> bool {
        if !self.accepts(tree, panel) {
            self.pending = None;
            return false;
        }
        self.prepare(tree, point, panel, PlacementKind::Drop)
    }

    fn drop_prepared(&mut self, tree: &mut DockTree) -> DockResult<()> {
        let pending = self.take_pending(PlacementKind::Drop)?;
        let index = pending.gap.target_index();
        tracing::debug!("Dropping {} into {} at {}", pending.panel, self.id(), index);
        self.add(tree, pending.panel, index)
    }

    fn drop_append(&mut self, tree: &mut DockTree, panel: PanelId) -> DockResult<()> {
        let index = self.children.len();
        self.add(tree, panel, index)
    }

    fn drop_with_hint(
        &mut self,
        tree: &mut DockTree,
        panel: PanelId,
        hint: &StackProperty,
    ) -> DockResult<bool> {
        let count = self.children.len();
        let index = hint.index().min(count);

        if index < count
            && let Some(successor) = hint.successor()
        {
            let target = self.children[index].panel();
            if tree.kind_of(target) == Some(PanelKind::Stack)
                && tree.with_stack(target, |nested, tree| {
                    nested.drop_with_hint(tree, panel, successor)
                })?
            {
                return Ok(true);
            }
        }

        if !self.accepts(tree, panel) {
            tracing::debug!("{} rejected by {}", panel, self.id());
            return Ok(false);
        }
        self.add(tree, panel, index)?;
        Ok(true)
    }

    fn prepare_move(&mut self, tree: &DockTree, point: Vec2, panel: PanelId) -> bool {
        if self.index_of(panel).is_none() {
            self.pending = None;
            return false;
        }
        self.prepare(tree, point, panel, PlacementKind::Move)
    }

    fn move_prepared(&mut self, tree: &mut DockTree) -> DockResult<()> {
        let pending = self.take_pending(PlacementKind::Move)?;
        let panel = pending.panel;
        let old = self.index_of(panel).ok_or(DockError::PanelNotFound(panel))?;
        let mut target = pending.gap.target_index();
        if old < target {
            target -= 1;
        }
        tracing::debug!("Moving {} in {} from {} to {}", panel, self.id(), old, target);

        let front = self.front_panel();
        self.remove_child(tree, old, false)?;
        self.insert_child(tree, panel, target)?;
        if self.children.len() > 1
            && let Some(index) = front.and_then(|front| self.index_of(front))
        {
            self.strip.set_selected_index(index);
        }
        self.finish_mutation(tree);
        Ok(())
    }

    fn draw(&mut self) {
        self.draw_indicator = true;
    }

    fn forget(&mut self) {
        self.draw_indicator = false;
        self.pending = None;
    }

    fn is_in_override_zone(
        &self,
        tree: &DockTree,
        point: Vec2,
        invoker: PanelId,
        candidate: PanelId,
    ) -> bool {
        self.support.is_in_override_zone(tree, point, invoker, candidate)
    }
}

impl fmt::Debug for StackStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackStation")
            .field("id", &self.id())
            .field("children", &self.children)
            .field("selected", &self.selected_index())
            .field("background", &self.background)
            .field("pending", &self.pending)
            .field("draw_indicator", &self.draw_indicator)
            .field("bounds", &self.bounds)
            .finish()
    }
}
