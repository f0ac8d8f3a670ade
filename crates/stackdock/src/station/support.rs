//! Observer lists and behaviour shared by stations.

use std::fmt;

use stackdock_core::math::Vec2;

use crate::tree::{DockTree, PanelId};

/// Handle returned by `subscribe`, used to unsubscribe again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// An ordered list of event callbacks.
pub struct Listeners<E> {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn FnMut(&E)>)>,
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the listener was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Call every listener in registration order.
    pub fn emit(&mut self, event: &E) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

/// Notifications fired by a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationEvent {
    /// A panel is about to be added.
    ChildAdding(PanelId),
    /// A panel has been added.
    ChildAdded(PanelId),
    /// A panel is about to be removed.
    ChildRemoving(PanelId),
    /// A panel has been removed.
    ChildRemoved(PanelId),
    /// The visibility of a child changed.
    VisibilitySet { panel: PanelId, visible: bool },
    /// The selected tab changed.
    SelectionChanged { front: Option<PanelId> },
}

/// Listener fan-out and parent delegation injected into a station.
#[derive(Debug)]
pub struct StationSupport {
    station: PanelId,
    listeners: Listeners<StationEvent>,
}

impl StationSupport {
    pub fn new(station: PanelId) -> Self {
        Self {
            station,
            listeners: Listeners::new(),
        }
    }

    pub fn station(&self) -> PanelId {
        self.station
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&StationEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn fire(&mut self, event: StationEvent) {
        tracing::trace!("{} fires {:?}", self.station, event);
        self.listeners.emit(&event);
    }

    /// Ask the station's parent whether it claims `point`.
    ///
    /// A station without parent never has an override zone.
    pub fn is_in_override_zone(
        &self,
        tree: &DockTree,
        point: Vec2,
        invoker: PanelId,
        candidate: PanelId,
    ) -> bool {
        match tree.parent_of(self.station) {
            Some(parent) => tree.is_in_override_zone(parent, point, invoker, candidate),
            None => false,
        }
    }
}
