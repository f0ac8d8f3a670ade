//! Actions a station offers to every one of its children.

use crate::error::{DockError, DockResult};
use crate::station::{ListenerId, Listeners};

/// Where an action list comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HintOrigin {
    /// Offered by the direct parent of the panel.
    #[default]
    DirectAction,
    /// Offered by a station further up.
    IndirectAction,
}

/// Where the host should place the actions among others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HintPosition {
    Left,
    #[default]
    Middle,
    Right,
}

/// Placement hint attached to an action list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionHint {
    pub origin: HintOrigin,
    pub position: HintPosition,
}

/// A single action shown next to a panel's title or tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockAction {
    pub id: String,
    pub label: String,
    pub enabled: bool,
}

impl DockAction {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Change of an [`ActionOffers`] list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEvent {
    Inserted { index: usize, count: usize },
    Removed { index: usize, count: usize },
    Changed { index: usize },
}

/// Ordered, mutable list of actions shared by all children of a station.
#[derive(Debug, Default)]
pub struct ActionOffers {
    hint: ActionHint,
    actions: Vec<DockAction>,
    listeners: Listeners<ActionEvent>,
}

impl ActionOffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hint(&self) -> ActionHint {
        self.hint
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DockAction> {
        self.actions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DockAction> {
        self.actions.iter()
    }

    pub fn add(&mut self, action: DockAction) {
        let index = self.actions.len();
        self.actions.push(action);
        self.listeners.emit(&ActionEvent::Inserted { index, count: 1 });
    }

    pub fn insert(&mut self, index: usize, action: DockAction) -> DockResult<()> {
        let count = self.actions.len();
        if index > count {
            return Err(DockError::IndexOutOfRange { index, count });
        }
        self.actions.insert(index, action);
        self.listeners.emit(&ActionEvent::Inserted { index, count: 1 });
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> DockResult<DockAction> {
        let count = self.actions.len();
        if index >= count {
            return Err(DockError::IndexOutOfRange { index, count });
        }
        let action = self.actions.remove(index);
        self.listeners.emit(&ActionEvent::Removed { index, count: 1 });
        Ok(action)
    }

    pub fn clear(&mut self) {
        let count = self.actions.len();
        if count > 0 {
            self.actions.clear();
            self.listeners.emit(&ActionEvent::Removed { index: 0, count });
        }
    }

    /// Enable or disable the action with `id`. Returns `false` if there is none.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> bool {
        let Some(index) = self.actions.iter().position(|a| a.id == id) else {
            return false;
        };
        if self.actions[index].enabled != enabled {
            self.actions[index].enabled = enabled;
            self.listeners.emit(&ActionEvent::Changed { index });
        }
        true
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ActionEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}
