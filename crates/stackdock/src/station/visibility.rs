//! Derives which children of a station are visible.

use indexmap::IndexMap;

use crate::tree::{DockTree, PanelId};

/// A child whose visibility differs from the last report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityChange {
    pub panel: PanelId,
    pub visible: bool,
}

/// Tracks station and child visibility.
///
/// A station below a parent is visible when the parent shows it; a root
/// station is visible when it is displayable. Of the children, only the lone
/// child or the selected tab can be visible.
#[derive(Debug, Clone)]
pub struct VisibilityCoordinator {
    shown_by_parent: bool,
    displayable: bool,
    states: IndexMap<PanelId, bool>,
}

impl VisibilityCoordinator {
    pub fn new() -> Self {
        Self {
            shown_by_parent: false,
            displayable: true,
            states: IndexMap::new(),
        }
    }

    pub fn is_station_visible(&self, has_parent: bool) -> bool {
        if has_parent {
            self.shown_by_parent
        } else {
            self.displayable
        }
    }

    pub fn set_shown_by_parent(&mut self, shown: bool) {
        self.shown_by_parent = shown;
    }

    pub fn set_displayable(&mut self, displayable: bool) {
        self.displayable = displayable;
    }

    /// The station got a new parent, or lost it. The new parent has not
    /// shown it yet.
    pub fn parent_changed(&mut self) {
        self.shown_by_parent = false;
    }

    /// Last reported visibility of `panel`.
    pub fn is_child_visible(&self, panel: PanelId) -> bool {
        self.states.get(&panel).copied().unwrap_or(false)
    }

    pub fn forget_child(&mut self, panel: PanelId) {
        self.states.shift_remove(&panel);
    }

    /// Recompute child visibility and return what changed since the last call.
    pub fn update(
        &mut self,
        station_visible: bool,
        children: &[PanelId],
        selected: Option<usize>,
    ) -> Vec<VisibilityChange> {
        self.states.retain(|panel, _| children.contains(panel));

        let lone = children.len() == 1;
        let mut changes = Vec::new();
        for (index, &panel) in children.iter().enumerate() {
            let visible = station_visible && (lone || selected == Some(index));
            let previous = self.states.insert(panel, visible);
            if previous != Some(visible) {
                changes.push(VisibilityChange { panel, visible });
            }
        }
        changes
    }

    /// Move focus to the new front panel.
    pub fn request_focus(&self, tree: &mut DockTree, front: PanelId) -> bool {
        let granted = tree.request_focus(front);
        if !granted {
            tracing::debug!("Focus stays away from {}", front);
        }
        granted
    }
}

impl Default for VisibilityCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: PanelId = PanelId(1);
    const B: PanelId = PanelId(2);

    #[test]
    fn test_root_uses_displayable() {
        let mut coordinator = VisibilityCoordinator::new();
        assert!(coordinator.is_station_visible(false));
        assert!(!coordinator.is_station_visible(true));

        coordinator.set_displayable(false);
        coordinator.set_shown_by_parent(true);
        assert!(!coordinator.is_station_visible(false));
        assert!(coordinator.is_station_visible(true));

        coordinator.parent_changed();
        assert!(!coordinator.is_station_visible(true));
    }

    #[test]
    fn test_only_selected_child_visible() {
        let mut coordinator = VisibilityCoordinator::new();
        let changes = coordinator.update(true, &[A, B], Some(1));
        assert_eq!(
            changes,
            vec![
                VisibilityChange { panel: A, visible: false },
                VisibilityChange { panel: B, visible: true },
            ]
        );

        let changes = coordinator.update(true, &[A, B], Some(0));
        assert_eq!(changes.len(), 2);
        assert!(coordinator.is_child_visible(A));
        assert!(!coordinator.is_child_visible(B));

        assert!(coordinator.update(true, &[A, B], Some(0)).is_empty());
    }

    #[test]
    fn test_lone_child_visible_without_selection() {
        let mut coordinator = VisibilityCoordinator::new();
        let changes = coordinator.update(true, &[A], None);
        assert_eq!(changes, vec![VisibilityChange { panel: A, visible: true }]);

        let changes = coordinator.update(false, &[A], None);
        assert_eq!(changes, vec![VisibilityChange { panel: A, visible: false }]);
    }

    #[test]
    fn test_removed_children_are_dropped() {
        let mut coordinator = VisibilityCoordinator::new();
        coordinator.update(true, &[A, B], Some(0));
        coordinator.update(true, &[A], None);
        assert!(!coordinator.is_child_visible(B));

        // B comes back hidden, which is news again
        let changes = coordinator.update(true, &[A, B], Some(0));
        assert_eq!(changes, vec![VisibilityChange { panel: B, visible: false }]);
    }
}
