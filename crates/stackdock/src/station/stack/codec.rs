//! Saving and restoring the child order of a stack.

use super::StackStation;
use crate::error::{DockError, DockResult};
use crate::station::{Container, DockableDisplayer, StackLayout};
use crate::tree::{DockTree, PanelId};

impl StackStation {
    /// Current children as layout ids.
    ///
    /// Fails with [`DockError::UnknownLayoutId`] if `id_of` has no id for a child.
    pub fn layout_snapshot(
        &self,
        mut id_of: impl FnMut(PanelId) -> Option<i32>,
    ) -> DockResult<StackLayout> {
        let children = self
            .children
            .iter()
            .map(DockableDisplayer::panel)
            .map(|panel| id_of(panel).ok_or(DockError::UnknownLayoutId(panel)))
            .collect::<DockResult<Vec<_>>>()?;
        let selected = if children.len() > 1 {
            self.selected_index().unwrap_or(0) as i32
        } else {
            0
        };
        Ok(StackLayout::new(children, selected))
    }

    /// Encode the children and selection.
    pub fn write_layout(&self, id_of: impl FnMut(PanelId) -> Option<i32>) -> DockResult<Vec<u8>> {
        Ok(self.layout_snapshot(id_of)?.encode())
    }

    /// Decode `data` and append the panels it names.
    ///
    /// Nothing changes when `data` is malformed. Ids `id_to_panel` cannot
    /// resolve, repeated ids and panels docked elsewhere are skipped.
    pub fn read_layout(
        &mut self,
        tree: &mut DockTree,
        data: &[u8],
        id_to_panel: impl FnMut(i32) -> Option<PanelId>,
        replace_existing: bool,
    ) -> DockResult<()> {
        let layout = StackLayout::decode(data)?;
        self.apply_layout(tree, &layout, id_to_panel, replace_existing)
    }

    /// Append the panels of `layout` and restore its selection.
    ///
    /// Every id is resolved and checked before the station is touched.
    pub fn apply_layout(
        &mut self,
        tree: &mut DockTree,
        layout: &StackLayout,
        mut id_to_panel: impl FnMut(i32) -> Option<PanelId>,
        replace_existing: bool,
    ) -> DockResult<()> {
        let mut panels: Vec<PanelId> = Vec::with_capacity(layout.children.len());
        for &id in &layout.children {
            let Some(panel) = id_to_panel(id) else {
                tracing::debug!("Skipping unknown layout id {} in {}", id, self.id());
                continue;
            };
            if panels.contains(&panel) {
                tracing::debug!("Skipping repeated layout id {} in {}", id, self.id());
                continue;
            }
            match self.check_insertable(tree, panel) {
                Ok(()) => panels.push(panel),
                Err(DockError::AlreadyDocked(_)) if replace_existing => panels.push(panel),
                Err(err) => tracing::debug!("Skipping layout id {} in {}: {}", id, self.id(), err),
            }
        }

        if replace_existing {
            while self.count() > 0 {
                self.remove(tree, 0)?;
            }
        }

        for panel in panels {
            self.drop_append(tree, panel)?;
        }

        let count = self.count();
        if count > 1 {
            let selected = layout.selected.clamp(0, count as i32 - 1) as usize;
            if selected as i32 != layout.selected {
                tracing::warn!(
                    "Stored selection {} clamped to {} in {}",
                    layout.selected,
                    selected,
                    self.id()
                );
            }
            self.strip.set_selected_index(selected);
            self.finish_mutation(tree);
        }
        Ok(())
    }
}
