//! Tab strip abstraction and the built-in implementation.

use stackdock_core::geometry::LayoutRect;

use crate::config::StackStyle;
use crate::station::DisplayerId;
use crate::tree::Icon;

/// Notification queued by a tab strip until the station drains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabStripEvent {
    SelectionChanged {
        previous: Option<usize>,
        current: Option<usize>,
    },
}

/// Replaceable widget showing one tab per child of a stacked station.
///
/// Tab bounds are relative to the strip's own [`bounds`](Self::bounds).
pub trait TabStrip {
    fn insert_tab(&mut self, index: usize, label: &str, icon: Option<&Icon>, displayer: DisplayerId);

    fn add_tab(&mut self, label: &str, icon: Option<&Icon>, displayer: DisplayerId) {
        let index = self.tab_count();
        self.insert_tab(index, label, icon, displayer);
    }

    fn remove_tab(&mut self, index: usize);

    fn remove_all(&mut self);

    fn tab_count(&self) -> usize;

    fn selected_index(&self) -> Option<usize>;

    /// Select a tab. Out-of-range indices are ignored.
    fn set_selected_index(&mut self, index: usize);

    fn tab_label(&self, index: usize) -> Option<&str>;

    fn tab_icon(&self, index: usize) -> Option<&Icon>;

    fn set_title_at(&mut self, index: usize, label: &str);

    fn set_icon_at(&mut self, index: usize, icon: Option<&Icon>);

    fn bounds(&self) -> LayoutRect;

    fn set_bounds(&mut self, bounds: LayoutRect);

    fn tab_bounds(&self, index: usize) -> Option<LayoutRect>;

    fn displayer_at(&self, index: usize) -> Option<DisplayerId>;

    /// Take all queued notifications.
    fn drain_events(&mut self) -> Vec<TabStripEvent>;
}

#[derive(Debug, Clone)]
struct Tab {
    label: String,
    icon: Option<Icon>,
    displayer: DisplayerId,
    width: f32,
}

/// Tab strip laying tabs out left to right with estimated label widths.
#[derive(Debug, Clone)]
pub struct DefaultTabStrip {
    style: StackStyle,
    tabs: Vec<Tab>,
    selected: Option<usize>,
    bounds: LayoutRect,
    events: Vec<TabStripEvent>,
}

impl DefaultTabStrip {
    pub fn new(style: StackStyle) -> Self {
        Self {
            style,
            tabs: Vec::new(),
            selected: None,
            bounds: LayoutRect::ZERO,
            events: Vec::new(),
        }
    }

    fn tab_width(&self, label: &str, icon: Option<&Icon>) -> f32 {
        let chars = label.chars().count() as f32;
        let mut width = chars * self.style.tab_font_size * self.style.char_width_factor
            + self.style.tab_padding * 2.0;
        if icon.is_some() {
            width += self.style.icon_size;
        }
        width
    }

    fn select(&mut self, selected: Option<usize>) {
        if self.selected != selected {
            self.events.push(TabStripEvent::SelectionChanged {
                previous: self.selected,
                current: selected,
            });
            self.selected = selected;
        }
    }
}

impl TabStrip for DefaultTabStrip {
    fn insert_tab(&mut self, index: usize, label: &str, icon: Option<&Icon>, displayer: DisplayerId) {
        let index = index.min(self.tabs.len());
        let width = self.tab_width(label, icon);
        self.tabs.insert(
            index,
            Tab {
                label: label.to_string(),
                icon: icon.cloned(),
                displayer,
                width,
            },
        );
        match self.selected {
            None => self.select(Some(0)),
            Some(selected) if index <= selected => self.selected = Some(selected + 1),
            Some(_) => {}
        }
    }

    fn remove_tab(&mut self, index: usize) {
        if index >= self.tabs.len() {
            return;
        }
        self.tabs.remove(index);
        let Some(selected) = self.selected else {
            return;
        };
        if self.tabs.is_empty() {
            self.select(None);
        } else if index == selected {
            // the tab that slid into place is a different one
            let next = index.min(self.tabs.len() - 1);
            self.events.push(TabStripEvent::SelectionChanged {
                previous: Some(selected),
                current: Some(next),
            });
            self.selected = Some(next);
        } else if index < selected {
            self.selected = Some(selected - 1);
        }
    }

    fn remove_all(&mut self) {
        self.tabs.clear();
        self.select(None);
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn set_selected_index(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.select(Some(index));
        }
    }

    fn tab_label(&self, index: usize) -> Option<&str> {
        self.tabs.get(index).map(|t| t.label.as_str())
    }

    fn tab_icon(&self, index: usize) -> Option<&Icon> {
        self.tabs.get(index).and_then(|t| t.icon.as_ref())
    }

    fn set_title_at(&mut self, index: usize, label: &str) {
        let Some(icon) = self.tabs.get(index).map(|t| t.icon.clone()) else {
            return;
        };
        let width = self.tab_width(label, icon.as_ref());
        let tab = &mut self.tabs[index];
        tab.label = label.to_string();
        tab.width = width;
    }

    fn set_icon_at(&mut self, index: usize, icon: Option<&Icon>) {
        let Some(label) = self.tabs.get(index).map(|t| t.label.clone()) else {
            return;
        };
        let width = self.tab_width(&label, icon);
        let tab = &mut self.tabs[index];
        tab.icon = icon.cloned();
        tab.width = width;
    }

    fn bounds(&self) -> LayoutRect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: LayoutRect) {
        self.bounds = bounds;
    }

    fn tab_bounds(&self, index: usize) -> Option<LayoutRect> {
        let tab = self.tabs.get(index)?;
        let x: f32 = self.tabs[..index].iter().map(|t| t.width).sum();
        Some(LayoutRect::new(x, 0.0, tab.width, self.style.tab_bar_height))
    }

    fn displayer_at(&self, index: usize) -> Option<DisplayerId> {
        self.tabs.get(index).map(|t| t.displayer)
    }

    fn drain_events(&mut self) -> Vec<TabStripEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_with(labels: &[&str]) -> DefaultTabStrip {
        let mut strip = DefaultTabStrip::new(StackStyle::default());
        for (i, label) in labels.iter().enumerate() {
            strip.add_tab(label, None, DisplayerId(i));
        }
        strip
    }

    #[test]
    fn test_first_tab_is_selected() {
        let mut strip = strip_with(&["a"]);
        assert_eq!(strip.selected_index(), Some(0));
        assert_eq!(
            strip.drain_events(),
            vec![TabStripEvent::SelectionChanged {
                previous: None,
                current: Some(0)
            }]
        );
        assert!(strip.drain_events().is_empty());
    }

    #[test]
    fn test_insert_before_selection_shifts_it() {
        let mut strip = strip_with(&["a", "b"]);
        strip.set_selected_index(1);
        strip.drain_events();

        strip.insert_tab(0, "c", None, DisplayerId(9));
        assert_eq!(strip.selected_index(), Some(2));
        assert_eq!(strip.tab_label(2), Some("b"));
        assert!(strip.drain_events().is_empty());
    }

    #[test]
    fn test_remove_selected_selects_successor() {
        let mut strip = strip_with(&["a", "b", "c"]);
        strip.set_selected_index(1);
        strip.drain_events();

        strip.remove_tab(1);
        assert_eq!(strip.selected_index(), Some(1));
        assert_eq!(strip.tab_label(1), Some("c"));
        assert_eq!(strip.drain_events().len(), 1);

        strip.remove_tab(1);
        assert_eq!(strip.selected_index(), Some(0));
    }

    #[test]
    fn test_remove_before_selection() {
        let mut strip = strip_with(&["a", "b", "c"]);
        strip.set_selected_index(2);
        strip.drain_events();

        strip.remove_tab(0);
        assert_eq!(strip.selected_index(), Some(1));
        assert!(strip.drain_events().is_empty());
    }

    #[test]
    fn test_remove_all_clears_selection() {
        let mut strip = strip_with(&["a", "b"]);
        strip.drain_events();
        strip.remove_all();
        assert_eq!(strip.tab_count(), 0);
        assert_eq!(strip.selected_index(), None);
        assert_eq!(strip.drain_events().len(), 1);
    }

    #[test]
    fn test_tab_bounds_left_to_right() {
        let style = StackStyle::default();
        let strip = strip_with(&["ab", "cde"]);
        let first = strip.tab_bounds(0).unwrap();
        let second = strip.tab_bounds(1).unwrap();

        let expected = 2.0 * style.tab_font_size * style.char_width_factor + 2.0 * style.tab_padding;
        assert!((first.width - expected).abs() < 1e-4);
        assert_eq!(second.x, first.width);
        assert_eq!(second.height, style.tab_bar_height);
        assert!(strip.tab_bounds(2).is_none());
    }

    #[test]
    fn test_icon_widens_tab() {
        let mut strip = strip_with(&["a"]);
        let before = strip.tab_bounds(0).unwrap().width;
        strip.set_icon_at(0, Some(&Icon::new("file")));
        let after = strip.tab_bounds(0).unwrap().width;
        assert!((after - before - StackStyle::default().icon_size).abs() < 1e-4);
    }
}
