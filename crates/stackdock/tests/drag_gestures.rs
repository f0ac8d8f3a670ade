//! Drag gestures across stations, including a host-provided parent.

use std::cell::RefCell;
use std::rc::Rc;

use stackdock::prelude::*;
use stackdock::{Mounted, StationEvent};

/// Split container claiming a band along its left edge.
struct EdgeSplit {
    band: f32,
}

impl ExternalContainer for EdgeSplit {
    fn is_in_override_zone(&self, point: Vec2, _invoker: PanelId, _candidate: PanelId) -> bool {
        point.x < self.band
    }
}

struct Workspace {
    tree: DockTree,
    split: PanelId,
    left: PanelId,
    right: PanelId,
}

fn workspace() -> Workspace {
    stackdock_core::logging::init_with_filter("stackdock=trace");
    let mut tree = DockTree::new(DockConfig::default());
    let split = tree.insert_external(Panel::new("split"), Box::new(EdgeSplit { band: 40.0 }));
    let left = tree.insert_stack(Panel::new("left"));
    let right = tree.insert_stack(Panel::new("right"));
    tree.attach_to_external(left, split).unwrap();
    tree.attach_to_external(right, split).unwrap();

    tree.with_stack(left, |station, tree| {
        station.set_bounds(tree, LayoutRect::new(0.0, 0.0, 300.0, 400.0));
        Ok(())
    })
    .unwrap();
    tree.with_stack(right, |station, tree| {
        station.set_bounds(tree, LayoutRect::new(300.0, 0.0, 300.0, 400.0));
        Ok(())
    })
    .unwrap();

    Workspace {
        tree,
        split,
        left,
        right,
    }
}

impl Workspace {
    fn fill(&mut self, stack: PanelId, titles: &[&str]) -> Vec<PanelId> {
        let panels: Vec<PanelId> = titles
            .iter()
            .map(|t| self.tree.insert_panel(Panel::new(*t)))
            .collect();
        let to_add = panels.clone();
        self.tree
            .with_stack(stack, |station, tree| {
                for panel in to_add {
                    station.drop_append(tree, panel)?;
                }
                Ok(())
            })
            .unwrap();
        panels
    }
}

#[test]
fn drag_tab_between_stacks() {
    let mut ws = workspace();
    let left = ws.fill(ws.left, &["one", "two", "three"]);
    let right = ws.fill(ws.right, &["four", "five"]);
    let two = left[1];

    ws.tree
        .with_stack(ws.left, |station, tree| station.drag(tree, two))
        .unwrap();
    assert_eq!(ws.tree.parent_of(two), None);

    ws.tree
        .with_stack(ws.right, |station, tree| {
            let first = station.tab_strip().tab_bounds(0).unwrap();
            let origin = station.tab_strip().bounds();
            let point = Vec2::new(origin.x + first.right() - 2.0, origin.y + 4.0);
            assert!(station.prepare_drop(tree, point, two));
            station.draw();
            assert!(station.insertion_indicator().is_some());
            station.drop_prepared(tree)?;
            station.forget();
            Ok(())
        })
        .unwrap();

    let station = ws.tree.stack(ws.right).unwrap();
    assert_eq!(station.panel_at(0), Ok(right[0]));
    assert_eq!(station.panel_at(1), Ok(two));
    assert_eq!(station.front_panel(), Some(two));
    assert_eq!(ws.tree.focused(), Some(two));
    assert_eq!(ws.tree.stack(ws.left).unwrap().count(), 2);
}

#[test]
fn parent_band_overrides_stack() {
    let mut ws = workspace();
    ws.fill(ws.left, &["one", "two"]);
    let stray = ws.tree.insert_panel(Panel::new("stray"));

    ws.tree
        .with_stack(ws.left, |station, tree| {
            // inside the band but below the tabs: the split wins
            assert!(!station.prepare_drop(tree, Vec2::new(10.0, 200.0), stray));
            assert!(station.pending().is_none());
            // inside the band and over a tab: the stack keeps it
            assert!(station.prepare_drop(tree, Vec2::new(10.0, 5.0), stray));
            // outside the band the stack always accepts
            assert!(station.prepare_drop(tree, Vec2::new(200.0, 200.0), stray));
            assert_eq!(station.pending().map(|p| p.gap), Some(Gap::new(1, true)));
            Ok(())
        })
        .unwrap();

    assert!(ws
        .tree
        .is_in_override_zone(ws.left, Vec2::new(10.0, 10.0), ws.left, stray));
    assert!(!ws
        .tree
        .is_in_override_zone(ws.split, Vec2::new(100.0, 10.0), ws.left, stray));
}

#[test]
fn nested_stack_asks_through_parent_stack() {
    let mut ws = workspace();
    let inner = ws.tree.insert_stack(Panel::new("inner"));
    let inner_panels: Vec<PanelId> = ["a", "b"]
        .iter()
        .map(|t| ws.tree.insert_panel(Panel::new(*t)))
        .collect();
    let stray = ws.tree.insert_panel(Panel::new("stray"));

    ws.tree
        .with_stack(inner, |station, tree| {
            for &panel in &inner_panels {
                station.drop_append(tree, panel)?;
            }
            Ok(())
        })
        .unwrap();
    ws.tree
        .with_stack(ws.left, |station, tree| station.drop_append(tree, inner))
        .unwrap();

    let placed = ws
        .tree
        .stack(ws.left)
        .and_then(|left| left.displayer_of(inner))
        .map(|displayer| displayer.content_bounds())
        .unwrap();
    assert_eq!(ws.tree.stack(inner).unwrap().bounds(), placed);

    ws.tree
        .with_stack(inner, |station, tree| {
            assert!(!station.prepare_drop(tree, Vec2::new(10.0, 300.0), stray));
            assert!(station.prepare_drop(tree, Vec2::new(100.0, 300.0), stray));
            Ok(())
        })
        .unwrap();
}

#[test]
fn single_child_station_accepts_drop_on_title_only() {
    let mut ws = workspace();
    let panels = ws.fill(ws.left, &["solo"]);
    let stray = ws.tree.insert_panel(Panel::new("stray"));

    let title = ws
        .tree
        .stack(ws.left)
        .unwrap()
        .title_of(panels[0])
        .map(|t| t.bounds())
        .unwrap();
    assert_eq!(title.height, ws.tree.config().stack.title_height);

    ws.tree
        .with_stack(ws.left, |station, tree| {
            assert!(!station.prepare_drop(tree, Vec2::new(10.0, title.bottom() + 5.0), stray));
            assert!(station.prepare_drop(tree, Vec2::new(10.0, title.y + 2.0), stray));
            station.drop_prepared(tree)?;
            Ok(())
        })
        .unwrap();

    let station = ws.tree.stack(ws.left).unwrap();
    assert_eq!(station.panel_at(1), Ok(stray));
    assert_eq!(station.background().mounted(), Mounted::TabStrip);
}

#[test]
fn aborted_gesture_cannot_commit() {
    let mut ws = workspace();
    ws.fill(ws.right, &["one", "two"]);
    let stray = ws.tree.insert_panel(Panel::new("stray"));
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    ws.tree
        .stack_mut(ws.right)
        .unwrap()
        .subscribe(move |e| sink.borrow_mut().push(*e));

    ws.tree
        .with_stack(ws.right, |station, tree| {
            assert!(station.prepare_drop(tree, Vec2::new(500.0, 300.0), stray));
            station.forget();
            assert_eq!(station.drop_prepared(tree), Err(DockError::NoPendingPlacement));
            Ok(())
        })
        .unwrap();

    assert_eq!(ws.tree.stack(ws.right).unwrap().count(), 2);
    assert!(!events
        .borrow()
        .iter()
        .any(|e| matches!(e, StationEvent::ChildAdding(_))));
}

#[test]
fn hidden_split_child_hides_its_panels() {
    struct Hidden;
    impl ExternalContainer for Hidden {
        fn is_in_override_zone(&self, _: Vec2, _: PanelId, _: PanelId) -> bool {
            false
        }
        fn is_child_visible(&self, _child: PanelId) -> bool {
            false
        }
    }

    let mut tree = DockTree::new(DockConfig::default());
    let host = tree.insert_external(Panel::new("host"), Box::new(Hidden));
    let stack = tree.insert_stack(Panel::new("stack"));
    let panel = tree.insert_panel(Panel::new("panel"));
    tree.with_stack(stack, |station, tree| station.drop_append(tree, panel))
        .unwrap();
    assert!(tree.stack(stack).unwrap().is_child_visible(panel));

    tree.attach_to_external(stack, host).unwrap();
    assert!(!tree.stack(stack).unwrap().is_child_visible(panel));

    tree.set_shown_by_parent(stack, true).unwrap();
    assert!(tree.stack(stack).unwrap().is_child_visible(panel));

    tree.detach_from_external(stack).unwrap();
    assert!(tree.stack(stack).unwrap().is_child_visible(panel));
}
