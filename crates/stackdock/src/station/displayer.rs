//! Displayers pair a docked panel with its title decoration.

use stackdock_core::alloc::HashSet;
use stackdock_core::geometry::LayoutRect;

use crate::tree::PanelId;

/// Upper bound of released displayers kept for reuse.
pub const DEFAULT_POOL_CAPACITY: usize = 16;

/// Identity of a displayer, stable while it is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayerId(pub usize);

/// Kind of title a station asks its children for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TitleVersion(String);

impl TitleVersion {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// A title bound to one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleDecoration {
    version: TitleVersion,
    panel: PanelId,
    bounds: LayoutRect,
}

impl TitleDecoration {
    pub fn new(version: TitleVersion, panel: PanelId) -> Self {
        Self {
            version,
            panel,
            bounds: LayoutRect::ZERO,
        }
    }

    pub fn version(&self) -> &TitleVersion {
        &self.version
    }

    pub fn panel(&self) -> PanelId {
        self.panel
    }

    pub fn bounds(&self) -> LayoutRect {
        self.bounds
    }
}

/// Wrapper showing one panel, optionally below its title.
#[derive(Debug, Clone)]
pub struct DockableDisplayer {
    id: DisplayerId,
    panel: PanelId,
    title: Option<TitleDecoration>,
    bounds: LayoutRect,
    content: LayoutRect,
}

impl DockableDisplayer {
    pub fn id(&self) -> DisplayerId {
        self.id
    }

    pub fn panel(&self) -> PanelId {
        self.panel
    }

    pub fn title(&self) -> Option<&TitleDecoration> {
        self.title.as_ref()
    }

    /// Swap the title decoration, returning the previous one.
    pub fn set_title(&mut self, title: Option<TitleDecoration>) -> Option<TitleDecoration> {
        std::mem::replace(&mut self.title, title)
    }

    pub fn bounds(&self) -> LayoutRect {
        self.bounds
    }

    /// Area left for the panel itself.
    pub fn content_bounds(&self) -> LayoutRect {
        self.content
    }

    pub fn title_bounds(&self) -> Option<LayoutRect> {
        self.title.as_ref().map(|t| t.bounds)
    }

    /// Place the displayer; a title takes `title_height` off the top.
    pub fn set_bounds(&mut self, bounds: LayoutRect, title_height: f32) {
        self.bounds = bounds;
        match &mut self.title {
            Some(title) => {
                let (top, rest) = bounds.split_top(title_height);
                title.bounds = top;
                self.content = rest;
            }
            None => self.content = bounds,
        }
    }
}

/// Source of displayers, recycling released ones.
#[derive(Debug)]
pub struct DisplayerPool {
    free: Vec<DockableDisplayer>,
    live: HashSet<DisplayerId>,
    next_id: usize,
    capacity: usize,
}

impl DisplayerPool {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_POOL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            free: Vec::new(),
            live: HashSet::new(),
            next_id: 0,
            capacity,
        }
    }

    /// A displayer for `panel`, reused when one is available.
    pub fn fetch(&mut self, panel: PanelId, title: Option<TitleDecoration>) -> DockableDisplayer {
        let mut displayer = match self.free.pop() {
            Some(displayer) => displayer,
            None => {
                let id = DisplayerId(self.next_id);
                self.next_id += 1;
                DockableDisplayer {
                    id,
                    panel,
                    title: None,
                    bounds: LayoutRect::ZERO,
                    content: LayoutRect::ZERO,
                }
            }
        };
        displayer.panel = panel;
        displayer.title = title;
        displayer.bounds = LayoutRect::ZERO;
        displayer.content = LayoutRect::ZERO;
        self.live.insert(displayer.id);
        displayer
    }

    /// Take a displayer back. Returns the title it carried so the caller can
    /// unbind it.
    pub fn release(&mut self, mut displayer: DockableDisplayer) -> Option<TitleDecoration> {
        if !self.live.remove(&displayer.id) {
            tracing::warn!("Released displayer {:?} was not live", displayer.id);
        }
        let title = displayer.title.take();
        if self.free.len() < self.capacity {
            self.free.push(displayer);
        }
        title
    }

    /// Number of displayers currently handed out.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of displayers waiting for reuse.
    pub fn pooled_count(&self) -> usize {
        self.free.len()
    }
}

impl Default for DisplayerPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(panel: PanelId) -> Option<TitleDecoration> {
        Some(TitleDecoration::new(TitleVersion::new("stack"), panel))
    }

    #[test]
    fn test_release_returns_title() {
        let mut pool = DisplayerPool::new();
        let displayer = pool.fetch(PanelId(1), title(PanelId(1)));
        assert_eq!(pool.live_count(), 1);

        let released = pool.release(displayer).unwrap();
        assert_eq!(released.panel(), PanelId(1));
        assert_eq!(pool.live_count(), 0);
        assert_eq!(pool.pooled_count(), 1);
    }

    #[test]
    fn test_recycled_displayer_is_clean() {
        let mut pool = DisplayerPool::new();
        let first = pool.fetch(PanelId(1), title(PanelId(1)));
        let id = first.id();
        pool.release(first);

        let second = pool.fetch(PanelId(2), None);
        assert_eq!(second.id(), id);
        assert_eq!(second.panel(), PanelId(2));
        assert!(second.title().is_none());
    }

    #[test]
    fn test_live_displayers_are_distinct() {
        let mut pool = DisplayerPool::new();
        let a = pool.fetch(PanelId(1), None);
        let b = pool.fetch(PanelId(2), None);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_capacity_limits_pool() {
        let mut pool = DisplayerPool::with_capacity(1);
        let a = pool.fetch(PanelId(1), None);
        let b = pool.fetch(PanelId(2), None);
        pool.release(a);
        pool.release(b);
        assert_eq!(pool.pooled_count(), 1);
    }

    #[test]
    fn test_title_takes_top_band() {
        let mut pool = DisplayerPool::new();
        let mut displayer = pool.fetch(PanelId(1), title(PanelId(1)));
        displayer.set_bounds(LayoutRect::new(0.0, 10.0, 100.0, 50.0), 18.0);

        assert_eq!(displayer.title_bounds(), Some(LayoutRect::new(0.0, 10.0, 100.0, 18.0)));
        assert_eq!(displayer.content_bounds(), LayoutRect::new(0.0, 28.0, 100.0, 32.0));
    }
}
