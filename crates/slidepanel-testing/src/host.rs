//! In-memory element tree for a single panel.
//!
//! The tree is fixed:
//!
//! ```text
//! CONTAINER
//! ├── PANEL
//! │   ├── COLLAPSED   child 0, fixed height
//! │   └── EXPANDED    child 1, fills the rest
//! │       └── LIST    nested-scrolling content (optional)
//! └── HEADER          optional, for below-to anchoring
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rustc_hash::FxHashMap;
use slidepanel::{ElementId, PanelHost};
use slidepanel_foundation::{EdgeInsets, Rect, Size};

pub const CONTAINER: ElementId = ElementId(0);
pub const PANEL: ElementId = ElementId(1);
pub const COLLAPSED: ElementId = ElementId(2);
pub const EXPANDED: ElementId = ElementId(3);
pub const LIST: ElementId = ElementId(4);
pub const HEADER: ElementId = ElementId(5);

#[derive(Debug, Clone)]
pub struct FakePanelHostBuilder {
    container: Size,
    collapsed_height: f32,
    padding: EdgeInsets,
    list_content_height: Option<f32>,
    header_height: Option<f32>,
}

impl Default for FakePanelHostBuilder {
    fn default() -> Self {
        Self {
            container: Size::new(400.0, 1000.0),
            collapsed_height: 100.0,
            padding: EdgeInsets::default(),
            list_content_height: None,
            header_height: None,
        }
    }
}

impl FakePanelHostBuilder {
    pub fn container(mut self, width: f32, height: f32) -> Self {
        self.container = Size::new(width, height);
        self
    }

    pub fn collapsed_height(mut self, height: f32) -> Self {
        self.collapsed_height = height;
        self
    }

    pub fn padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = padding;
        self
    }

    /// Adds a nested-scrolling list whose content is `content_height` tall.
    pub fn with_list(mut self, content_height: f32) -> Self {
        self.list_content_height = Some(content_height);
        self
    }

    /// Adds a header at the container top, `height` tall.
    pub fn with_header(mut self, height: f32) -> Self {
        self.header_height = Some(height);
        self
    }

    pub fn build(self) -> Rc<FakePanelHost> {
        Rc::new(FakePanelHost {
            container: self.container,
            collapsed_height: self.collapsed_height,
            padding: self.padding,
            list_content_height: self.list_content_height,
            header_height: Cell::new(self.header_height),
            top: Cell::new(0.0),
            top_updates: Cell::new(0),
            shown: Cell::new(true),
            removed: Cell::new(false),
            list_scroll: Cell::new(0.0),
            scroll_resets: Cell::new(0),
            visible: RefCell::new(FxHashMap::default()),
        })
    }
}

/// [`PanelHost`] backed by plain cells.
#[derive(Debug)]
pub struct FakePanelHost {
    container: Size,
    collapsed_height: f32,
    padding: EdgeInsets,
    list_content_height: Option<f32>,
    header_height: Cell<Option<f32>>,
    top: Cell<f32>,
    top_updates: Cell<usize>,
    shown: Cell<bool>,
    removed: Cell<bool>,
    list_scroll: Cell<f32>,
    scroll_resets: Cell<usize>,
    visible: RefCell<FxHashMap<ElementId, bool>>,
}

impl FakePanelHost {
    pub fn builder() -> FakePanelHostBuilder {
        FakePanelHostBuilder::default()
    }

    pub fn panel_top(&self) -> f32 {
        self.top.get()
    }

    /// How many times the controller moved the panel.
    pub fn top_updates(&self) -> usize {
        self.top_updates.get()
    }

    pub fn set_shown(&self, shown: bool) {
        self.shown.set(shown);
    }

    /// Drops the panel out of the tree.
    pub fn remove_panel(&self) {
        self.removed.set(true);
    }

    /// Resizes the header. Takes effect on the next layout.
    pub fn set_header_height(&self, height: f32) {
        if self.header_height.get().is_some() {
            self.header_height.set(Some(height));
        }
    }

    pub fn has_list(&self) -> bool {
        self.list_content_height.is_some()
    }

    pub fn list_scroll(&self) -> f32 {
        self.list_scroll.get()
    }

    pub fn set_list_scroll(&self, scroll: f32) {
        self.list_scroll.set(scroll.clamp(0.0, self.max_list_scroll()));
    }

    pub fn scroll_resets(&self) -> usize {
        self.scroll_resets.get()
    }

    pub fn is_visible(&self, id: ElementId) -> Option<bool> {
        self.visible.borrow().get(&id).copied()
    }

    /// Scrolls the list content by `dy`, positive towards its end. Returns
    /// the distance actually scrolled.
    pub fn scroll_list(&self, dy: f32) -> f32 {
        let before = self.list_scroll.get();
        self.set_list_scroll(before + dy);
        self.list_scroll.get() - before
    }

    fn max_list_scroll(&self) -> f32 {
        let viewport = self.expanded_rect(0.0).height;
        self.list_content_height
            .map(|content| (content - viewport).max(0.0))
            .unwrap_or(0.0)
    }

    fn panel_rect(&self, top: f32) -> Rect {
        Rect::new(0.0, top, self.container.width, self.container.height)
    }

    fn collapsed_rect(&self, top: f32) -> Rect {
        Rect::new(
            self.padding.left,
            top + self.padding.top,
            self.container.width - self.padding.left - self.padding.right,
            self.collapsed_height,
        )
    }

    fn expanded_rect(&self, top: f32) -> Rect {
        let collapsed = self.collapsed_rect(top);
        let height = self.container.height - self.collapsed_height - self.padding.vertical_sum();
        Rect::new(collapsed.x, collapsed.bottom(), collapsed.width, height.max(0.0))
    }
}

impl PanelHost for FakePanelHost {
    fn container_size(&self) -> Size {
        self.container
    }

    fn parent(&self, id: ElementId) -> Option<ElementId> {
        match id {
            PANEL => Some(CONTAINER),
            HEADER if self.header_height.get().is_some() => Some(CONTAINER),
            COLLAPSED | EXPANDED => Some(PANEL),
            LIST if self.has_list() => Some(EXPANDED),
            _ => None,
        }
    }

    fn child_count(&self, id: ElementId) -> usize {
        match id {
            PANEL => 2,
            EXPANDED => usize::from(self.has_list()),
            _ => 0,
        }
    }

    fn child_at(&self, id: ElementId, index: usize) -> Option<ElementId> {
        match (id, index) {
            (PANEL, 0) => Some(COLLAPSED),
            (PANEL, 1) => Some(EXPANDED),
            (EXPANDED, 0) if self.has_list() => Some(LIST),
            _ => None,
        }
    }

    fn bounds(&self, id: ElementId) -> Option<Rect> {
        let top = self.top.get();
        if self.removed.get() && id != HEADER {
            return None;
        }
        match id {
            PANEL => Some(self.panel_rect(top)),
            COLLAPSED => Some(self.collapsed_rect(top)),
            EXPANDED => Some(self.expanded_rect(top)),
            LIST if self.has_list() => Some(self.expanded_rect(top)),
            HEADER => self
                .header_height
                .get()
                .map(|height| Rect::new(0.0, 0.0, self.container.width, height)),
            _ => None,
        }
    }

    fn padding(&self, id: ElementId) -> EdgeInsets {
        if id == PANEL {
            self.padding
        } else {
            EdgeInsets::default()
        }
    }

    fn is_shown(&self, _id: ElementId) -> bool {
        self.shown.get()
    }

    fn is_nested_scrolling_enabled(&self, id: ElementId) -> bool {
        id == LIST && self.has_list()
    }

    fn can_scroll_up(&self, id: ElementId) -> bool {
        id == LIST && self.list_scroll.get() > 0.0
    }

    fn scroll_to_top(&self, id: ElementId) {
        if id == LIST {
            self.list_scroll.set(0.0);
            self.scroll_resets.set(self.scroll_resets.get() + 1);
        }
    }

    fn set_visible(&self, id: ElementId, visible: bool) {
        self.visible.borrow_mut().insert(id, visible);
    }

    fn set_panel_top(&self, _id: ElementId, top: f32) {
        self.top.set(top);
        self.top_updates.set(self.top_updates.get() + 1);
    }
}
