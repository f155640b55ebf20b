use slidepanel_foundation::{EdgeInsets, Rect, Size};

/// Identifies an element in the host's tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The element tree the panel lives in.
///
/// The controller never owns elements; it reads geometry through this trait
/// and writes back only the panel position, the expanded content visibility
/// and the inner scroll reset. All rectangles are in container coordinates.
///
/// Query methods run while the controller is mid-update and must not call
/// back into the panel. The write methods run after it has settled.
pub trait PanelHost {
    fn container_size(&self) -> Size;

    fn parent(&self, id: ElementId) -> Option<ElementId>;

    fn child_count(&self, id: ElementId) -> usize;

    fn child_at(&self, id: ElementId, index: usize) -> Option<ElementId>;

    /// `None` once the element is gone.
    fn bounds(&self, id: ElementId) -> Option<Rect>;

    fn padding(&self, id: ElementId) -> EdgeInsets;

    /// Whether the element is currently displayed at all.
    fn is_shown(&self, id: ElementId) -> bool;

    fn is_nested_scrolling_enabled(&self, id: ElementId) -> bool;

    /// Whether the scrollable element can still scroll towards its start.
    fn can_scroll_up(&self, id: ElementId) -> bool;

    fn scroll_to_top(&self, id: ElementId);

    fn set_visible(&self, id: ElementId, visible: bool);

    /// Moves the panel so its top edge sits at `top`.
    fn set_panel_top(&self, id: ElementId, top: f32);
}

/// First element, depth-first in child order starting at `root` itself, that
/// participates in nested scrolling.
pub fn find_scrolling_child(host: &dyn PanelHost, root: ElementId) -> Option<ElementId> {
    if host.is_nested_scrolling_enabled(root) {
        return Some(root);
    }
    (0..host.child_count(root))
        .filter_map(|index| host.child_at(root, index))
        .find_map(|child| find_scrolling_child(host, child))
}
