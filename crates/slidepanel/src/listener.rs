use crate::controller::ScrollPanel;
use crate::state::PanelState;

/// Observer of a panel's state and position.
///
/// Callbacks run after the controller has finished updating itself, so it
/// is safe to query or drive the panel from inside them.
pub trait PanelCallback {
    fn on_state_changed(&self, panel: &ScrollPanel, old: PanelState, new: PanelState);

    /// Called with the new panel top each time a gesture or settle moves it.
    fn on_slide(&self, panel: &ScrollPanel, offset: f32);

    fn on_expanded_content_visibility(&self, _panel: &ScrollPanel, _visible: bool) {}
}
