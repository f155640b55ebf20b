use slidepanel_animation::Easing;
use slidepanel_foundation::ViewConfiguration;

use crate::host::ElementId;

/// Construction-time settings of a panel controller.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    /// Offset of the half-expanded anchor from the container top.
    pub half_expanded_offset: f32,
    /// Offset of the full-expanded anchor from the container top.
    pub full_expanded_offset: f32,
    /// When set, the full-expanded anchor is the bottom edge of this element.
    pub below_to: Option<ElementId>,
    pub view_configuration: ViewConfiguration,
    pub settle_easing: Easing,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            half_expanded_offset: 0.0,
            full_expanded_offset: 0.0,
            below_to: None,
            view_configuration: ViewConfiguration::default(),
            settle_easing: Easing::default(),
        }
    }
}

impl PanelConfig {
    pub fn with_half_expanded_offset(mut self, offset: f32) -> Self {
        self.half_expanded_offset = offset;
        self
    }

    pub fn with_full_expanded_offset(mut self, offset: f32) -> Self {
        self.full_expanded_offset = offset;
        self
    }

    pub fn with_below_to(mut self, element: ElementId) -> Self {
        self.below_to = Some(element);
        self
    }

    pub fn with_view_configuration(mut self, view_configuration: ViewConfiguration) -> Self {
        self.view_configuration = view_configuration;
        self
    }

    /// Distance a pointer travels before the panel may take the gesture.
    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.view_configuration = self.view_configuration.with_touch_slop(touch_slop);
        self
    }

    pub fn with_max_fling_velocity(mut self, max_fling_velocity: f32) -> Self {
        self.view_configuration = self
            .view_configuration
            .with_max_fling_velocity(max_fling_velocity);
        self
    }

    pub fn with_settle_easing(mut self, easing: Easing) -> Self {
        self.settle_easing = easing;
        self
    }
}
