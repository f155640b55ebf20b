use crate::state::PanelState;

/// The four resting offsets, measured from the container top.
///
/// Always ordered `full_expanded <= half_expanded <= collapsed <= hidden`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorSet {
    pub full_expanded: f32,
    pub half_expanded: f32,
    pub collapsed: f32,
    pub hidden: f32,
}

impl AnchorSet {
    /// Offset of a rest state. `None` for transient states.
    pub fn offset_for(&self, state: PanelState) -> Option<f32> {
        match state {
            PanelState::Hidden => Some(self.hidden),
            PanelState::Collapsed => Some(self.collapsed),
            PanelState::HalfExpanded => Some(self.half_expanded),
            PanelState::FullExpanded => Some(self.full_expanded),
            PanelState::Dragging | PanelState::Settling => None,
        }
    }

    /// Span a pointer drag may cover.
    pub fn drag_range(&self) -> f32 {
        self.collapsed - self.full_expanded
    }

    /// Clamps a dragged offset into `[full_expanded, collapsed]`.
    pub fn clamp_drag(&self, top: f32) -> f32 {
        top.clamp(self.full_expanded, self.collapsed)
    }

    pub fn is_ordered(&self) -> bool {
        self.full_expanded <= self.half_expanded
            && self.half_expanded <= self.collapsed
            && self.collapsed <= self.hidden
    }
}

/// Inputs to an anchor pass, read from the host at layout time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorGeometry {
    pub container_height: f32,
    /// Height of the always-visible collapsed content.
    pub collapsed_content_height: f32,
    /// Top plus bottom padding of the panel.
    pub vertical_padding: f32,
    /// Bottom edge of the element the panel is configured to sit below.
    pub full_expanded_override: Option<f32>,
}

/// Keeps the configured offsets and derives a consistent [`AnchorSet`] from
/// them on each layout.
#[derive(Debug, Clone)]
pub struct AnchorModel {
    full_expanded: f32,
    half_expanded: f32,
    geometry: Option<AnchorGeometry>,
    anchors: Option<AnchorSet>,
}

impl AnchorModel {
    pub fn new(full_expanded: f32, half_expanded: f32) -> Self {
        Self {
            full_expanded,
            half_expanded,
            geometry: None,
            anchors: None,
        }
    }

    pub fn anchors(&self) -> Option<&AnchorSet> {
        self.anchors.as_ref()
    }

    pub fn configured_full_expanded(&self) -> f32 {
        self.full_expanded
    }

    pub fn configured_half_expanded(&self) -> f32 {
        self.half_expanded
    }

    pub fn recompute(&mut self, geometry: AnchorGeometry) -> AnchorSet {
        let hidden = geometry.container_height.max(0.0);
        let collapsed_raw = hidden - (geometry.collapsed_content_height + geometry.vertical_padding);
        let collapsed = collapsed_raw.clamp(0.0, hidden);
        let full_raw = geometry
            .full_expanded_override
            .unwrap_or(self.full_expanded);
        let full_expanded = full_raw.clamp(0.0, collapsed);
        let half_expanded = self.half_expanded.clamp(full_expanded, collapsed);

        if collapsed != collapsed_raw || full_expanded != full_raw {
            log::debug!(
                "anchors clamped: collapsed {collapsed_raw} -> {collapsed}, full {full_raw} -> {full_expanded}"
            );
        }

        let anchors = AnchorSet {
            full_expanded,
            half_expanded,
            collapsed,
            hidden,
        };
        self.geometry = Some(geometry);
        self.anchors = Some(anchors);
        anchors
    }

    /// Changes the configured full-expanded offset.
    ///
    /// After a layout the anchors are re-derived right away from the last
    /// geometry, without the below-element override, which the next layout
    /// applies again.
    pub fn set_full_expanded(&mut self, offset: f32) -> Option<AnchorSet> {
        self.full_expanded = offset;
        let geometry = self.geometry?;
        Some(self.recompute(AnchorGeometry {
            full_expanded_override: None,
            ..geometry
        }))
    }
}
