use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::controller::ScrollPanel;
use crate::error::PanelError;
use crate::host::{ElementId, PanelHost};

/// Panel controllers attached to the children of one container.
pub struct PanelRegistry {
    host: Rc<dyn PanelHost>,
    container: ElementId,
    panels: FxHashMap<ElementId, ScrollPanel>,
}

impl PanelRegistry {
    pub fn new(host: Rc<dyn PanelHost>, container: ElementId) -> Self {
        Self {
            host,
            container,
            panels: FxHashMap::default(),
        }
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    fn ensure_hosted(&self, id: ElementId) -> Result<(), PanelError> {
        if self.host.parent(id) == Some(self.container) {
            Ok(())
        } else {
            Err(PanelError::NotHosted { id })
        }
    }

    /// Attaches `panel` to its element, replacing any previous controller.
    pub fn attach(&mut self, panel: ScrollPanel) -> Result<Option<ScrollPanel>, PanelError> {
        let id = panel.element();
        self.ensure_hosted(id)?;
        log::debug!("attached panel controller to {id}");
        Ok(self.panels.insert(id, panel))
    }

    pub fn detach(&mut self, id: ElementId) -> Option<ScrollPanel> {
        self.panels.remove(&id)
    }

    /// Controller of the panel element `id`.
    pub fn lookup(&self, id: ElementId) -> Result<ScrollPanel, PanelError> {
        self.ensure_hosted(id)?;
        self.panels
            .get(&id)
            .cloned()
            .ok_or(PanelError::NoController { id })
    }

    /// Lays out every attached panel.
    pub fn layout_all(&self) {
        for panel in self.panels.values() {
            panel.on_layout();
        }
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

impl std::fmt::Debug for PanelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelRegistry")
            .field("container", &self.container)
            .field("panels", &self.panels.len())
            .finish()
    }
}
