use crate::host::ElementId;
use crate::state::PanelState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelError {
    /// A transient state was passed where only rest states are accepted.
    IllegalState { state: PanelState },
    /// A raw state code outside 1..=6.
    UnknownState { raw: i32 },
    /// The element is not a direct child of the registry's container.
    NotHosted { id: ElementId },
    /// The element is hosted but no panel controller is attached to it.
    NoController { id: ElementId },
}

impl std::fmt::Display for PanelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelError::IllegalState { state } => {
                write!(f, "illegal state argument: {state}")
            }
            PanelError::UnknownState { raw } => write!(f, "unknown panel state code {raw}"),
            PanelError::NotHosted { id } => {
                write!(f, "element {id} is not a child of the panel container")
            }
            PanelError::NoController { id } => {
                write!(f, "element {id} has no panel controller attached")
            }
        }
    }
}

impl std::error::Error for PanelError {}
