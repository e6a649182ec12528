mod mark_registry;
pub mod tooltip;
mod visibility;

pub use mark_registry::{MarkKey, MarkKind, MarkRegistry};
pub use tooltip::{OpacityTransition, Tooltip, TooltipContent};
pub use visibility::{ToggleTarget, Visibility, toggle_selected};

use serde::{Deserialize, Serialize};

/// Mark currently under the pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverTarget {
    /// Index into the scene's bar marks.
    Bar(usize),
    /// Area mark of this id.
    Area(String),
}
