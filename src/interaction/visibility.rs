use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::interaction::{MarkKey, MarkKind, MarkRegistry};

/// Emphasis of a mark group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// De-emphasized, low opacity.
    Dim,
    /// Emphasized, full opacity.
    Full,
}

impl Visibility {
    #[must_use]
    pub fn opacity(self, dim_opacity: f64, full_opacity: f64) -> f64 {
        match self {
            Self::Dim => dim_opacity,
            Self::Full => full_opacity,
        }
    }
}

/// What a toggle control addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToggleTarget {
    Individual(String),
    All,
}

/// Flips visibility for one id or for every mark.
///
/// Individual: a FULL bar group dims bar and area; otherwise both become
/// FULL and the area is raised. All: when no area is DIM everything dims,
/// otherwise everything becomes FULL. Returns the state applied, or `None`
/// for an unknown id.
pub fn toggle_selected(registry: &mut MarkRegistry, target: &ToggleTarget) -> Option<Visibility> {
    match target {
        ToggleTarget::Individual(id) => toggle_individual(registry, id),
        ToggleTarget::All => Some(toggle_all(registry)),
    }
}

fn toggle_individual(registry: &mut MarkRegistry, id: &str) -> Option<Visibility> {
    let bar_key = MarkKey::bar(id);
    let area_key = MarkKey::area(id);
    let Some(current) = registry.visibility(&bar_key) else {
        debug!(id, "toggle ignored for unknown id");
        return None;
    };

    let next = match current {
        Visibility::Full => Visibility::Dim,
        Visibility::Dim => Visibility::Full,
    };
    registry.set_opacity(&bar_key, next);
    registry.set_opacity(&area_key, next);
    if next == Visibility::Full {
        registry.raise(id);
    }

    debug!(id, ?next, "toggled id visibility");
    Some(next)
}

fn toggle_all(registry: &mut MarkRegistry) -> Visibility {
    let all_on = registry
        .keys(MarkKind::Area)
        .all(|key| registry.visibility(key) != Some(Visibility::Dim));
    let next = if all_on {
        Visibility::Dim
    } else {
        Visibility::Full
    };

    let keys: Vec<MarkKey> = registry
        .keys(MarkKind::Bar)
        .chain(registry.keys(MarkKind::Area))
        .cloned()
        .collect();
    for key in &keys {
        registry.set_opacity(key, next);
    }

    debug!(?next, groups = keys.len(), "toggled all visibility");
    next
}
