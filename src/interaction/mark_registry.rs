use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::interaction::Visibility;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkKind {
    Bar,
    Area,
}

/// Addresses every mark of one kind that belongs to one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkKey {
    pub kind: MarkKind,
    pub id: String,
}

impl MarkKey {
    #[must_use]
    pub fn bar(id: impl Into<String>) -> Self {
        Self {
            kind: MarkKind::Bar,
            id: id.into(),
        }
    }

    #[must_use]
    pub fn area(id: impl Into<String>) -> Self {
        Self {
            kind: MarkKind::Area,
            id: id.into(),
        }
    }
}

/// Visibility state and area draw order for every mark group of a scene.
///
/// The registry is the only place mark opacity lives; renderers read it and
/// the toggler writes it.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkRegistry {
    states: IndexMap<MarkKey, Visibility>,
    area_order: Vec<String>,
}

impl MarkRegistry {
    /// Registers a bar group and an area group per id, all `initial`.
    ///
    /// Areas are stacked in `ids` order, the last one on top.
    #[must_use]
    pub fn new(ids: &[String], initial: Visibility) -> Self {
        let mut states = IndexMap::with_capacity(ids.len() * 2);
        for id in ids {
            states.insert(MarkKey::bar(id.as_str()), initial);
        }
        for id in ids {
            states.insert(MarkKey::area(id.as_str()), initial);
        }
        Self {
            states,
            area_order: ids.to_vec(),
        }
    }

    #[must_use]
    pub fn visibility(&self, key: &MarkKey) -> Option<Visibility> {
        self.states.get(key).copied()
    }

    /// Sets one group's state; returns `false` for an unknown key.
    pub fn set_opacity(&mut self, key: &MarkKey, state: Visibility) -> bool {
        match self.states.get_mut(key) {
            Some(current) => {
                *current = state;
                true
            }
            None => false,
        }
    }

    /// Moves an area to the top of the draw order.
    pub fn raise(&mut self, id: &str) -> bool {
        let Some(position) = self.area_order.iter().position(|candidate| candidate == id) else {
            return false;
        };
        let raised = self.area_order.remove(position);
        self.area_order.push(raised);
        true
    }

    /// Area ids bottom to top.
    #[must_use]
    pub fn area_order(&self) -> &[String] {
        &self.area_order
    }

    pub fn keys(&self, kind: MarkKind) -> impl Iterator<Item = &MarkKey> + '_ {
        self.states.keys().filter(move |key| key.kind == kind)
    }

    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.area_order.iter().any(|candidate| candidate == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
