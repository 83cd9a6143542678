//! Multi-selection of tasks
//!
//! The selection belongs to the caller (the UI layer). Bulk operations take
//! it by `&mut` and clear it once they have consumed it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Set of task ids picked with a modified click
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: HashSet<Uuid>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present.
    ///
    /// Returns whether the id is selected afterwards.
    pub fn toggle(&mut self, id: Uuid) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl FromIterator<Uuid> for Selection {
    fn from_iter<I: IntoIterator<Item = Uuid>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
