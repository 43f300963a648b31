//! Global delayed-action log

use serde::{Deserialize, Serialize};

use super::DactionType;

/// Append-only, ordered list of every delayed action scheduled this game
///
/// Entries are never removed or reordered. Levels consume it through their
/// own cursor (`Level::dactions_done`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DactionLog {
    actions: Vec<DactionType>,
}

impl DactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, act: DactionType) {
        self.actions.push(act);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<DactionType> {
        self.actions.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = DactionType> + '_ {
        self.actions.iter().copied()
    }

    /// Entries from `cursor` onward
    pub fn since(&self, cursor: usize) -> &[DactionType] {
        self.actions.get(cursor..).unwrap_or(&[])
    }
}
