//! Per-level delayed-action counters

use serde::{Deserialize, Serialize};

use super::{mons_matches_counter, DactionType, NUM_DA_COUNTERS};
use crate::dungeon::Level;

/// One count per counted delayed action
///
/// A slot is only ever raised by [`update_da_counters`]. Scheduling an action
/// zeroes its slot everywhere, so a slot may undercount until the level is
/// next recomputed but never overcounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaCounters([u32; NUM_DA_COUNTERS]);

impl DaCounters {
    pub fn get(&self, slot: usize) -> u32 {
        self.0.get(slot).copied().unwrap_or(0)
    }

    pub fn set(&mut self, slot: usize, value: u32) {
        if let Some(c) = self.0.get_mut(slot) {
            *c = value;
        }
    }

    pub fn clear_slot(&mut self, slot: usize) {
        self.set(slot, 0);
    }

    /// Count for a delayed action; 0 for kinds without a counter
    pub fn count(&self, act: DactionType) -> u32 {
        act.counter_index().map_or(0, |slot| self.get(slot))
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

/// Count, from scratch, the living monsters on `level` matching each counted kind
pub fn update_da_counters(level: &Level) -> DaCounters {
    let mut counters = DaCounters::default();
    for mon in level.living_monsters() {
        for act in DactionType::counted() {
            if mons_matches_counter(Some(mon), act) {
                let slot = act.index() as usize;
                counters.0[slot] += 1;
            }
        }
    }
    counters
}
