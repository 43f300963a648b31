//! Travel cache: what the world remembers about every level
//!
//! Holds one [`LevelInfo`] per known level. The delayed-action counters live
//! here so they can be queried without loading the level they describe.

use hashbrown::HashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::LevelId;
use crate::daction::{DaCounters, DactionType};

/// Per-level summary kept while the level is not loaded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub id: LevelId,

    /// Living monsters matching each counted delayed action
    pub da_counters: DaCounters,
}

impl LevelInfo {
    pub fn new(id: LevelId) -> Self {
        Self {
            id,
            da_counters: DaCounters::default(),
        }
    }
}

/// Cross-level store of [`LevelInfo`]
#[derive(Debug, Clone, Default)]
pub struct TravelCache {
    levels: HashMap<LevelId, LevelInfo>,
}

impl TravelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level_info(&self, id: LevelId) -> Option<&LevelInfo> {
        self.levels.get(&id)
    }

    /// Get the info for a level, creating an empty one if unknown
    pub fn level_info_mut(&mut self, id: LevelId) -> &mut LevelInfo {
        self.levels.entry(id).or_insert_with(|| LevelInfo::new(id))
    }

    pub fn knows_level(&self, id: LevelId) -> bool {
        self.levels.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Known level ids in sorted order
    pub fn level_ids(&self) -> Vec<LevelId> {
        let mut ids: Vec<LevelId> = self.levels.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Zero a counter on every known level
    ///
    /// Used when an action removes that kind of monster world-wide: the
    /// affected levels may not be loaded, so their true count is unknown
    /// until each is recomputed on its next load.
    pub fn clear_da_counter(&mut self, act: DactionType) {
        let Some(slot) = act.counter_index() else {
            return;
        };
        for info in self.levels.values_mut() {
            info.da_counters.clear_slot(slot);
        }
    }

    /// Sum of a counter across every known level; 0 for uncounted kinds
    pub fn query_da_counter(&self, act: DactionType) -> u32 {
        let Some(slot) = act.counter_index() else {
            return 0;
        };
        self.levels
            .values()
            .map(|info| info.da_counters.get(slot))
            .sum()
    }
}

// Serialized as a list sorted by level id: JSON maps need string keys and a
// stable order keeps save files diffable.
impl Serialize for TravelCache {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut infos: Vec<&LevelInfo> = self.levels.values().collect();
        infos.sort_by_key(|info| info.id);
        infos.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TravelCache {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let infos = Vec::<LevelInfo>::deserialize(deserializer)?;
        let levels = infos.into_iter().map(|info| (info.id, info)).collect();
        Ok(Self { levels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Branch;

    fn cache_with(counts: &[(LevelId, DactionType, u32)]) -> TravelCache {
        let mut cache = TravelCache::new();
        for &(id, act, n) in counts {
            let slot = act.counter_index().unwrap();
            cache.level_info_mut(id).da_counters.set(slot, n);
        }
        cache
    }

    #[test]
    fn test_query_sums_levels() {
        let cache = cache_with(&[
            (LevelId::dungeon(1), DactionType::AllyHoly, 2),
            (LevelId::dungeon(2), DactionType::AllyHoly, 3),
            (LevelId::dungeon(2), DactionType::AllyPlant, 7),
        ]);
        assert_eq!(cache.query_da_counter(DactionType::AllyHoly), 5);
        assert_eq!(cache.query_da_counter(DactionType::AllyPlant), 7);
        assert_eq!(cache.query_da_counter(DactionType::AllyBeogh), 0);
    }

    #[test]
    fn test_query_uncounted_is_zero() {
        let cache = cache_with(&[(LevelId::dungeon(1), DactionType::AllyHoly, 2)]);
        assert_eq!(cache.query_da_counter(DactionType::ShuffleDecks), 0);
    }

    #[test]
    fn test_clear_only_touches_one_slot() {
        let mut cache = cache_with(&[
            (LevelId::dungeon(1), DactionType::AllyHoly, 2),
            (LevelId::new(Branch::Lair, 3), DactionType::AllyHoly, 1),
            (LevelId::new(Branch::Lair, 3), DactionType::AllySlime, 4),
        ]);
        cache.clear_da_counter(DactionType::AllyHoly);
        assert_eq!(cache.query_da_counter(DactionType::AllyHoly), 0);
        assert_eq!(cache.query_da_counter(DactionType::AllySlime), 4);
    }

    #[test]
    fn test_clear_uncounted_is_noop() {
        let mut cache = cache_with(&[(LevelId::dungeon(1), DactionType::AllyHoly, 2)]);
        cache.clear_da_counter(DactionType::RotCorpses);
        assert_eq!(cache.query_da_counter(DactionType::AllyHoly), 2);
    }

    #[test]
    fn test_serde_round_trip() {
        let cache = cache_with(&[
            (LevelId::new(Branch::Tomb, 2), DactionType::AllyYredSlave, 1),
            (LevelId::dungeon(5), DactionType::AllySpellcaster, 6),
        ]);
        let json = serde_json::to_string(&cache).unwrap();
        let back: TravelCache = serde_json::from_str(&json).unwrap();
        assert_eq!(back.level_ids(), cache.level_ids());
        assert_eq!(back.query_da_counter(DactionType::AllySpellcaster), 6);
        assert_eq!(back.query_da_counter(DactionType::AllyYredSlave), 1);
    }
}
