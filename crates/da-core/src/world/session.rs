//! Game session: delayed action scheduling and replay

use serde::{Deserialize, Serialize};

use super::{DactionError, SessionOptions};
use crate::daction::{apply_daction, update_da_counters, ApplyContext, DactionLog, DactionType};
use crate::dungeon::{Level, TravelCache};
use crate::rng::GameRng;
use crate::{COLNO, ROWNO};

/// What replay needs to know about the hero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub x: i8,
    pub y: i8,
    /// Radius of passive magic mapping; 0 if the hero has none
    pub passive_mapping_radius: u8,
}

/// State shared by every level of one game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSession {
    /// Every delayed action scheduled this game, in order
    pub dactions: DactionLog,
    /// Per-level summaries, including delayed-action counters
    pub travel_cache: TravelCache,
    pub hero: Hero,
    pub rng: GameRng,
    #[serde(default)]
    pub options: SessionOptions,
}

impl Default for WorldSession {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

impl WorldSession {
    pub fn new(options: SessionOptions) -> Self {
        let rng = options
            .rng_seed
            .map_or_else(GameRng::from_entropy, GameRng::new);
        Self {
            dactions: DactionLog::new(),
            travel_cache: TravelCache::new(),
            hero: Hero::default(),
            rng,
            options,
        }
    }

    /// Schedule `act` for every level in the world
    ///
    /// The active level is caught up immediately; every other level replays
    /// it when next entered. A counted kind has its counter zeroed on every
    /// known level, since the monsters it counted are about to change.
    pub fn schedule_action(&mut self, level: &mut Level, act: DactionType) {
        tracing::debug!(action = %act, entry = self.dactions.len(), "scheduling delayed action");
        self.dactions.push(act);
        if act.is_counted() {
            self.travel_cache.clear_da_counter(act);
        }
        self.catch_up_active_level(level);
    }

    /// Apply every log entry `level` has not seen yet; returns how many
    ///
    /// # Panics
    ///
    /// If the level's cursor is past the end of the log. Use
    /// [`WorldSession::attach_level`] to check restored levels first.
    pub fn catch_up_active_level(&mut self, level: &mut Level) -> usize {
        assert!(
            level.dactions_done <= self.dactions.len(),
            "level {} has applied {} delayed actions but only {} exist",
            level.id,
            level.dactions_done,
            self.dactions.len()
        );

        let mut applied = 0;
        while let Some(act) = self.dactions.get(level.dactions_done) {
            level.dactions_done += 1;
            let mut ctx = ApplyContext {
                rng: &mut self.rng,
                hero: &self.hero,
                options: &self.options,
            };
            apply_daction(level, act, &mut ctx);
            applied += 1;
        }
        applied
    }

    /// Recount `level`'s monsters and store the result in the travel cache
    pub fn recompute_level_counters(&mut self, level: &Level) {
        let counters = update_da_counters(level);
        tracing::trace!(level = %level.id, ?counters, "recomputed delayed action counters");
        self.travel_cache.level_info_mut(level.id).da_counters = counters;
    }

    /// Monsters still affected by `act`, summed over every known level
    ///
    /// Always 0 for kinds without a counter.
    pub fn query_counter(&self, act: DactionType) -> u32 {
        self.travel_cache.query_da_counter(act)
    }

    /// A freshly generated level has nothing to catch up on
    pub fn register_new_level(&mut self, level: &mut Level) {
        level.dactions_done = self.dactions.len();
        self.recompute_level_counters(level);
    }

    /// Make a stored level active: catch it up, then recount it
    pub fn enter_level(&mut self, level: &mut Level) -> usize {
        let applied = self.catch_up_active_level(level);
        if applied > 0 {
            tracing::debug!(level = %level.id, applied, "caught up on entry");
        }
        self.recompute_level_counters(level);
        applied
    }

    /// Check that a restored level can be replayed into
    ///
    /// Its cursor must fit this session's log and its map must be full size.
    pub fn attach_level(&self, level: &Level) -> Result<(), DactionError> {
        if !level.has_full_map() {
            return Err(DactionError::MapSize {
                level: level.id.to_string(),
                cols: COLNO,
                rows: ROWNO,
            });
        }
        if level.dactions_done > self.dactions.len() {
            return Err(DactionError::CursorAhead {
                cursor: level.dactions_done,
                len: self.dactions.len(),
            });
        }
        Ok(())
    }

    /// Log entries `level` has yet to replay
    pub fn pending_for(&self, level: &Level) -> usize {
        self.dactions.len().saturating_sub(level.dactions_done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::LevelId;
    use crate::monster::{Attitude, God, Holiness, Monster, MonsterKind};

    fn session() -> WorldSession {
        WorldSession::new(SessionOptions {
            rng_seed: Some(7),
            ..SessionOptions::default()
        })
    }

    fn level_with_angel(depth: i8) -> Level {
        let mut level = Level::new(LevelId::dungeon(depth));
        level.add_monster(
            Monster::new(MonsterKind::Angel, "angel", 3, 3)
                .with_attitude(Attitude::Friendly)
                .with_holiness(Holiness::Holy)
                .with_god(God::Zin),
        );
        level
    }

    #[test]
    fn test_seeded_session() {
        assert_eq!(session().rng.seed(), 7);
    }

    #[test]
    fn test_schedule_applies_to_active_level() {
        let mut session = session();
        let mut level = level_with_angel(1);
        session.register_new_level(&mut level);
        assert_eq!(session.query_counter(DactionType::AllyHoly), 1);

        session.schedule_action(&mut level, DactionType::AllyHoly);
        assert_eq!(level.dactions_done, 1);
        assert_eq!(level.monsters[0].attitude, Attitude::Hostile);
        assert_eq!(session.query_counter(DactionType::AllyHoly), 0);
    }

    #[test]
    fn test_catch_up_is_idempotent() {
        let mut session = session();
        let mut active = Level::new(LevelId::dungeon(1));
        session.schedule_action(&mut active, DactionType::RotCorpses);
        session.schedule_action(&mut active, DactionType::ShuffleDecks);

        let mut stored = Level::new(LevelId::dungeon(2));
        assert_eq!(session.pending_for(&stored), 2);
        assert_eq!(session.catch_up_active_level(&mut stored), 2);
        assert_eq!(session.catch_up_active_level(&mut stored), 0);
        assert_eq!(stored.dactions_done, 2);
    }

    #[test]
    fn test_register_new_level_skips_history() {
        let mut session = session();
        let mut active = Level::new(LevelId::dungeon(1));
        session.schedule_action(&mut active, DactionType::AllyHoly);

        let mut fresh = level_with_angel(2);
        session.register_new_level(&mut fresh);
        assert_eq!(session.pending_for(&fresh), 0);
        assert_eq!(fresh.monsters[0].attitude, Attitude::Friendly);
        assert_eq!(session.query_counter(DactionType::AllyHoly), 1);
    }

    #[test]
    fn test_enter_level_recounts() {
        let mut session = session();
        let mut active = Level::new(LevelId::dungeon(1));
        let mut stored = level_with_angel(2);
        stored.add_monster(
            Monster::new(MonsterKind::Zombie, "zombie", 4, 4)
                .with_attitude(Attitude::Friendly)
                .with_holiness(Holiness::Undead),
        );
        session.register_new_level(&mut stored);
        assert_eq!(session.query_counter(DactionType::AllyUnholyEvil), 1);

        // Only the scheduled kind's slot is zeroed, before D:2 is entered.
        session.schedule_action(&mut active, DactionType::AllyUnholyEvil);
        assert_eq!(session.query_counter(DactionType::AllyUnholyEvil), 0);
        assert_eq!(session.query_counter(DactionType::AllyHoly), 1);
        assert_eq!(stored.monsters[1].attitude, Attitude::Friendly);

        assert_eq!(session.enter_level(&mut stored), 1);
        assert_eq!(stored.monsters[1].attitude, Attitude::Hostile);
        assert_eq!(stored.monsters[0].attitude, Attitude::Friendly);
        assert_eq!(session.query_counter(DactionType::AllyUnholyEvil), 0);
        assert_eq!(session.query_counter(DactionType::AllyHoly), 1);
    }

    #[test]
    fn test_attach_level_rejects_cursor_ahead() {
        let session = session();
        let mut level = Level::new(LevelId::dungeon(1));
        assert!(session.attach_level(&level).is_ok());
        level.dactions_done = 3;
        assert_eq!(
            session.attach_level(&level),
            Err(DactionError::CursorAhead { cursor: 3, len: 0 })
        );
        assert_eq!(session.pending_for(&level), 0);
    }

    #[test]
    fn test_attach_level_rejects_short_map() {
        let session = session();
        let mut level = Level::new(LevelId::dungeon(2));
        level.cells.truncate(10);
        assert_eq!(
            session.attach_level(&level),
            Err(DactionError::MapSize {
                level: "D:2".to_string(),
                cols: COLNO,
                rows: ROWNO,
            })
        );
    }

    #[test]
    #[should_panic(expected = "only 0 exist")]
    fn test_catch_up_panics_on_cursor_ahead() {
        let mut session = session();
        let mut level = Level::new(LevelId::dungeon(1));
        level.dactions_done = 1;
        session.catch_up_active_level(&mut level);
    }

    #[test]
    fn test_uncounted_query_is_zero() {
        let mut session = session();
        let mut level = Level::new(LevelId::dungeon(1));
        level.add_monster(
            Monster::new(MonsterKind::Other, "ogre", 2, 2)
                .with_attitude(Attitude::Friendly)
                .gift_of(God::Trog),
        );
        session.register_new_level(&mut level);
        assert_eq!(session.query_counter(DactionType::AllyTrog), 0);
    }

    #[test]
    fn test_session_serde() {
        let mut session = session();
        let mut level = Level::new(LevelId::dungeon(1));
        session.schedule_action(&mut level, DactionType::AllyBeogh);
        session.schedule_action(&mut level, DactionType::Reautomap);
        session.hero = Hero {
            x: 4,
            y: 5,
            passive_mapping_radius: 2,
        };

        let json = serde_json::to_string(&session).unwrap();
        let back: WorldSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.dactions, session.dactions);
        assert_eq!(back.hero, session.hero);
        assert_eq!(back.rng.seed(), 7);
        assert_eq!(back.travel_cache.level_ids(), session.travel_cache.level_ids());
    }
}
