//! Delayed level actions
//!
//! A delayed action (daction) is a change that must reach every level in the
//! world, such as "holy allies turn hostile" after the player abandons a good
//! god. It is appended to a global log and each level replays the log entries
//! it has not seen yet whenever it is active. Kinds below [`NUM_DA_COUNTERS`]
//! also keep a per-level count of the monsters they would affect, so the game
//! can ask whether any are left anywhere without loading every level.

mod apply;
mod counters;
mod log;
pub mod matcher;

pub use apply::{apply_daction, ApplyContext};
pub use counters::{update_da_counters, DaCounters};
pub use log::DactionLog;
pub use matcher::mons_matches_counter;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::world::DactionError;

/// Number of counter slots; counted kinds use tags below this
///
/// Slots past the last counted kind are reserved so new counted kinds do not
/// shift the tags of uncounted ones in existing saves.
pub const NUM_DA_COUNTERS: usize = 16;

/// Size of the tag space, reserved counter slots included
pub const NUM_DACTIONS: usize = 27;

/// Kind of delayed action
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum DactionType {
    // Counted kinds.
    AllyHoly = 0,
    AllyUnholyEvil = 1,
    AllyUncleanChaotic = 2,
    AllySpellcaster = 3,
    AllyYredSlave = 4,
    AllyBeogh = 5,
    AllySlime = 6,
    AllyPlant = 7,

    // Kinds without a counter.
    OldEnslavedSoulsPoof = 16,
    HolyNewAttempt = 17,
    SlimeNewAttempt = 18,
    HolyPetsGoNeutral = 19,
    AllyTrog = 20,
    ShuffleDecks = 21,
    Reautomap = 22,
    RemoveJiyvaAltars = 23,
    PikelSlaves = 24,
    RotCorpses = 25,
    TombCtele = 26,
}

impl DactionType {
    /// Stable tag, as stored in saves
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn is_counted(self) -> bool {
        (self as usize) < NUM_DA_COUNTERS
    }

    /// Counter slot, for counted kinds
    pub const fn counter_index(self) -> Option<usize> {
        if self.is_counted() {
            Some(self as usize)
        } else {
            None
        }
    }

    /// All counted kinds, in slot order
    pub fn counted() -> impl Iterator<Item = DactionType> {
        DactionType::iter().filter(|act| act.is_counted())
    }

    /// Kinds that flip matching allies to hostile
    pub const fn is_hostility(self) -> bool {
        matches!(
            self,
            DactionType::AllyHoly
                | DactionType::AllyUnholyEvil
                | DactionType::AllyUncleanChaotic
                | DactionType::AllySpellcaster
                | DactionType::AllyYredSlave
                | DactionType::AllyBeogh
                | DactionType::AllySlime
                | DactionType::AllyPlant
                | DactionType::AllyTrog
        )
    }

    /// Diagnostic name
    pub const fn name(self) -> &'static str {
        match self {
            DactionType::AllyHoly => "holy beings go hostile",
            DactionType::AllyUnholyEvil => "unholy/evil go hostile",
            DactionType::AllyUncleanChaotic => "unclean/chaotic go hostile",
            DactionType::AllySpellcaster => "spellcasters go hostile",
            DactionType::AllyYredSlave => "yred slaves go hostile",
            DactionType::AllyBeogh => "beogh orcs and their summons go hostile",
            DactionType::AllySlime => "fellow slimes go hostile",
            DactionType::AllyPlant => "plants go hostile (allowing reconversion)",
            DactionType::OldEnslavedSoulsPoof => "old enslaved souls go poof",
            DactionType::HolyNewAttempt => "holy beings allow another conversion attempt",
            DactionType::SlimeNewAttempt => "slimes allow another conversion attempt",
            DactionType::HolyPetsGoNeutral => "holy beings go neutral",
            DactionType::AllyTrog => "Trog's gifts go hostile",
            DactionType::ShuffleDecks => "shuffle decks",
            DactionType::Reautomap => "reapply passive mapping",
            DactionType::RemoveJiyvaAltars => "remove Jiyva altars",
            DactionType::PikelSlaves => "Pikel's slaves go good-neutral",
            DactionType::RotCorpses => "corpses rot",
            DactionType::TombCtele => "Tomb loses -cTele",
        }
    }
}

impl core::fmt::Display for DactionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<DactionType> for u8 {
    fn from(act: DactionType) -> u8 {
        act.index()
    }
}

impl TryFrom<u8> for DactionType {
    type Error = DactionError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        DactionType::iter()
            .find(|act| act.index() == tag)
            .ok_or(DactionError::UnknownDaction(tag))
    }
}
