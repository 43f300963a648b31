//! Dungeon level identifier

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Dungeon branch
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[repr(u8)]
pub enum Branch {
    #[default]
    #[strum(serialize = "D")]
    Dungeon = 0,
    Temple = 1,
    Orc = 2,
    Elf = 3,
    Lair = 4,
    Swamp = 5,
    Shoals = 6,
    Snake = 7,
    Spider = 8,
    Slime = 9,
    Vaults = 10,
    Crypt = 11,
    Tomb = 12,
    Hell = 13,
    Abyss = 14,
    Pan = 15,
    Zot = 16,
}

/// Level identifier: branch plus depth within the branch
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct LevelId {
    pub branch: Branch,
    pub depth: i8,
}

impl LevelId {
    pub const fn new(branch: Branch, depth: i8) -> Self {
        Self { branch, depth }
    }

    /// Level of the main dungeon
    pub const fn dungeon(depth: i8) -> Self {
        Self::new(Branch::Dungeon, depth)
    }

    pub fn is_branch(&self, branch: Branch) -> bool {
        self.branch == branch
    }
}

impl core::fmt::Display for LevelId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.branch, self.depth)
    }
}
