//! Monster instances

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{God, Holiness};

/// Unique identifier for monster instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId(pub u32);

impl MonsterId {
    pub const NONE: MonsterId = MonsterId(0);
}

/// Attitude toward the player
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Attitude {
    #[default]
    Hostile = 0,
    /// Neutral, attacks anything including the player
    Neutral = 1,
    /// Neutral toward everyone (Jiyva's slimes)
    StrictNeutral = 2,
    /// Neutral, never attacks the player
    GoodNeutral = 3,
    Friendly = 4,
}

/// Current behaviour
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Behaviour {
    Sleep = 0,
    #[default]
    Wander = 1,
    Seek = 2,
    Flee = 3,
    Lurk = 4,
}

/// Monster species, for the few species delayed actions care about
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum MonsterKind {
    #[default]
    Other = 0,
    Slave = 1,
    SpectralThing = 2,
    AbominationSmall = 3,
    AbominationLarge = 4,
    Orc = 5,
    Angel = 6,
    Jelly = 7,
    Plant = 8,
    Zombie = 9,
}

impl MonsterKind {
    pub const fn is_abomination(&self) -> bool {
        matches!(self, MonsterKind::AbominationSmall | MonsterKind::AbominationLarge)
    }
}

bitflags! {
    /// Intrinsic monster traits (from the species definition)
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct MonsterTraits: u32 {
        const EVIL = 0x0001;
        const UNCLEAN = 0x0002;
        const CHAOTIC = 0x0004;
        const SLIME = 0x0008;
        /// Casts real spells rather than innate abilities
        const ACTUAL_SPELLCASTER = 0x0010;
    }
}

bitflags! {
    /// Per-instance monster flags (MF_*)
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct MonsterFlags: u32 {
        /// The player already tried to convert this monster
        const ATT_CHANGE_ATTEMPT = 0x0001;
        const GOD_GIFT = 0x0002;
        const BAND_MEMBER = 0x0004;
        const ENSLAVED_SOUL = 0x0008;
        const NAME_REPLACE = 0x0010;
        const NAME_DESCRIPTOR = 0x0020;
        const NAME_NOCORPSE = 0x0040;
        const CREATED_FRIENDLY = 0x0080;
    }
}

bitflags! {
    /// Active enchantments
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Enchantments: u16 {
        const CHARM = 0x0001;
        const BERSERK = 0x0002;
        const HASTE = 0x0004;
        const SLOW = 0x0008;
        const INVIS = 0x0010;
    }
}

macro_rules! bits_serde {
    ($ty:ty, $bits:ty) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                self.bits().serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let bits = <$bits>::deserialize(deserializer)?;
                Ok(Self::from_bits_truncate(bits))
            }
        }
    };
}

bits_serde!(MonsterTraits, u32);
bits_serde!(MonsterFlags, u32);
bits_serde!(Enchantments, u16);

/// Monster instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    /// Unique identifier
    pub id: MonsterId,

    pub kind: MonsterKind,

    /// Display name
    pub name: String,

    /// Position
    pub x: i8,
    pub y: i8,

    /// Hit points (0 or less = dead)
    pub hp: i32,

    pub attitude: Attitude,
    pub behaviour: Behaviour,

    /// Deity served, or the giver for god gifts
    pub god: God,
    pub holiness: Holiness,

    pub traits: MonsterTraits,
    pub flags: MonsterFlags,
    pub enchantments: Enchantments,

    /// Known spells
    pub spells: Vec<String>,

    /// Band tag for monsters generated as part of a named band
    pub band: Option<String>,
}

impl Monster {
    /// Create a new hostile natural monster
    pub fn new(kind: MonsterKind, name: impl Into<String>, x: i8, y: i8) -> Self {
        Self {
            id: MonsterId::NONE,
            kind,
            name: name.into(),
            x,
            y,
            hp: 1,
            attitude: Attitude::Hostile,
            behaviour: Behaviour::Wander,
            god: God::None,
            holiness: Holiness::Natural,
            traits: MonsterTraits::empty(),
            flags: MonsterFlags::empty(),
            enchantments: Enchantments::empty(),
            spells: Vec::new(),
            band: None,
        }
    }

    pub fn with_attitude(mut self, attitude: Attitude) -> Self {
        self.attitude = attitude;
        self
    }

    pub fn with_god(mut self, god: God) -> Self {
        self.god = god;
        self
    }

    /// Mark as a gift from `god`
    pub fn gift_of(mut self, god: God) -> Self {
        self.god = god;
        self.flags |= MonsterFlags::GOD_GIFT;
        self
    }

    pub fn with_holiness(mut self, holiness: Holiness) -> Self {
        self.holiness = holiness;
        self
    }

    pub fn with_traits(mut self, traits: MonsterTraits) -> Self {
        self.traits |= traits;
        self
    }

    pub fn with_flags(mut self, flags: MonsterFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_enchantments(mut self, enchantments: Enchantments) -> Self {
        self.enchantments |= enchantments;
        self
    }

    pub fn with_spells(mut self, spells: &[&str]) -> Self {
        self.spells = spells.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn in_band(mut self, band: impl Into<String>) -> Self {
        self.band = Some(band.into());
        self.flags |= MonsterFlags::BAND_MEMBER;
        self
    }

    pub fn alive(&self) -> bool {
        self.hp > 0
    }

    /// Won't attack the player (friendly or good/strict neutral)
    pub fn wont_attack(&self) -> bool {
        matches!(
            self.attitude,
            Attitude::Friendly | Attitude::GoodNeutral | Attitude::StrictNeutral
        )
    }

    pub fn friendly(&self) -> bool {
        self.attitude == Attitude::Friendly
    }

    pub fn is_holy(&self) -> bool {
        self.holiness == Holiness::Holy
    }

    /// Undead or demonic
    pub fn is_unholy(&self) -> bool {
        matches!(self.holiness, Holiness::Undead | Holiness::Demonic)
    }

    pub fn is_evil(&self) -> bool {
        self.traits.contains(MonsterTraits::EVIL) || self.god.is_evil_god()
    }

    pub fn is_unclean(&self) -> bool {
        self.traits.contains(MonsterTraits::UNCLEAN)
    }

    pub fn is_chaotic(&self) -> bool {
        self.traits.contains(MonsterTraits::CHAOTIC)
    }

    /// Has real spells, not just innate abilities
    pub fn is_actual_spellcaster(&self) -> bool {
        self.traits.contains(MonsterTraits::ACTUAL_SPELLCASTER) && !self.spells.is_empty()
    }

    pub fn is_plant(&self) -> bool {
        self.holiness == Holiness::Plant
    }

    pub fn is_slime(&self) -> bool {
        self.traits.contains(MonsterTraits::SLIME)
    }

    pub fn is_god_gift(&self, god: God) -> bool {
        self.god == god && self.flags.contains(MonsterFlags::GOD_GIFT)
    }

    /// A soul bound by Yredelemnul that outlived its master's favour
    pub fn is_enslaved_soul(&self) -> bool {
        if !self.flags.contains(MonsterFlags::ENSLAVED_SOUL) {
            return false;
        }
        self.kind.is_abomination()
            || (self.kind == MonsterKind::SpectralThing && self.holiness == Holiness::Undead)
    }

    pub fn has_ench(&self, ench: Enchantments) -> bool {
        self.enchantments.intersects(ench)
    }

    /// Remove an enchantment; returns whether it was present
    pub fn del_ench(&mut self, ench: Enchantments) -> bool {
        let had = self.has_ench(ench);
        self.enchantments.remove(ench);
        had
    }
}
