//! Map cells and map knowledge

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::monster::God;

/// Terrain type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum CellType {
    #[default]
    Stone = 0,
    RockWall = 1,
    StoneWall = 2,
    ClosedDoor = 3,
    OpenDoor = 4,
    Floor = 5,
    ShallowWater = 6,
    DeepWater = 7,
    Lava = 8,
    StairsDown = 9,
    StairsUp = 10,
    Fountain = 11,
    /// Altar; the deity lives in [`Cell::god`]
    Altar = 12,
}

impl CellType {
    pub const fn is_wall(&self) -> bool {
        matches!(self, CellType::Stone | CellType::RockWall | CellType::StoneWall)
    }

    pub const fn symbol(&self) -> char {
        match self {
            CellType::Stone => ' ',
            CellType::RockWall | CellType::StoneWall => '#',
            CellType::ClosedDoor => '+',
            CellType::OpenDoor => '\'',
            CellType::Floor => '.',
            CellType::ShallowWater | CellType::DeepWater => '~',
            CellType::Lava => '}',
            CellType::StairsDown => '>',
            CellType::StairsUp => '<',
            CellType::Fountain => '{',
            CellType::Altar => '_',
        }
    }
}

/// A single map cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Terrain type
    pub typ: CellType,

    /// Deity of an altar, `God::None` elsewhere
    pub god: God,
}

impl Cell {
    pub const fn stone() -> Self {
        Self {
            typ: CellType::Stone,
            god: God::None,
        }
    }

    pub const fn floor() -> Self {
        Self {
            typ: CellType::Floor,
            god: God::None,
        }
    }

    pub const fn altar(god: God) -> Self {
        Self {
            typ: CellType::Altar,
            god,
        }
    }

    pub fn is_altar_of(&self, god: God) -> bool {
        self.typ == CellType::Altar && self.god == god
    }
}

bitflags! {
    /// What the player knows about a cell
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct MapKnowledge: u8 {
        /// Seen directly
        const SEEN = 0x01;
        /// Revealed by magic mapping (passive or active)
        const MAGIC_MAPPED = 0x02;
    }
}

impl Serialize for MapKnowledge {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MapKnowledge {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(MapKnowledge::from_bits_truncate(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_altar_of() {
        let cell = Cell::altar(God::Jiyva);
        assert!(cell.is_altar_of(God::Jiyva));
        assert!(!cell.is_altar_of(God::Zin));
        assert!(!Cell::floor().is_altar_of(God::None));
        assert_eq!(cell.typ.symbol(), '_');
    }

    #[test]
    fn test_knowledge_serde() {
        let k = MapKnowledge::SEEN | MapKnowledge::MAGIC_MAPPED;
        let json = serde_json::to_string(&k).unwrap();
        assert_eq!(json, "3");
        let back: MapKnowledge = serde_json::from_str(&json).unwrap();
        assert_eq!(back, k);
    }
}
