//! Gods and holiness

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Deity a monster serves (or was gifted by)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum God {
    #[default]
    #[strum(serialize = "no god")]
    None = 0,
    Zin = 1,
    #[strum(serialize = "the Shining One")]
    ShiningOne = 2,
    Kikubaaqudgha = 3,
    Yredelemnul = 4,
    Xom = 5,
    Vehumet = 6,
    Okawaru = 7,
    Makhleb = 8,
    #[strum(serialize = "Sif Muna")]
    SifMuna = 9,
    Trog = 10,
    #[strum(serialize = "Nemelex Xobeh")]
    NemelexXobeh = 11,
    Elyvilon = 12,
    Lugonu = 13,
    Beogh = 14,
    Jiyva = 15,
    Fedhas = 16,
    Cheibriados = 17,
    Ashenzari = 18,
}

impl God {
    /// Zin, the Shining One and Elyvilon
    pub const fn is_good_god(&self) -> bool {
        matches!(self, God::Zin | God::ShiningOne | God::Elyvilon)
    }

    pub const fn is_evil_god(&self) -> bool {
        matches!(
            self,
            God::Kikubaaqudgha | God::Makhleb | God::Yredelemnul | God::Beogh | God::Lugonu
        )
    }
}

/// Monster holiness class
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Holiness {
    Holy = 0,
    #[default]
    Natural = 1,
    Undead = 2,
    Demonic = 3,
    Nonliving = 4,
    Plant = 5,
}
