//! Dungeon system
//!
//! Level structure, cells, level identifiers and the travel cache.

mod cell;
mod dlevel;
mod level;
mod travel;

pub use cell::{Cell, CellType, MapKnowledge};
pub use dlevel::{Branch, LevelId};
pub use level::{Level, LevelFlags};
pub use travel::{LevelInfo, TravelCache};
