//! Monster system
//!
//! Only the parts of a monster that delayed actions read or change.

mod god;
mod lifecycle;
mod monst;

pub use god::{God, Holiness};
pub use lifecycle::{
    behaviour_event, monster_die, mons_att_changed, simple_monster_message, KillCategory,
    MonsterEvent,
};
pub use monst::{
    Attitude, Behaviour, Enchantments, Monster, MonsterFlags, MonsterId, MonsterKind, MonsterTraits,
};
