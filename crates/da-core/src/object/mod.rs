//! Object system
//!
//! Floor items, limited to what delayed actions touch: corpses and decks.

mod obj;

pub use obj::{Object, ObjectClass, ObjectId};
