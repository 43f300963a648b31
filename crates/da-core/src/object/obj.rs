//! Object instances

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Unique identifier for object instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl ObjectId {
    pub const NONE: ObjectId = ObjectId(0);
}

/// Object base type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum ObjectClass {
    Weapon = 0,
    Armour = 1,
    Food = 2,
    /// A body that can still rot
    Corpse = 3,
    Skeleton = 4,
    /// Deck of cards
    Deck = 5,
    #[default]
    Other = 6,
}

/// Object instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    /// Unique identifier
    pub id: ObjectId,

    pub class: ObjectClass,

    pub name: String,

    /// Position (when on floor)
    pub x: i8,
    pub y: i8,

    /// Class-specific state; for corpses, nonzero once rotten
    pub special: i32,

    /// Remaining cards, top first (decks only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<String>,
}

impl Object {
    pub fn new(class: ObjectClass, name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::NONE,
            class,
            name: name.into(),
            x: 0,
            y: 0,
            special: 0,
            cards: Vec::new(),
        }
    }

    /// A fresh corpse of the named monster
    pub fn corpse(of: &str) -> Self {
        Self::new(ObjectClass::Corpse, format!("{of} corpse"))
    }

    pub fn deck(name: impl Into<String>, cards: &[&str]) -> Self {
        let mut deck = Self::new(ObjectClass::Deck, name);
        deck.cards = cards.iter().map(|c| c.to_string()).collect();
        deck
    }

    pub fn is_rotten(&self) -> bool {
        self.class == ObjectClass::Corpse && self.special != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpse_starts_fresh() {
        let c = Object::corpse("jackal");
        assert_eq!(c.class, ObjectClass::Corpse);
        assert_eq!(c.name, "jackal corpse");
        assert!(!c.is_rotten());
    }

    #[test]
    fn test_deck_cards_serde() {
        let deck = Object::deck("deck of wonders", &["blade", "shaft"]);
        let json = serde_json::to_string(&deck).unwrap();
        let back: Object = serde_json::from_str(&json).unwrap();
        assert_eq!(back, deck);

        let sword = Object::new(ObjectClass::Weapon, "long sword");
        let json = serde_json::to_string(&sword).unwrap();
        assert!(!json.contains("cards"));
    }
}
