//! Things that happened on a level, for the interface to report

use serde::{Deserialize, Serialize};

use crate::monster::{KillCategory, MonsterId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelEvent {
    /// Text for the message window; `monster` is the subject, if any
    Message {
        monster: Option<MonsterId>,
        text: String,
    },
    /// A monster was alerted to the hero
    Alert { monster: MonsterId },
    AttitudeChanged { monster: MonsterId },
    MonsterDied {
        monster: MonsterId,
        cause: KillCategory,
    },
    /// A map feature changed and must be redrawn
    FeatureChanged { x: i8, y: i8 },
}

impl LevelEvent {
    /// Message text, if this is a message
    pub fn text(&self) -> Option<&str> {
        match self {
            LevelEvent::Message { text, .. } => Some(text),
            _ => None,
        }
    }
}
