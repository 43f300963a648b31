//! Monster lifecycle hooks used by delayed actions
//!
//! Behaviour events, attitude-change bookkeeping, messages and removal.
//! Everything observable is recorded as a [`LevelEvent`] on the level.

use serde::{Deserialize, Serialize};

use super::{Behaviour, MonsterId};
use crate::dungeon::Level;
use crate::world::LevelEvent;

/// Why a monster left the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillCategory {
    /// Killed by the player
    You,
    /// Killed by another monster
    Monster,
    /// Removed without dying in combat: no corpse, no loot, no credit
    Dismissed,
}

/// Events that change what a monster is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonsterEvent {
    /// Monster becomes aware of the player
    Alert,
}

/// Deliver a behaviour event to a monster
pub fn behaviour_event(level: &mut Level, id: MonsterId, event: MonsterEvent) {
    let Some(mon) = level.monster_mut(id) else {
        return;
    };
    match event {
        MonsterEvent::Alert => {
            if mon.behaviour != Behaviour::Flee {
                mon.behaviour = Behaviour::Seek;
            }
        }
    }
    level.push_event(LevelEvent::Alert { monster: id });
}

/// Record that a monster's allegiance changed
pub fn mons_att_changed(level: &mut Level, id: MonsterId) {
    if level.monster(id).is_some() {
        level.push_event(LevelEvent::AttitudeChanged { monster: id });
    }
}

/// Emit "<name><suffix>" as a message attributed to the monster
pub fn simple_monster_message(level: &mut Level, id: MonsterId, suffix: &str) {
    let Some(mon) = level.monster(id) else {
        return;
    };
    let text = format!("{}{}", capitalize(&mon.name), suffix);
    level.push_event(LevelEvent::Message {
        monster: Some(id),
        text,
    });
}

/// Remove a monster from the level
///
/// Returns false if the monster was already gone.
pub fn monster_die(level: &mut Level, id: MonsterId, cause: KillCategory) -> bool {
    let Some(mut mon) = level.remove_monster(id) else {
        return false;
    };
    mon.hp = 0;
    tracing::trace!(monster = %mon.name, ?cause, "monster removed");
    level.push_event(LevelEvent::MonsterDied { monster: id, cause });
    true
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
