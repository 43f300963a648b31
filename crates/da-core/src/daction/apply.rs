//! Applying one delayed action to the active level
//!
//! Each kind maps to a stateless handler. All hostility kinds share one
//! handler parameterized by the kind.

use super::{mons_matches_counter, DactionType};
use crate::dungeon::{Branch, Cell, Level};
use crate::monster::{
    behaviour_event, monster_die, mons_att_changed, simple_monster_message, Attitude, Behaviour,
    Enchantments, God, KillCategory, MonsterEvent, MonsterFlags,
};
use crate::object::ObjectClass;
use crate::rng::GameRng;
use crate::world::{Hero, LevelEvent, SessionOptions};
use crate::{CORPSE_ROTTEN, FREED_SLAVE_NAME};

/// Session state a handler may read or advance
pub struct ApplyContext<'a> {
    pub rng: &'a mut GameRng,
    pub hero: &'a Hero,
    pub options: &'a SessionOptions,
}

type Handler = fn(&mut Level, DactionType, &mut ApplyContext<'_>);

fn handler(act: DactionType) -> Handler {
    match act {
        DactionType::AllyHoly
        | DactionType::AllyUnholyEvil
        | DactionType::AllyUncleanChaotic
        | DactionType::AllySpellcaster
        | DactionType::AllyYredSlave
        | DactionType::AllyBeogh
        | DactionType::AllySlime
        | DactionType::AllyPlant
        | DactionType::AllyTrog => go_hostile,
        DactionType::OldEnslavedSoulsPoof => release_souls,
        DactionType::HolyNewAttempt | DactionType::SlimeNewAttempt => allow_new_attempt,
        DactionType::HolyPetsGoNeutral | DactionType::PikelSlaves => go_neutral,
        DactionType::ShuffleDecks => shuffle_decks,
        DactionType::Reautomap => reautomap,
        DactionType::RemoveJiyvaAltars => remove_jiyva_altars,
        DactionType::RotCorpses => rot_corpses,
        DactionType::TombCtele => tomb_ctele,
    }
}

/// Apply `act` to `level`
pub fn apply_daction(level: &mut Level, act: DactionType, ctx: &mut ApplyContext<'_>) {
    tracing::debug!(level = %level.id, action = %act, "applying delayed action");
    handler(act)(level, act, ctx);
}

const TURNS_AGAINST_YOU: &str = " turns against you!";
const TROG_RAGE: &str = " turns on you in a berserk rage!";

fn go_hostile(level: &mut Level, act: DactionType, _ctx: &mut ApplyContext<'_>) {
    for id in level.living_monster_ids() {
        if !mons_matches_counter(level.monster(id), act) {
            continue;
        }
        let Some(mon) = level.monster_mut(id) else {
            continue;
        };
        tracing::trace!(monster = %mon.name, "going hostile");
        let was_hostile = mon.attitude == Attitude::Hostile;
        mon.attitude = Attitude::Hostile;
        mon.del_ench(Enchantments::CHARM);
        // Reconverting to Fedhas or Jiyva wins these back.
        if matches!(act, DactionType::AllyPlant | DactionType::AllySlime) {
            mon.flags.remove(MonsterFlags::ATT_CHANGE_ATTEMPT);
        }

        behaviour_event(level, id, MonsterEvent::Alert);
        // Plants and Yred's marked undead match whatever their attitude.
        if was_hostile {
            continue;
        }
        mons_att_changed(level, id);

        let message = if act == DactionType::AllyTrog {
            TROG_RAGE
        } else {
            TURNS_AGAINST_YOU
        };
        simple_monster_message(level, id, message);
    }
}

fn release_souls(level: &mut Level, _act: DactionType, _ctx: &mut ApplyContext<'_>) {
    for id in level.living_monster_ids() {
        if !level.monster(id).is_some_and(|m| m.is_enslaved_soul()) {
            continue;
        }
        simple_monster_message(level, id, " is freed.");
        monster_die(level, id, KillCategory::Dismissed);
    }
}

fn allow_new_attempt(level: &mut Level, act: DactionType, _ctx: &mut ApplyContext<'_>) {
    for mon in level.monsters.iter_mut().filter(|m| m.alive()) {
        let eligible = match act {
            DactionType::HolyNewAttempt => mon.is_holy(),
            _ => mon.is_slime(),
        };
        if eligible {
            mon.flags.remove(MonsterFlags::ATT_CHANGE_ATTEMPT);
        }
    }
}

fn go_neutral(level: &mut Level, act: DactionType, _ctx: &mut ApplyContext<'_>) {
    for id in level.living_monster_ids() {
        if !mons_matches_counter(level.monster(id), act) {
            continue;
        }
        if let Some(mon) = level.monster_mut(id) {
            mon.attitude = Attitude::GoodNeutral;
        }
        mons_att_changed(level, id);

        if act == DactionType::PikelSlaves {
            if let Some(mon) = level.monster_mut(id) {
                mon.flags |= MonsterFlags::NAME_REPLACE
                    | MonsterFlags::NAME_DESCRIPTOR
                    | MonsterFlags::NAME_NOCORPSE;
                mon.name = FREED_SLAVE_NAME.to_string();
            }
        } else {
            simple_monster_message(level, id, " becomes indifferent.");
        }

        if let Some(mon) = level.monster_mut(id) {
            mon.behaviour = Behaviour::Wander;
        }
    }
}

fn shuffle_decks(level: &mut Level, _act: DactionType, ctx: &mut ApplyContext<'_>) {
    let shuffled = level.shuffle_all_decks(ctx.rng);
    tracing::trace!(shuffled, "decks shuffled");
}

fn reautomap(level: &mut Level, _act: DactionType, ctx: &mut ApplyContext<'_>) {
    level.reautomap((ctx.hero.x, ctx.hero.y), ctx.hero.passive_mapping_radius);
}

fn remove_jiyva_altars(level: &mut Level, _act: DactionType, ctx: &mut ApplyContext<'_>) {
    for (x, y) in level.interior(ctx.options.altar_border) {
        if level.cell(x, y).is_altar_of(God::Jiyva) {
            *level.cell_mut(x, y) = Cell::floor();
            level.push_event(LevelEvent::FeatureChanged {
                x: x as i8,
                y: y as i8,
            });
        }
    }
}

fn rot_corpses(level: &mut Level, _act: DactionType, _ctx: &mut ApplyContext<'_>) {
    for obj in level
        .objects
        .iter_mut()
        .filter(|o| o.class == ObjectClass::Corpse)
    {
        obj.special = CORPSE_ROTTEN;
    }
}

fn tomb_ctele(level: &mut Level, _act: DactionType, ctx: &mut ApplyContext<'_>) {
    if !level.id.is_branch(Branch::Tomb) || !level.flags.no_tele_control {
        return;
    }
    level.flags.no_tele_control = false;
    if level.id.depth == ctx.options.tomb_message_depth {
        level.push_event(LevelEvent::Message {
            monster: None,
            text: "You feel the restraints on your teleport control lift.".to_string(),
        });
    }
}
