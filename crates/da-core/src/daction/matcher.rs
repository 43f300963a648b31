//! Which monsters a delayed action applies to
//!
//! The same predicate fills the per-level counters and selects the monsters
//! changed on replay, so a counter always counts exactly what replay would
//! touch.

use super::DactionType;
use crate::monster::{Enchantments, God, Holiness, Monster, MonsterFlags, MonsterKind};
use crate::{FREED_SLAVE_NAME, PIKEL_BAND};

/// Undead bound to Yredelemnul
///
/// Counts even if only marked and not yet friendly.
pub fn is_yred_undead_slave(mon: &Monster) -> bool {
    mon.holiness == Holiness::Undead && mon.god == God::Yredelemnul
}

/// Slime that is at peace with the player
pub fn is_fellow_slime(mon: &Monster) -> bool {
    mon.is_slime() && mon.wont_attack()
}

/// Does `act` apply to `mon`?
///
/// Missing or dead monsters never match. Kinds without a monster rule
/// (world mutations, reconversion resets) always return false.
pub fn mons_matches_counter(mon: Option<&Monster>, act: DactionType) -> bool {
    let Some(mon) = mon.filter(|m| m.alive()) else {
        return false;
    };

    match act {
        DactionType::AllyHoly => mon.wont_attack() && mon.god.is_good_god(),
        DactionType::AllyUnholyEvil => mon.wont_attack() && (mon.is_unholy() || mon.is_evil()),
        DactionType::AllyUncleanChaotic => {
            mon.wont_attack() && (mon.is_unclean() || mon.is_chaotic())
        }
        DactionType::AllySpellcaster => mon.wont_attack() && mon.is_actual_spellcaster(),
        DactionType::AllyYredSlave => is_yred_undead_slave(mon),
        // Orcs and the demons their priests summon.
        DactionType::AllyBeogh => mon.wont_attack() && mon.is_god_gift(God::Beogh),
        DactionType::AllySlime => is_fellow_slime(mon),
        // Every plant became friendly the moment the player joined Fedhas.
        DactionType::AllyPlant => mon.is_plant(),

        DactionType::AllyTrog => mon.friendly() && mon.is_god_gift(God::Trog),
        DactionType::HolyPetsGoNeutral => {
            mon.friendly()
                && !mon.has_ench(Enchantments::CHARM)
                && mon.is_holy()
                && mon.is_god_gift(God::ShiningOne)
        }
        DactionType::PikelSlaves => {
            mon.kind == MonsterKind::Slave
                && mon.flags.contains(MonsterFlags::BAND_MEMBER)
                && mon.band.as_deref() == Some(PIKEL_BAND)
                && mon.name != FREED_SLAVE_NAME
        }

        DactionType::OldEnslavedSoulsPoof
        | DactionType::HolyNewAttempt
        | DactionType::SlimeNewAttempt
        | DactionType::ShuffleDecks
        | DactionType::Reautomap
        | DactionType::RemoveJiyvaAltars
        | DactionType::RotCorpses
        | DactionType::TombCtele => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::{Attitude, MonsterTraits};

    fn mon(kind: MonsterKind, name: &str) -> Monster {
        Monster::new(kind, name, 5, 5)
    }

    fn ally(kind: MonsterKind, name: &str) -> Monster {
        mon(kind, name).with_attitude(Attitude::Friendly)
    }

    #[test]
    fn test_missing_or_dead_never_matches() {
        assert!(!mons_matches_counter(None, DactionType::AllyPlant));
        let mut plant = mon(MonsterKind::Plant, "plant").with_holiness(Holiness::Plant);
        assert!(mons_matches_counter(Some(&plant), DactionType::AllyPlant));
        plant.hp = 0;
        assert!(!mons_matches_counter(Some(&plant), DactionType::AllyPlant));
    }

    #[test]
    fn test_holy_ally() {
        let angel = ally(MonsterKind::Angel, "angel").with_god(God::ShiningOne);
        assert!(mons_matches_counter(Some(&angel), DactionType::AllyHoly));
        let hostile = angel.clone().with_attitude(Attitude::Hostile);
        assert!(!mons_matches_counter(Some(&hostile), DactionType::AllyHoly));
        let neutral = angel.clone().with_attitude(Attitude::GoodNeutral);
        assert!(mons_matches_counter(Some(&neutral), DactionType::AllyHoly));
        let xom = angel.with_god(God::Xom);
        assert!(!mons_matches_counter(Some(&xom), DactionType::AllyHoly));
    }

    #[test]
    fn test_unholy_or_evil_ally() {
        let undead = ally(MonsterKind::Zombie, "zombie").with_holiness(Holiness::Undead);
        assert!(mons_matches_counter(Some(&undead), DactionType::AllyUnholyEvil));
        let evil = ally(MonsterKind::Other, "necromancer").with_traits(MonsterTraits::EVIL);
        assert!(mons_matches_counter(Some(&evil), DactionType::AllyUnholyEvil));
        let plain = ally(MonsterKind::Other, "dog");
        assert!(!mons_matches_counter(Some(&plain), DactionType::AllyUnholyEvil));
    }

    #[test]
    fn test_unclean_or_chaotic_ally() {
        let unclean = ally(MonsterKind::Other, "ghoul").with_traits(MonsterTraits::UNCLEAN);
        assert!(mons_matches_counter(Some(&unclean), DactionType::AllyUncleanChaotic));
        let chaotic = ally(MonsterKind::Other, "chaos spawn").with_traits(MonsterTraits::CHAOTIC);
        assert!(mons_matches_counter(Some(&chaotic), DactionType::AllyUncleanChaotic));
        let foe = chaotic.with_attitude(Attitude::Neutral);
        assert!(!mons_matches_counter(Some(&foe), DactionType::AllyUncleanChaotic));
    }

    #[test]
    fn test_spellcaster_ally() {
        let wizard = ally(MonsterKind::Other, "wizard")
            .with_traits(MonsterTraits::ACTUAL_SPELLCASTER)
            .with_spells(&["magic dart"]);
        assert!(mons_matches_counter(Some(&wizard), DactionType::AllySpellcaster));
        let breather = ally(MonsterKind::Other, "dragon").with_spells(&["fire breath"]);
        assert!(!mons_matches_counter(Some(&breather), DactionType::AllySpellcaster));
    }

    #[test]
    fn test_yred_slave_ignores_attitude() {
        let slave = mon(MonsterKind::Zombie, "orc zombie")
            .with_holiness(Holiness::Undead)
            .with_god(God::Yredelemnul);
        assert_eq!(slave.attitude, Attitude::Hostile);
        assert!(mons_matches_counter(Some(&slave), DactionType::AllyYredSlave));
        let living = mon(MonsterKind::Orc, "orc").with_god(God::Yredelemnul);
        assert!(!mons_matches_counter(Some(&living), DactionType::AllyYredSlave));
    }

    #[test]
    fn test_beogh_requires_friendly_gift() {
        let orc = ally(MonsterKind::Orc, "orc warrior").gift_of(God::Beogh);
        assert!(mons_matches_counter(Some(&orc), DactionType::AllyBeogh));
        let hostile = orc.clone().with_attitude(Attitude::Hostile);
        assert!(!mons_matches_counter(Some(&hostile), DactionType::AllyBeogh));
        let ungifted = ally(MonsterKind::Orc, "orc").with_god(God::Beogh);
        assert!(!mons_matches_counter(Some(&ungifted), DactionType::AllyBeogh));
    }

    #[test]
    fn test_fellow_slime() {
        let jelly = mon(MonsterKind::Jelly, "jelly")
            .with_traits(MonsterTraits::SLIME)
            .with_attitude(Attitude::StrictNeutral);
        assert!(mons_matches_counter(Some(&jelly), DactionType::AllySlime));
        let wild = jelly.clone().with_attitude(Attitude::Hostile);
        assert!(!mons_matches_counter(Some(&wild), DactionType::AllySlime));
    }

    #[test]
    fn test_plant_needs_no_friendliness() {
        let plant = mon(MonsterKind::Plant, "oklob plant").with_holiness(Holiness::Plant);
        assert_eq!(plant.attitude, Attitude::Hostile);
        assert!(mons_matches_counter(Some(&plant), DactionType::AllyPlant));
    }

    #[test]
    fn test_trog_gift() {
        let berserker = ally(MonsterKind::Other, "ogre").gift_of(God::Trog);
        assert!(mons_matches_counter(Some(&berserker), DactionType::AllyTrog));
        let neutral = berserker.with_attitude(Attitude::GoodNeutral);
        assert!(!mons_matches_counter(Some(&neutral), DactionType::AllyTrog));
    }

    #[test]
    fn test_holy_pet_neutral() {
        let daeva = ally(MonsterKind::Angel, "daeva")
            .with_holiness(Holiness::Holy)
            .gift_of(God::ShiningOne);
        assert!(mons_matches_counter(Some(&daeva), DactionType::HolyPetsGoNeutral));
        let charmed = daeva.clone().with_enchantments(Enchantments::CHARM);
        assert!(!mons_matches_counter(Some(&charmed), DactionType::HolyPetsGoNeutral));
        let zin = daeva.gift_of(God::Zin);
        assert!(!mons_matches_counter(Some(&zin), DactionType::HolyPetsGoNeutral));
    }

    #[test]
    fn test_pikel_slave() {
        let slave = mon(MonsterKind::Slave, "slave").in_band(PIKEL_BAND);
        assert!(mons_matches_counter(Some(&slave), DactionType::PikelSlaves));

        let mut freed = slave.clone();
        freed.name = FREED_SLAVE_NAME.to_string();
        assert!(!mons_matches_counter(Some(&freed), DactionType::PikelSlaves));

        let other_band = mon(MonsterKind::Slave, "slave").in_band("other_band");
        assert!(!mons_matches_counter(Some(&other_band), DactionType::PikelSlaves));

        let mut loner = slave;
        loner.flags.remove(MonsterFlags::BAND_MEMBER);
        assert!(!mons_matches_counter(Some(&loner), DactionType::PikelSlaves));
    }

    #[test]
    fn test_kinds_without_rule_never_match() {
        let everything = ally(MonsterKind::SpectralThing, "spectral thing")
            .with_holiness(Holiness::Holy)
            .with_traits(MonsterTraits::all())
            .with_flags(MonsterFlags::all());
        for act in [
            DactionType::OldEnslavedSoulsPoof,
            DactionType::HolyNewAttempt,
            DactionType::SlimeNewAttempt,
            DactionType::ShuffleDecks,
            DactionType::Reautomap,
            DactionType::RemoveJiyvaAltars,
            DactionType::RotCorpses,
            DactionType::TombCtele,
        ] {
            assert!(!mons_matches_counter(Some(&everything), act), "{act:?}");
        }
    }
}
