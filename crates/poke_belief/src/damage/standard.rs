//! Reference damage formula.
//!
//! A Gen 5+ singles calculation over the [`BattleView`] seam. It covers the
//! common mechanics (boosts, STAB, type chart, weather, crits, burn, screens
//! and a handful of items and abilities) and is deliberately replaceable:
//! the estimator only sees the [`DamageFormula`] trait.

use super::formula::{apply_modifier, apply_modifier_floor, chain_mods, get_base_damage};
use super::hooks::{ability_hooks, item_hooks, HookContext};
use super::pipeline::{final_damage_rolls, FinalMods};
use super::{DamageFormula, DamageRange, Modifier};
use crate::error::FormulaError;
use crate::moves::{MoveCategory, MoveInfo};
use crate::state::{SideConditions, Status};
use crate::stats::{apply_stat_boost, BattleStat};
use crate::types::{is_immune_by_ability, type_effectiveness, Type};
use crate::view::{BattleView, Combatant, Side};

/// Singles screens halve damage.
const SCREEN_MOD: Modifier = Modifier::HALF;

#[derive(Clone, Copy, Debug, Default)]
pub struct StandardFormula;

impl StandardFormula {
    pub fn new() -> Self {
        Self
    }

    /// All 16 rolls, or `None` for a move that cannot deal damage
    /// (status move or immunity).
    pub fn rolls(
        &self,
        attacker_id: &str,
        defender_id: &str,
        mv: &MoveInfo,
        battle: &dyn BattleView,
        is_critical: bool,
    ) -> Result<Option<[u16; 16]>, FormulaError> {
        let attacker = battle
            .get_pokemon(attacker_id)
            .ok_or_else(|| FormulaError::UnknownPokemon(attacker_id.to_string()))?;
        let defender = battle
            .get_pokemon(defender_id)
            .ok_or_else(|| FormulaError::UnknownPokemon(defender_id.to_string()))?;

        let (attack_stat, defense_stat) = match mv.category {
            MoveCategory::Physical => (BattleStat::Atk, BattleStat::Def),
            MoveCategory::Special => (BattleStat::SpA, BattleStat::SpD),
            MoveCategory::Status => return Ok(None),
        };
        if mv.base_power == 0 {
            return Ok(None);
        }

        let attacker_stats = attacker
            .stats()
            .ok_or_else(|| FormulaError::MissingStats(attacker_id.to_string()))?;
        let defender_stats = defender
            .stats()
            .ok_or_else(|| FormulaError::MissingStats(defender_id.to_string()))?;

        // Immunities
        let [def_primary, def_secondary] = defender.defensive_types();
        let effectiveness = type_effectiveness(mv.move_type, def_primary, Some(def_secondary));
        if effectiveness == 0 || is_immune_by_ability(mv.move_type, defender.ability()) {
            return Ok(None);
        }

        let attacker_ability = ability_hooks(attacker.ability());
        let defender_ability = ability_hooks(defender.ability());
        let attacker_item = item_hooks(attacker.item());
        let defender_item = item_hooks(defender.item());

        let ctx = HookContext {
            category: mv.category,
            move_type: mv.move_type,
            effectiveness,
            attacker_status: attacker.status(),
            defender_hp_fraction: defender.current_hp_fraction(),
        };

        // Effective stats. Crits ignore the attacker's drops and the
        // defender's raises.
        let mut attack_boost = boost(attacker, attack_stat);
        let mut defense_boost = boost(defender, defense_stat);
        if is_critical {
            attack_boost = attack_boost.max(0);
            defense_boost = defense_boost.min(0);
        }
        let mut attack = apply_stat_boost(attacker_stats.get(attack_stat), attack_boost) as u32;
        let mut defense = apply_stat_boost(defender_stats.get(defense_stat), defense_boost) as u32;

        for hook in [attacker_ability.on_modify_attack, attacker_item.on_modify_attack, defender_ability.on_source_modify_attack]
            .into_iter()
            .flatten()
        {
            attack = hook(&ctx, attack);
        }
        if let Some(hook) = defender_item.on_modify_defense {
            defense = hook(&ctx, defense);
        }

        let mut damage = get_base_damage(
            attacker.level() as u32,
            mv.base_power as u32,
            attack.max(1),
            defense.max(1),
        );

        // Weather
        let weather = battle.weather();
        let weather_mod = match mv.move_type {
            Type::Water if weather.is_rain() => Modifier::ONE_POINT_FIVE,
            Type::Water if weather.is_sun() => Modifier::HALF,
            Type::Fire if weather.is_sun() => Modifier::ONE_POINT_FIVE,
            Type::Fire if weather.is_rain() => Modifier::HALF,
            _ => Modifier::ONE,
        };
        damage = apply_modifier(damage, weather_mod);

        // Critical hit (floor 1.5x)
        if is_critical {
            damage = apply_modifier_floor(damage, 3, 2);
        }

        let mods = FinalMods {
            effectiveness,
            stab: stab_modifier(attacker, mv.move_type, attacker_ability.adaptability),
            burned: mv.category == MoveCategory::Physical
                && attacker.status().contains(Status::BURN)
                && !attacker_ability.ignores_burn,
            screen: if is_critical {
                None
            } else {
                screen_for(battle, defender_id, mv.category)
            },
            item: attacker_item
                .on_final_modifier
                .map_or(Modifier::ONE, |hook| hook(&ctx)),
            ability: chain_mods(&[
                attacker_ability.on_attacker_final.map_or(Modifier::ONE, |hook| hook(&ctx)),
                defender_ability.on_defender_final.map_or(Modifier::ONE, |hook| hook(&ctx)),
            ]),
        };

        Ok(Some(final_damage_rolls(damage, &mods)))
    }
}

impl DamageFormula for StandardFormula {
    fn calculate(
        &self,
        attacker_id: &str,
        defender_id: &str,
        mv: &MoveInfo,
        battle: &dyn BattleView,
        is_critical: bool,
    ) -> Result<DamageRange, FormulaError> {
        let rolls = self.rolls(attacker_id, defender_id, mv, battle, is_critical)?;
        Ok(rolls.map_or(DamageRange::ZERO, |rolls| DamageRange::from_rolls(&rolls)))
    }
}

fn boost(combatant: &dyn Combatant, stat: BattleStat) -> i8 {
    stat.boost_index().map_or(0, |i| combatant.boosts()[i])
}

fn stab_modifier(attacker: &dyn Combatant, move_type: Type, adaptability: bool) -> Modifier {
    let [primary, secondary] = attacker.types();
    let has_stab = primary == move_type || secondary == move_type || attacker.tera_type() == Some(move_type);
    match (has_stab, adaptability) {
        (false, _) => Modifier::ONE,
        (true, false) => Modifier::ONE_POINT_FIVE,
        (true, true) => Modifier::DOUBLE,
    }
}

fn screen_for(battle: &dyn BattleView, defender_id: &str, category: MoveCategory) -> Option<Modifier> {
    let side = Side::of_identifier(defender_id)?;
    let conditions = battle.side_conditions(side);
    let screened = match category {
        MoveCategory::Physical => conditions.intersects(SideConditions::REFLECT | SideConditions::AURORA_VEIL),
        MoveCategory::Special => conditions.intersects(SideConditions::LIGHT_SCREEN | SideConditions::AURORA_VEIL),
        MoveCategory::Status => false,
    };
    screened.then_some(SCREEN_MOD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PokemonConfig;
    use crate::state::{BattleState, Weather};
    use crate::stats::StatTable;

    const FLAT: StatTable = StatTable::new(200, 100, 100, 100, 100, 100);

    /// Level 50 Normal attacker vs. Normal defender, all relevant stats 100.
    fn battle() -> BattleState {
        let mut state = BattleState::new(Side::P1);
        PokemonConfig::new("Attacker").level(50).types(Type::Normal, None).stats(FLAT).spawn(&mut state, Side::P1);
        PokemonConfig::new("Defender").level(50).types(Type::Normal, None).stats(FLAT).spawn(&mut state, Side::P2);
        state
    }

    fn calc(state: &BattleState, mv: &MoveInfo, crit: bool) -> DamageRange {
        StandardFormula.calculate("p1: Attacker", "p2: Defender", mv, state, crit).unwrap()
    }

    #[test]
    fn test_neutral_hit() {
        // Base damage 41 -> rolls 34..41
        let range = calc(&battle(), &MoveInfo::physical("Strength-ish", Type::Fighting, 90), false);
        // Fighting into Normal is 2x
        assert_eq!(range, DamageRange { min: 68, max: 82 });

        let range = calc(&battle(), &MoveInfo::special("Psychic", Type::Psychic, 90), false);
        assert_eq!(range, DamageRange { min: 34, max: 41 });
    }

    #[test]
    fn test_stab() {
        let range = calc(&battle(), &MoveInfo::physical("Return-ish", Type::Normal, 90), false);
        assert_eq!(range, DamageRange { min: 51, max: 61 });
    }

    #[test]
    fn test_type_immunity() {
        let range = calc(&battle(), &MoveInfo::physical("Shadow Claw", Type::Ghost, 70), false);
        assert_eq!(range, DamageRange::ZERO);
    }

    #[test]
    fn test_ability_immunity() {
        let mut state = battle();
        state.pokemon_mut("p2: Defender").unwrap().set_ability(Some("Levitate".into()));
        let range = calc(&state, &MoveInfo::physical("Earthquake", Type::Ground, 100), false);
        assert_eq!(range, DamageRange::ZERO);
    }

    #[test]
    fn test_status_move() {
        let range = calc(&battle(), &MoveInfo::status("Growl", Type::Normal), false);
        assert_eq!(range, DamageRange::ZERO);
    }

    #[test]
    fn test_missing_stats() {
        let mut state = battle();
        state.pokemon_mut("p2: Defender").unwrap().set_stats(None);
        let err = StandardFormula
            .calculate("p1: Attacker", "p2: Defender", &MoveInfo::special("Psychic", Type::Psychic, 90), &state, false)
            .unwrap_err();
        assert_eq!(err, FormulaError::MissingStats("p2: Defender".into()));
    }

    #[test]
    fn test_unknown_pokemon() {
        let err = StandardFormula
            .calculate("p1: Attacker", "p2: Nobody", &MoveInfo::special("Psychic", Type::Psychic, 90), &battle(), false)
            .unwrap_err();
        assert!(matches!(err, FormulaError::UnknownPokemon(_)));
    }

    #[test]
    fn test_critical_hit() {
        // 41 * 1.5 floored = 61 -> rolls 51..61
        let range = calc(&battle(), &MoveInfo::special("Psychic", Type::Psychic, 90), true);
        assert_eq!(range, DamageRange { min: 51, max: 61 });
    }

    #[test]
    fn test_rain_boosts_water() {
        let mut state = battle();
        let neutral = calc(&state, &MoveInfo::special("Surf", Type::Water, 90), false);
        state.set_weather(Weather::Rain);
        let rain = calc(&state, &MoveInfo::special("Surf", Type::Water, 90), false);
        assert!(rain.max > neutral.max);
        state.set_weather(Weather::Sun);
        let sun = calc(&state, &MoveInfo::special("Surf", Type::Water, 90), false);
        assert!(sun.max < neutral.max);
    }

    #[test]
    fn test_burn_and_guts() {
        let mv = MoveInfo::physical("Rock Slide", Type::Rock, 90);
        let mut state = battle();
        let healthy = calc(&state, &mv, false);
        state.pokemon_mut("p1: Attacker").unwrap().set_status(Status::BURN);
        let burned = calc(&state, &mv, false);
        assert!(burned.max < healthy.max);
        state.pokemon_mut("p1: Attacker").unwrap().set_ability(Some("Guts".into()));
        let guts = calc(&state, &mv, false);
        assert!(guts.max > healthy.max);
    }

    #[test]
    fn test_reflect_ignored_on_crit() {
        let mv = MoveInfo::physical("Rock Slide", Type::Rock, 90);
        let mut state = battle();
        let open = calc(&state, &mv, false);
        let open_crit = calc(&state, &mv, true);
        state.set_side_condition(Side::P2, SideConditions::REFLECT, true);
        assert!(calc(&state, &mv, false).max < open.max);
        assert_eq!(calc(&state, &mv, true), open_crit);
        // Reflect does nothing to special moves
        let special = MoveInfo::special("Psychic", Type::Psychic, 90);
        assert_eq!(calc(&state, &special, false), DamageRange { min: 34, max: 41 });
    }

    #[test]
    fn test_boosts() {
        let mv = MoveInfo::special("Psychic", Type::Psychic, 90);
        let mut state = battle();
        state.pokemon_mut("p1: Attacker").unwrap().set_boost(BattleStat::SpA, 2);
        let boosted = calc(&state, &mv, false);
        // floor(22 * 90 * 200 / 100 / 50) + 2 = 79 + 2
        assert_eq!(boosted.max, 81);
    }

    #[test]
    fn test_items_and_defensive_abilities() {
        let mv = MoveInfo::special("Psychic", Type::Psychic, 90);
        let mut state = battle();
        state.pokemon_mut("p1: Attacker").unwrap().set_item(Some("Choice Specs".into()));
        let specs = calc(&state, &mv, false);
        assert!(specs.max > 41);

        state.pokemon_mut("p2: Defender").unwrap().set_item(Some("Assault Vest".into()));
        assert_eq!(calc(&state, &mv, false).max, 41);

        state.pokemon_mut("p2: Defender").unwrap().set_ability(Some("Multiscale".into()));
        assert!(calc(&state, &mv, false).max < 41);
    }

    #[test]
    fn test_tera_stab() {
        let mv = MoveInfo::special("Psychic", Type::Psychic, 90);
        let mut state = battle();
        state.pokemon_mut("p1: Attacker").unwrap().terastallize(Type::Psychic);
        assert_eq!(calc(&state, &mv, false), DamageRange { min: 51, max: 61 });
    }
}
