//! Belief-weighted damage estimation.
//!
//! When the defender's stats are known the formula is called once on the
//! real battle, with a neutral stand-in line for an attacker whose stats
//! are hidden. Otherwise every sufficiently likely role is evaluated
//! through its own overlay and the results are averaged by role weight.

use serde::Serialize;
use tracing::{debug, error};

use super::{DamageFormula, DamageRange, StandardFormula};
use crate::belief::BeliefModel;
use crate::catalogue::Role;
use crate::config::EstimatorConfig;
use crate::error::FormulaError;
use crate::moves::MoveInfo;
use crate::overlay::{Overrides, ShadowBattle};
use crate::stats::{calc_hp, stats_from_spread, EvSpread, StatTable};
use crate::types::{effectiveness_multiplier, is_immune_by_ability, Type};
use crate::view::{BattleView, Combatant};

/// Scale of the incoming-damage heuristic (fraction of HP per 100 power at
/// neutral effectiveness).
const INCOMING_SCALE: f64 = 0.35;

/// Outcome of one estimate. Damage values are role-weighted expectations,
/// so they need not be integers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DamageResult {
    pub min_damage: f64,
    pub max_damage: f64,
    /// Fractions of the defender's max HP
    pub min_fraction: f64,
    pub max_fraction: f64,
    /// Mean of min and max fraction
    pub expected_fraction: f64,
    pub is_ohko: bool,
    pub is_2hko: bool,
}

impl DamageResult {
    pub const ZERO: Self = Self {
        min_damage: 0.0,
        max_damage: 0.0,
        min_fraction: 0.0,
        max_fraction: 0.0,
        expected_fraction: 0.0,
        is_ohko: false,
        is_2hko: false,
    };

    /// Build from absolute damage, the defender's max HP and its remaining
    /// HP fraction.
    pub fn from_damage(min_damage: f64, max_damage: f64, max_hp: f64, hp_fraction: f64) -> Self {
        let (min_fraction, max_fraction) = if max_hp > 0.0 {
            (min_damage / max_hp, max_damage / max_hp)
        } else {
            (0.0, 0.0)
        };
        Self {
            min_damage,
            max_damage,
            min_fraction,
            max_fraction,
            expected_fraction: (min_fraction + max_fraction) / 2.0,
            is_ohko: max_damage > 0.0 && max_fraction >= hp_fraction,
            is_2hko: max_damage > 0.0 && max_fraction * 2.0 >= hp_fraction,
        }
    }
}

/// Damage estimator that falls back to the belief distribution when the
/// defender's spread is hidden.
#[derive(Debug, Clone, Default)]
pub struct BeliefDamageEstimator<F = StandardFormula> {
    formula: F,
    config: EstimatorConfig,
}

impl<F: DamageFormula> BeliefDamageEstimator<F> {
    pub fn new(formula: F) -> Self {
        Self::with_config(formula, EstimatorConfig::default())
    }

    pub fn with_config(formula: F, config: EstimatorConfig) -> Self {
        Self { formula, config }
    }

    pub fn formula(&self) -> &F {
        &self.formula
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate the damage `mv` from `attacker_id` deals to `defender_id`.
    ///
    /// Never fails: a missing combatant, a non-damaging move or a formula
    /// that fails for every hypothesis gives [`DamageResult::ZERO`].
    pub fn estimate(
        &self,
        battle: &dyn BattleView,
        beliefs: &BeliefModel,
        mv: &MoveInfo,
        attacker_id: &str,
        defender_id: &str,
    ) -> DamageResult {
        let (Some(attacker), Some(defender)) = (battle.get_pokemon(attacker_id), battle.get_pokemon(defender_id))
        else {
            return DamageResult::ZERO;
        };
        if !mv.is_damaging() {
            return DamageResult::ZERO;
        }

        let max_hp = self.max_hp(defender);
        let hp_fraction = remaining_fraction(defender);

        let attacker_overrides = attacker
            .stats()
            .is_none()
            .then(|| Overrides::new().stats(self.neutral_stats(attacker)));

        if defender.stats().is_some() {
            // Known defender: only the attacker may need a stand-in line.
            let direct = match &attacker_overrides {
                None => self.formula.calculate(attacker_id, defender_id, mv, battle, false),
                Some(overrides) => self.evaluate(battle, mv, attacker_id, defender_id, Some(overrides), None),
            };
            match direct {
                Ok(range) => {
                    return DamageResult::from_damage(range.min as f64, range.max as f64, max_hp, hp_fraction);
                }
                Err(err) => {
                    debug!(attacker = attacker_id, defender = defender_id, error = %err, "direct calculation failed, using beliefs");
                }
            }
        }

        let belief = beliefs.belief(defender.species());
        let revealed_item = belief.and_then(|b| b.observed_item());
        let revealed_ability = belief.and_then(|b| b.observed_ability());

        let mut weighted_min = 0.0;
        let mut weighted_max = 0.0;
        let mut total = 0.0;

        for (role, p) in beliefs.role_weights(defender.species()) {
            if p < self.config.role_threshold {
                continue;
            }
            let overrides = self.role_overrides(defender, role, revealed_item, revealed_ability);
            match self.evaluate(battle, mv, attacker_id, defender_id, attacker_overrides.as_ref(), Some(overrides)) {
                Ok(range) => {
                    weighted_min += p * range.min as f64;
                    weighted_max += p * range.max as f64;
                    total += p;
                }
                Err(err) => {
                    debug!(species = defender.species(), role = role.name(), error = %err, "role evaluation failed, skipping");
                }
            }
        }

        if total <= 0.0 {
            let overrides = Overrides::new().stats(self.neutral_stats(defender));
            match self.evaluate(battle, mv, attacker_id, defender_id, attacker_overrides.as_ref(), Some(overrides)) {
                Ok(range) => {
                    weighted_min = range.min as f64;
                    weighted_max = range.max as f64;
                    total = 1.0;
                }
                Err(err) => {
                    error!(attacker = attacker_id, defender = defender_id, error = %err, "neutral fallback failed");
                    return DamageResult::ZERO;
                }
            }
        }

        DamageResult::from_damage(weighted_min / total, weighted_max / total, max_hp, hp_fraction)
    }

    /// Estimate between the two active Pokémon. With `attacker_is_caller`
    /// the caller's active attacks the opponent's, otherwise the reverse.
    pub fn estimate_active(
        &self,
        battle: &dyn BattleView,
        beliefs: &BeliefModel,
        mv: &MoveInfo,
        attacker_is_caller: bool,
    ) -> DamageResult {
        let player = battle.player_side();
        let (attacker_side, defender_side) = if attacker_is_caller {
            (player, player.opponent())
        } else {
            (player.opponent(), player)
        };
        match (battle.active_identifier(attacker_side), battle.active_identifier(defender_side)) {
            (Some(attacker), Some(defender)) => self.estimate(battle, beliefs, mv, attacker, defender),
            _ => DamageResult::ZERO,
        }
    }

    /// Rough fraction of the caller's active HP that a `power`-BP move of
    /// `predicted_type` from the opponent would take. Ignores stats.
    pub fn estimate_incoming(&self, battle: &dyn BattleView, predicted_type: Type, power: u16) -> f64 {
        let player = battle.player_side();
        let (Some(defender), Some(_)) = (battle.active_pokemon(player), battle.active_pokemon(player.opponent()))
        else {
            return 0.0;
        };
        if is_immune_by_ability(predicted_type, defender.ability()) {
            return 0.0;
        }
        let [primary, secondary] = defender.defensive_types();
        let effectiveness = effectiveness_multiplier(predicted_type, primary, Some(secondary));
        power as f64 / 100.0 * effectiveness * INCOMING_SCALE
    }

    fn evaluate(
        &self,
        battle: &dyn BattleView,
        mv: &MoveInfo,
        attacker_id: &str,
        defender_id: &str,
        attacker_overrides: Option<&Overrides>,
        defender_overrides: Option<Overrides>,
    ) -> Result<DamageRange, FormulaError> {
        let mut shadow = ShadowBattle::new(battle);
        if let Some(overrides) = attacker_overrides {
            shadow.insert(attacker_id, overrides.clone());
        }
        if let Some(overrides) = defender_overrides {
            shadow.insert(defender_id, overrides);
        }
        self.formula.calculate(attacker_id, defender_id, mv, &shadow, false)
    }

    /// Overrides describing `defender` as running `role`.
    fn role_overrides(
        &self,
        defender: &dyn Combatant,
        role: &Role,
        revealed_item: Option<&str>,
        revealed_ability: Option<&str>,
    ) -> Overrides {
        let level = role.level_value();
        let stats = match defender.base_stats() {
            Some(base) => stats_from_spread(&base, role.ev_spread(), self.config.iv, level),
            None => self.config.fallback_stats,
        };
        let item = revealed_item
            .map(str::to_string)
            .or_else(|| role.item_pool().first().cloned());
        let ability = revealed_ability
            .map(str::to_string)
            .or_else(|| role.ability_pool().first().cloned());
        Overrides::new().stats(stats).level(level).item(item).ability(ability)
    }

    /// Uniform-EV stats at the combatant's level.
    pub fn neutral_stats(&self, combatant: &dyn Combatant) -> StatTable {
        match combatant.base_stats() {
            Some(base) => stats_from_spread(
                &base,
                &EvSpread::uniform(self.config.default_ev),
                self.config.iv,
                self.level_of(combatant),
            ),
            None => self.config.fallback_stats,
        }
    }

    /// Real max HP, else HP from base stats with neutral EVs, else the
    /// fallback line's HP.
    pub fn max_hp(&self, combatant: &dyn Combatant) -> f64 {
        if let Some(stats) = combatant.stats().filter(|s| s.hp > 0) {
            return stats.hp as f64;
        }
        match combatant.base_stats() {
            Some(base) => calc_hp(base.hp, self.config.iv, self.config.default_ev, self.level_of(combatant)) as f64,
            None => self.config.fallback_stats.hp as f64,
        }
    }

    fn level_of(&self, combatant: &dyn Combatant) -> u8 {
        match combatant.level() {
            0 => self.config.default_level,
            level => level,
        }
    }
}

/// Remaining HP fraction; unknown (zero or invalid) counts as full.
fn remaining_fraction(combatant: &dyn Combatant) -> f64 {
    let fraction = combatant.current_hp_fraction();
    if fraction > 0.0 && fraction.is_finite() {
        fraction
    } else {
        1.0
    }
}
