//! Final-damage pipeline (Gen 5+ order).
//!
//! Base damage (after power, stats, weather and crit) is turned into the 16
//! random-roll outcomes by applying, per roll:
//! Random → STAB → Effectiveness → Burn → Screen → Item mod → Ability mod.

use super::formula::{apply_modifier, of32, pokeround};
use super::Modifier;

/// Everything the final phase needs beyond base damage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FinalMods {
    /// Type effectiveness (4 = 1x, 8 = 2x, ...)
    pub effectiveness: u8,
    /// STAB modifier, `Modifier::ONE` without STAB
    pub stab: Modifier,
    /// Physical move from a burned attacker without Guts
    pub burned: bool,
    /// Screen reduction in effect (never set on a crit)
    pub screen: Option<Modifier>,
    /// Attacker item final modifier (Life Orb, Expert Belt)
    pub item: Modifier,
    /// Chained ability final modifiers (Multiscale, Filter, ...)
    pub ability: Modifier,
}

impl Default for FinalMods {
    fn default() -> Self {
        Self {
            effectiveness: 4,
            stab: Modifier::ONE,
            burned: false,
            screen: None,
            item: Modifier::ONE,
            ability: Modifier::ONE,
        }
    }
}

// ============================================================================
// Shared Helpers
// ============================================================================

/// Apply random roll (85-100%) to damage.
#[inline]
pub fn apply_random_roll(damage: u32, roll_index: usize) -> u32 {
    let roll_percent = 85 + roll_index as u32;
    of32(damage as u64 * roll_percent as u64) / 100
}

/// Apply STAB modifier with 4096-scale pokeRound.
#[inline]
pub fn apply_stab(damage: u32, stab_mod: Modifier) -> u32 {
    if stab_mod == Modifier::ONE {
        return damage;
    }
    let product = of32(damage as u64 * stab_mod.val() as u64);
    pokeround(product, 4096)
}

/// Apply type effectiveness (always floor division).
#[inline]
pub fn apply_effectiveness(damage: u32, effectiveness: u8) -> u32 {
    of32(damage as u64 * effectiveness as u64) / 4
}

/// Apply burn damage reduction (halves damage).
#[inline]
pub fn apply_burn(damage: u32, burned: bool) -> u32 {
    if burned {
        damage / 2
    } else {
        damage
    }
}

/// Clamp final damage to valid range (min 1, max u16::MAX).
#[inline]
pub fn clamp_damage(damage: u32) -> u16 {
    damage.clamp(1, u16::MAX as u32) as u16
}

/// Compute all 16 final damage values from base damage.
pub fn final_damage_rolls(base_damage: u32, mods: &FinalMods) -> [u16; 16] {
    let mut rolls = [0u16; 16];

    for (i, roll) in rolls.iter_mut().enumerate() {
        // 1. Random roll (FIRST)
        let mut damage = apply_random_roll(base_damage, i);

        // 2. STAB (4096-scale)
        damage = apply_stab(damage, mods.stab);

        // 3. Type effectiveness
        damage = apply_effectiveness(damage, mods.effectiveness);

        // 4. Burn
        damage = apply_burn(damage, mods.burned);

        // 5. Screen
        if let Some(screen) = mods.screen {
            damage = apply_modifier(damage, screen);
        }

        // 6. Item final mods (Life Orb, Expert Belt)
        damage = apply_modifier(damage, mods.item);

        // 7. Ability final mods (Multiscale, Filter)
        damage = apply_modifier(damage, mods.ability);

        *roll = clamp_damage(damage);
    }

    rolls
}
