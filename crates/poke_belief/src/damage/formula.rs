//! Core damage formula and math utilities.
//!
//! Fixed-point helpers shared by the standard formula: Game Freak's rounding,
//! overflow wrapping and the base damage equation.

use super::Modifier;

/// 32-bit overflow wrapping (simulates hardware behavior).
/// Values that exceed u32::MAX wrap around.
#[inline]
pub const fn of32(value: u64) -> u32 {
    (value & 0xFFFF_FFFF) as u32
}

/// Game Freak's rounding function ("pokeRound").
///
/// The fractional part > 0.5 rounds up, otherwise rounds down. Exactly 0.5
/// rounds DOWN, unlike standard rounding.
#[inline]
pub fn pokeround(value: u32, divisor: u32) -> u32 {
    let quotient = value / divisor;
    let remainder = value % divisor;
    if remainder > divisor / 2 {
        quotient + 1
    } else {
        quotient
    }
}

/// Apply a 4096-scale modifier: `pokeround(value * modifier / 4096)`.
#[inline]
pub fn apply_modifier(value: u32, modifier: Modifier) -> u32 {
    if modifier == Modifier::ONE {
        return value;
    }
    let product = of32(value as u64 * modifier.val() as u64);
    pokeround(product, 4096)
}

/// Apply a modifier and floor the result (no rounding).
///
/// Used for the crit multiplier, where the game uses simple floor division.
#[inline]
pub fn apply_modifier_floor(value: u32, modifier_num: u32, modifier_den: u32) -> u32 {
    of32(value as u64 * modifier_num as u64) / modifier_den
}

/// Chain multiple 4096-scale modifiers together.
///
/// Starts at 4096 (1.0x) and multiplies each modifier in sequence, with
/// pokeRound at every step. Clamped to roughly 0.0002x..32x.
pub fn chain_mods(modifiers: &[Modifier]) -> Modifier {
    let mut result: u32 = 4096;
    for &modifier in modifiers {
        if modifier != Modifier::ONE {
            let product = of32(result as u64 * modifier.val() as u64);
            result = pokeround(product, 4096);
        }
    }
    Modifier::new(result.clamp(1, u16::MAX as u32) as u16)
}

/// Calculate base damage before modifiers.
///
/// Formula: `floor((floor(2 * Level / 5 + 2) * BasePower * Attack / Defense) / 50) + 2`
///
/// Each intermediate step is truncated to match cartridge behavior.
pub fn get_base_damage(level: u32, base_power: u32, attack: u32, defense: u32) -> u32 {
    if defense == 0 {
        return 0;
    }

    let level_factor = 2 * level / 5 + 2;

    let numerator = of32(level_factor as u64 * base_power as u64);
    let numerator = of32(numerator as u64 * attack as u64);
    let after_defense = numerator / defense;
    let after_50 = after_defense / 50;

    after_50 + 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of32() {
        assert_eq!(of32(100), 100);
        assert_eq!(of32(0xFFFF_FFFF), 0xFFFF_FFFF);
        assert_eq!(of32(0x1_0000_0000), 0);
    }

    #[test]
    fn test_apply_modifier() {
        assert_eq!(apply_modifier(100, Modifier::ONE), 100);
        assert_eq!(apply_modifier(100, Modifier::ONE_POINT_FIVE), 150);
        assert_eq!(apply_modifier(100, Modifier::HALF), 50);
        assert_eq!(apply_modifier(100, Modifier::DOUBLE), 200);
        // 41 * 1.5 = 61.5 rounds down
        assert_eq!(apply_modifier(41, Modifier::ONE_POINT_FIVE), 61);
    }

    #[test]
    fn test_chain_mods() {
        assert_eq!(chain_mods(&[]), Modifier::ONE);
        assert_eq!(chain_mods(&[Modifier::ONE_POINT_FIVE]), Modifier(6144));
        // 1.5x * 1.5x = 2.25x
        assert_eq!(chain_mods(&[Modifier::ONE_POINT_FIVE, Modifier::ONE_POINT_FIVE]), Modifier(9216));
        // 1.5x * 0.5x = 0.75x
        assert_eq!(chain_mods(&[Modifier::ONE_POINT_FIVE, Modifier::HALF]), Modifier(3072));
    }

    #[test]
    fn test_base_damage() {
        // floor((22 * 90 * 100) / 100) / 50 + 2 = 39 + 2
        assert_eq!(get_base_damage(50, 90, 100, 100), 41);
        // floor((42 * 90 * 100) / 100) / 50 + 2 = 75 + 2
        assert_eq!(get_base_damage(100, 90, 100, 100), 77);
        assert_eq!(get_base_damage(100, 90, 100, 0), 0);
    }

    #[test]
    fn test_pokeround() {
        assert_eq!(pokeround(2048, 4096), 0);
        assert_eq!(pokeround(2049, 4096), 1);
        assert_eq!(pokeround(6144, 4096), 1);
        assert_eq!(pokeround(6145, 4096), 2);
        assert_eq!(pokeround(15, 10), 1);
        assert_eq!(pokeround(16, 10), 2);
    }

    #[test]
    fn test_apply_modifier_floor() {
        assert_eq!(apply_modifier_floor(100, 3, 2), 150);
        assert_eq!(apply_modifier_floor(101, 3, 2), 151);
        assert_eq!(apply_modifier_floor(99, 3, 2), 148);
    }
}
