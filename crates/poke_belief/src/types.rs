//! Elemental types and the type chart.
//!
//! The chart is built once at compile time from the list of non-neutral
//! matchups, so the only mutable thing about it is nothing.

use serde::{Deserialize, Serialize};

use crate::ids::normalize_id;

/// Number of real (chart-participating) types.
pub const TYPE_COUNT: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
#[repr(u8)]
pub enum Type {
    Normal = 0,
    Fighting = 1,
    Flying = 2,
    Poison = 3,
    Ground = 4,
    Rock = 5,
    Bug = 6,
    Ghost = 7,
    Steel = 8,
    Fire = 9,
    Water = 10,
    Grass = 11,
    Electric = 12,
    Psychic = 13,
    Ice = 14,
    Dragon = 15,
    Dark = 16,
    Fairy = 17,
}

impl Default for Type {
    fn default() -> Self {
        Type::Normal
    }
}

static TYPE_NAMES: phf::Map<&'static str, Type> = phf::phf_map! {
    "normal" => Type::Normal,
    "fighting" => Type::Fighting,
    "flying" => Type::Flying,
    "poison" => Type::Poison,
    "ground" => Type::Ground,
    "rock" => Type::Rock,
    "bug" => Type::Bug,
    "ghost" => Type::Ghost,
    "steel" => Type::Steel,
    "fire" => Type::Fire,
    "water" => Type::Water,
    "grass" => Type::Grass,
    "electric" => Type::Electric,
    "psychic" => Type::Psychic,
    "ice" => Type::Ice,
    "dragon" => Type::Dragon,
    "dark" => Type::Dark,
    "fairy" => Type::Fairy,
};

impl Type {
    pub const ALL: [Type; TYPE_COUNT] = [
        Type::Normal,
        Type::Fighting,
        Type::Flying,
        Type::Poison,
        Type::Ground,
        Type::Rock,
        Type::Bug,
        Type::Ghost,
        Type::Steel,
        Type::Fire,
        Type::Water,
        Type::Grass,
        Type::Electric,
        Type::Psychic,
        Type::Ice,
        Type::Dragon,
        Type::Dark,
        Type::Fairy,
    ];

    /// Case/punctuation-insensitive lookup ("Fire", "fire", "FIRE").
    pub fn from_str(name: &str) -> Option<Type> {
        TYPE_NAMES.get(normalize_id(name).as_str()).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Type::Normal => "Normal",
            Type::Fighting => "Fighting",
            Type::Flying => "Flying",
            Type::Poison => "Poison",
            Type::Ground => "Ground",
            Type::Rock => "Rock",
            Type::Bug => "Bug",
            Type::Ghost => "Ghost",
            Type::Steel => "Steel",
            Type::Fire => "Fire",
            Type::Water => "Water",
            Type::Grass => "Grass",
            Type::Electric => "Electric",
            Type::Psychic => "Psychic",
            Type::Ice => "Ice",
            Type::Dragon => "Dragon",
            Type::Dark => "Dark",
            Type::Fairy => "Fairy",
        }
    }
}

impl TryFrom<String> for Type {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Type::from_str(&value).ok_or_else(|| format!("unknown type: {value}"))
    }
}

impl From<Type> for &'static str {
    fn from(value: Type) -> Self {
        value.name()
    }
}

// ============================================================================
// Type Chart
// ============================================================================

// Single-type entries are on a 2-scale: 0 = immune, 1 = 0.5x, 2 = 1x, 4 = 2x.
const IMMUNE: u8 = 0;
const RESIST: u8 = 1;
const SUPER: u8 = 4;

/// Neutral value of [`type_effectiveness`] (4-scale).
pub const NEUTRAL: u8 = 4;

const MATCHUPS: &[(Type, Type, u8)] = &[
    (Type::Normal, Type::Rock, RESIST),
    (Type::Normal, Type::Ghost, IMMUNE),
    (Type::Normal, Type::Steel, RESIST),
    (Type::Fighting, Type::Normal, SUPER),
    (Type::Fighting, Type::Flying, RESIST),
    (Type::Fighting, Type::Poison, RESIST),
    (Type::Fighting, Type::Rock, SUPER),
    (Type::Fighting, Type::Bug, RESIST),
    (Type::Fighting, Type::Ghost, IMMUNE),
    (Type::Fighting, Type::Steel, SUPER),
    (Type::Fighting, Type::Psychic, RESIST),
    (Type::Fighting, Type::Ice, SUPER),
    (Type::Fighting, Type::Dark, SUPER),
    (Type::Fighting, Type::Fairy, RESIST),
    (Type::Flying, Type::Fighting, SUPER),
    (Type::Flying, Type::Rock, RESIST),
    (Type::Flying, Type::Bug, SUPER),
    (Type::Flying, Type::Steel, RESIST),
    (Type::Flying, Type::Grass, SUPER),
    (Type::Flying, Type::Electric, RESIST),
    (Type::Poison, Type::Poison, RESIST),
    (Type::Poison, Type::Ground, RESIST),
    (Type::Poison, Type::Rock, RESIST),
    (Type::Poison, Type::Ghost, RESIST),
    (Type::Poison, Type::Steel, IMMUNE),
    (Type::Poison, Type::Grass, SUPER),
    (Type::Poison, Type::Fairy, SUPER),
    (Type::Ground, Type::Flying, IMMUNE),
    (Type::Ground, Type::Poison, SUPER),
    (Type::Ground, Type::Rock, SUPER),
    (Type::Ground, Type::Bug, RESIST),
    (Type::Ground, Type::Steel, SUPER),
    (Type::Ground, Type::Fire, SUPER),
    (Type::Ground, Type::Grass, RESIST),
    (Type::Ground, Type::Electric, SUPER),
    (Type::Rock, Type::Fighting, RESIST),
    (Type::Rock, Type::Flying, SUPER),
    (Type::Rock, Type::Ground, RESIST),
    (Type::Rock, Type::Bug, SUPER),
    (Type::Rock, Type::Steel, RESIST),
    (Type::Rock, Type::Fire, SUPER),
    (Type::Rock, Type::Ice, SUPER),
    (Type::Bug, Type::Fighting, RESIST),
    (Type::Bug, Type::Flying, RESIST),
    (Type::Bug, Type::Poison, RESIST),
    (Type::Bug, Type::Ghost, RESIST),
    (Type::Bug, Type::Steel, RESIST),
    (Type::Bug, Type::Fire, RESIST),
    (Type::Bug, Type::Grass, SUPER),
    (Type::Bug, Type::Psychic, SUPER),
    (Type::Bug, Type::Dark, SUPER),
    (Type::Bug, Type::Fairy, RESIST),
    (Type::Ghost, Type::Normal, IMMUNE),
    (Type::Ghost, Type::Ghost, SUPER),
    (Type::Ghost, Type::Psychic, SUPER),
    (Type::Ghost, Type::Dark, RESIST),
    (Type::Steel, Type::Rock, SUPER),
    (Type::Steel, Type::Steel, RESIST),
    (Type::Steel, Type::Fire, RESIST),
    (Type::Steel, Type::Water, RESIST),
    (Type::Steel, Type::Electric, RESIST),
    (Type::Steel, Type::Ice, SUPER),
    (Type::Steel, Type::Fairy, SUPER),
    (Type::Fire, Type::Rock, RESIST),
    (Type::Fire, Type::Bug, SUPER),
    (Type::Fire, Type::Steel, SUPER),
    (Type::Fire, Type::Fire, RESIST),
    (Type::Fire, Type::Water, RESIST),
    (Type::Fire, Type::Grass, SUPER),
    (Type::Fire, Type::Ice, SUPER),
    (Type::Fire, Type::Dragon, RESIST),
    (Type::Water, Type::Ground, SUPER),
    (Type::Water, Type::Rock, SUPER),
    (Type::Water, Type::Fire, SUPER),
    (Type::Water, Type::Water, RESIST),
    (Type::Water, Type::Grass, RESIST),
    (Type::Water, Type::Dragon, RESIST),
    (Type::Grass, Type::Flying, RESIST),
    (Type::Grass, Type::Poison, RESIST),
    (Type::Grass, Type::Ground, SUPER),
    (Type::Grass, Type::Rock, SUPER),
    (Type::Grass, Type::Bug, RESIST),
    (Type::Grass, Type::Steel, RESIST),
    (Type::Grass, Type::Fire, RESIST),
    (Type::Grass, Type::Water, SUPER),
    (Type::Grass, Type::Grass, RESIST),
    (Type::Grass, Type::Dragon, RESIST),
    (Type::Electric, Type::Flying, SUPER),
    (Type::Electric, Type::Ground, IMMUNE),
    (Type::Electric, Type::Water, SUPER),
    (Type::Electric, Type::Grass, RESIST),
    (Type::Electric, Type::Electric, RESIST),
    (Type::Electric, Type::Dragon, RESIST),
    (Type::Psychic, Type::Fighting, SUPER),
    (Type::Psychic, Type::Poison, SUPER),
    (Type::Psychic, Type::Steel, RESIST),
    (Type::Psychic, Type::Psychic, RESIST),
    (Type::Psychic, Type::Dark, IMMUNE),
    (Type::Ice, Type::Flying, SUPER),
    (Type::Ice, Type::Ground, SUPER),
    (Type::Ice, Type::Steel, RESIST),
    (Type::Ice, Type::Fire, RESIST),
    (Type::Ice, Type::Water, RESIST),
    (Type::Ice, Type::Grass, SUPER),
    (Type::Ice, Type::Ice, RESIST),
    (Type::Ice, Type::Dragon, SUPER),
    (Type::Dragon, Type::Steel, RESIST),
    (Type::Dragon, Type::Dragon, SUPER),
    (Type::Dragon, Type::Fairy, IMMUNE),
    (Type::Dark, Type::Fighting, RESIST),
    (Type::Dark, Type::Ghost, SUPER),
    (Type::Dark, Type::Psychic, SUPER),
    (Type::Dark, Type::Dark, RESIST),
    (Type::Dark, Type::Fairy, RESIST),
    (Type::Fairy, Type::Fighting, SUPER),
    (Type::Fairy, Type::Poison, RESIST),
    (Type::Fairy, Type::Steel, RESIST),
    (Type::Fairy, Type::Fire, RESIST),
    (Type::Fairy, Type::Dragon, SUPER),
    (Type::Fairy, Type::Dark, SUPER),
];

const fn build_chart() -> [[u8; TYPE_COUNT]; TYPE_COUNT] {
    let mut chart = [[2u8; TYPE_COUNT]; TYPE_COUNT];
    let mut i = 0;
    while i < MATCHUPS.len() {
        let (attacking, defending, value) = MATCHUPS[i];
        chart[attacking as usize][defending as usize] = value;
        i += 1;
    }
    chart
}

/// `TYPE_CHART[attacking][defending]` on a 2-scale (2 = neutral).
pub static TYPE_CHART: [[u8; TYPE_COUNT]; TYPE_COUNT] = build_chart();

/// Effectiveness of `attacking` into a (possibly dual) defender.
///
/// Returns a 4-scale value: 0 = immune, 1 = 0.25x, 2 = 0.5x, 4 = 1x,
/// 8 = 2x, 16 = 4x. A repeated secondary type counts once.
#[inline]
pub fn type_effectiveness(attacking: Type, defending: Type, secondary: Option<Type>) -> u8 {
    let first = TYPE_CHART[attacking as usize][defending as usize];
    let second = match secondary {
        Some(t) if t != defending => TYPE_CHART[attacking as usize][t as usize],
        _ => 2,
    };
    first * second
}

/// Float view of [`type_effectiveness`]: one of {0, 0.25, 0.5, 1, 2, 4}.
pub fn effectiveness_multiplier(attacking: Type, defending: Type, secondary: Option<Type>) -> f64 {
    type_effectiveness(attacking, defending, secondary) as f64 / NEUTRAL as f64
}

// ============================================================================
// Ability-granted immunities
// ============================================================================

static ABILITY_IMMUNITIES: phf::Map<&'static str, Type> = phf::phf_map! {
    "levitate" => Type::Ground,
    "eartheater" => Type::Ground,
    "flashfire" => Type::Fire,
    "wellbakedbody" => Type::Fire,
    "waterabsorb" => Type::Water,
    "stormdrain" => Type::Water,
    "dryskin" => Type::Water,
    "voltabsorb" => Type::Electric,
    "lightningrod" => Type::Electric,
    "motordrive" => Type::Electric,
    "sapsipper" => Type::Grass,
};

/// The type an ability makes its holder immune to, if any.
pub fn ability_immunity(ability: &str) -> Option<Type> {
    ABILITY_IMMUNITIES.get(normalize_id(ability).as_str()).copied()
}

/// Whether `ability` blocks moves of `move_type` outright.
pub fn is_immune_by_ability(move_type: Type, ability: Option<&str>) -> bool {
    ability.and_then(ability_immunity) == Some(move_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_lookup() {
        assert_eq!(Type::from_str("fire"), Some(Type::Fire));
        assert_eq!(Type::from_str("Fire"), Some(Type::Fire));
        assert_eq!(Type::from_str("invalid"), None);
    }

    #[test]
    fn test_type_effectiveness() {
        // Water vs Fire = 2x
        assert_eq!(type_effectiveness(Type::Water, Type::Fire, None), 8);

        // Ground vs Flying = 0x
        assert_eq!(type_effectiveness(Type::Ground, Type::Flying, None), 0);

        // Ice vs Grass/Flying = 4x
        assert_eq!(type_effectiveness(Type::Ice, Type::Grass, Some(Type::Flying)), 16);

        // Fire vs Water/Dragon = 0.25x
        assert_eq!(type_effectiveness(Type::Fire, Type::Water, Some(Type::Dragon)), 1);

        // Mono-type listed twice counts once
        assert_eq!(type_effectiveness(Type::Fire, Type::Grass, Some(Type::Grass)), 8);
    }

    #[test]
    fn test_multiplier_view() {
        assert_eq!(effectiveness_multiplier(Type::Fire, Type::Grass, Some(Type::Steel)), 4.0);
        assert_eq!(effectiveness_multiplier(Type::Normal, Type::Ghost, None), 0.0);
        assert_eq!(effectiveness_multiplier(Type::Normal, Type::Normal, None), 1.0);
        assert_eq!(effectiveness_multiplier(Type::Grass, Type::Steel, None), 0.5);
    }

    #[test]
    fn test_chart_has_expected_immunities() {
        let immune: usize = TYPE_CHART.iter().flatten().filter(|&&v| v == 0).count();
        assert_eq!(immune, 8);
    }

    #[test]
    fn test_ability_immunity() {
        assert!(is_immune_by_ability(Type::Ground, Some("Levitate")));
        assert!(is_immune_by_ability(Type::Water, Some("Water Absorb")));
        assert!(!is_immune_by_ability(Type::Fire, Some("Levitate")));
        assert!(!is_immune_by_ability(Type::Fire, Some("Thick Fat")));
        assert!(!is_immune_by_ability(Type::Fire, None));
    }

    #[test]
    fn test_type_serde() {
        let parsed: Type = serde_json::from_str("\"steel\"").unwrap();
        assert_eq!(parsed, Type::Steel);
        assert_eq!(serde_json::to_string(&Type::Grass).unwrap(), "\"Grass\"");
    }
}
