//! Stat lines, EV spreads and the stat-from-EVs formula.

use serde::{Deserialize, Serialize};

/// Default IV (perfect).
pub const DEFAULT_IV: u8 = 31;

/// EV value random-battle sets use for every stat unless told otherwise.
pub const DEFAULT_EV: u8 = 85;

/// Level assumed when neither the catalogue nor the entity says otherwise.
pub const DEFAULT_LEVEL: u8 = 80;

/// Highest EV a single stat may hold.
pub const MAX_EV: u8 = 252;

/// Number of stages a boost can reach in either direction.
pub const MAX_BOOST: i8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattleStat {
    Hp,
    Atk,
    Def,
    SpA,
    SpD,
    Spe,
}

impl BattleStat {
    pub const ALL: [BattleStat; 6] = [
        BattleStat::Hp,
        BattleStat::Atk,
        BattleStat::Def,
        BattleStat::SpA,
        BattleStat::SpD,
        BattleStat::Spe,
    ];

    /// Index into a boost array `[Atk, Def, SpA, SpD, Spe]`. HP has none.
    pub const fn boost_index(self) -> Option<usize> {
        match self {
            BattleStat::Hp => None,
            BattleStat::Atk => Some(0),
            BattleStat::Def => Some(1),
            BattleStat::SpA => Some(2),
            BattleStat::SpD => Some(3),
            BattleStat::Spe => Some(4),
        }
    }
}

/// A full six-stat line (either base stats or computed stats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatTable {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl StatTable {
    /// Stat line used when nothing at all is known about an entity.
    pub const FALLBACK: StatTable = StatTable {
        hp: 300,
        atk: 100,
        def: 100,
        spa: 100,
        spd: 100,
        spe: 100,
    };

    pub const fn new(hp: u16, atk: u16, def: u16, spa: u16, spd: u16, spe: u16) -> Self {
        Self { hp, atk, def, spa, spd, spe }
    }

    #[inline]
    pub const fn get(&self, stat: BattleStat) -> u16 {
        match stat {
            BattleStat::Hp => self.hp,
            BattleStat::Atk => self.atk,
            BattleStat::Def => self.def,
            BattleStat::SpA => self.spa,
            BattleStat::SpD => self.spd,
            BattleStat::Spe => self.spe,
        }
    }

    pub fn set(&mut self, stat: BattleStat, value: u16) {
        match stat {
            BattleStat::Hp => self.hp = value,
            BattleStat::Atk => self.atk = value,
            BattleStat::Def => self.def = value,
            BattleStat::SpA => self.spa = value,
            BattleStat::SpD => self.spd = value,
            BattleStat::Spe => self.spe = value,
        }
    }
}

fn default_ev() -> u8 {
    DEFAULT_EV
}

/// Per-stat EV allocation. Stats absent from catalogue data read as 85.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvSpread {
    #[serde(default = "default_ev")]
    pub hp: u8,
    #[serde(default = "default_ev")]
    pub atk: u8,
    #[serde(default = "default_ev")]
    pub def: u8,
    #[serde(default = "default_ev")]
    pub spa: u8,
    #[serde(default = "default_ev")]
    pub spd: u8,
    #[serde(default = "default_ev")]
    pub spe: u8,
}

impl Default for EvSpread {
    fn default() -> Self {
        Self::uniform(DEFAULT_EV)
    }
}

impl EvSpread {
    pub const fn uniform(ev: u8) -> Self {
        Self { hp: ev, atk: ev, def: ev, spa: ev, spd: ev, spe: ev }
    }

    pub const fn get(&self, stat: BattleStat) -> u8 {
        match stat {
            BattleStat::Hp => self.hp,
            BattleStat::Atk => self.atk,
            BattleStat::Def => self.def,
            BattleStat::SpA => self.spa,
            BattleStat::SpD => self.spd,
            BattleStat::Spe => self.spe,
        }
    }

    /// Clamp every stat to the 0–252 range.
    pub fn clamped(self) -> Self {
        Self {
            hp: self.hp.min(MAX_EV),
            atk: self.atk.min(MAX_EV),
            def: self.def.min(MAX_EV),
            spa: self.spa.min(MAX_EV),
            spd: self.spd.min(MAX_EV),
            spe: self.spe.min(MAX_EV),
        }
    }
}

// ============================================================================
// Stat Calculation
// ============================================================================

/// HP formula: floor((2 * Base + IV + floor(EV/4)) * Level / 100) + Level + 10
#[inline]
pub fn calc_hp(base: u16, iv: u8, ev: u8, level: u8) -> u16 {
    let level = level as u32;
    let hp = ((2 * base as u32 + iv as u32 + ev as u32 / 4) * level / 100) + level + 10;
    u16::try_from(hp).unwrap_or(u16::MAX)
}

/// Other stats: floor((2 * Base + IV + floor(EV/4)) * Level / 100) + 5
///
/// Natures are not modelled; every set is treated as neutral.
#[inline]
pub fn calc_stat(base: u16, iv: u8, ev: u8, level: u8) -> u16 {
    let level = level as u32;
    let raw = ((2 * base as u32 + iv as u32 + ev as u32 / 4) * level / 100) + 5;
    u16::try_from(raw).unwrap_or(u16::MAX)
}

/// Compute a full stat line from base stats, an EV spread and a level.
pub fn stats_from_spread(base: &StatTable, evs: &EvSpread, iv: u8, level: u8) -> StatTable {
    let mut stats = StatTable::default();
    stats.hp = calc_hp(base.hp, iv, evs.hp, level);
    for stat in &BattleStat::ALL[1..] {
        stats.set(*stat, calc_stat(base.get(*stat), iv, evs.get(*stat), level));
    }
    stats
}

/// Apply stat stage boost to a stat.
/// Stages range from -6 to +6
/// Multipliers: -6 = 2/8, -5 = 2/7, ..., 0 = 2/2, ..., +6 = 8/2
#[inline]
pub fn apply_stat_boost(base: u16, stage: i8) -> u16 {
    let stage = stage.clamp(-MAX_BOOST, MAX_BOOST) as i32;
    let (numerator, denominator) = if stage >= 0 {
        (2 + stage, 2)
    } else {
        (2, 2 - stage)
    };
    u16::try_from((base as i32 * numerator) / denominator).unwrap_or(u16::MAX)
}
