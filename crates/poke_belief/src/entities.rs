//! Battle participants and the blueprint used to create them.
//!
//! The `PokemonConfig` struct serves as a builder for configuring a Pokémon
//! before inserting it into a `BattleState`. Opponents are usually spawned
//! with [`PokemonConfig::hidden`]: their species, level and base stats are
//! public, but their computed stats are not.

use crate::state::{BattleState, Status};
use crate::stats::{apply_stat_boost, stats_from_spread, BattleStat, EvSpread, StatTable, DEFAULT_IV, DEFAULT_LEVEL};
use crate::types::Type;
use crate::view::{Combatant, Side};

/// A Pokémon as the host tracks it.
#[derive(Clone, Debug, PartialEq)]
pub struct Pokemon {
    identifier: String,
    species: String,
    level: u8,
    types: [Type; 2],
    base_stats: Option<StatTable>,
    stats: Option<StatTable>,
    boosts: [i8; 5],
    item: Option<String>,
    ability: Option<String>,
    status: Status,
    hp_fraction: f64,
    tera_type: Option<Type>,
}

impl Pokemon {
    pub fn set_hp_fraction(&mut self, fraction: f64) {
        self.hp_fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Set a boost stage. HP has no stage and is ignored.
    pub fn set_boost(&mut self, stat: BattleStat, stage: i8) {
        if let Some(i) = stat.boost_index() {
            self.boosts[i] = stage.clamp(-6, 6);
        }
    }

    pub fn set_item(&mut self, item: Option<String>) {
        self.item = item;
    }

    pub fn set_ability(&mut self, ability: Option<String>) {
        self.ability = ability;
    }

    pub fn set_stats(&mut self, stats: Option<StatTable>) {
        self.stats = stats;
    }

    pub fn terastallize(&mut self, tera_type: Type) {
        self.tera_type = Some(tera_type);
    }

    pub fn is_fainted(&self) -> bool {
        self.hp_fraction <= 0.0
    }

    /// Boosted stat, if stats are known.
    pub fn effective_stat(&self, stat: BattleStat) -> Option<u16> {
        let stats = self.stats?;
        Some(match stat.boost_index() {
            Some(i) => apply_stat_boost(stats.get(stat), self.boosts[i]),
            None => stats.hp,
        })
    }
}

impl Combatant for Pokemon {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn species(&self) -> &str {
        &self.species
    }

    fn level(&self) -> u8 {
        self.level
    }

    fn types(&self) -> [Type; 2] {
        self.types
    }

    fn base_stats(&self) -> Option<StatTable> {
        self.base_stats
    }

    fn stats(&self) -> Option<StatTable> {
        self.stats
    }

    fn boosts(&self) -> [i8; 5] {
        self.boosts
    }

    fn item(&self) -> Option<&str> {
        self.item.as_deref()
    }

    fn ability(&self) -> Option<&str> {
        self.ability.as_deref()
    }

    fn status(&self) -> Status {
        self.status
    }

    fn current_hp_fraction(&self) -> f64 {
        self.hp_fraction
    }

    fn tera_type(&self) -> Option<Type> {
        self.tera_type
    }
}

/// Blueprint for spawning a Pokémon into battle.
///
/// Use builder methods to customize, then call `spawn()` to insert it into a
/// `BattleState` on a given side.
#[derive(Clone, Debug)]
pub struct PokemonConfig {
    /// Species display name (also used for the identifier)
    pub species: String,

    /// Level (1-100)
    pub level: u8,

    /// IV used for every stat
    pub iv: u8,

    /// Effort Values (0-252 each)
    pub evs: EvSpread,

    pub types: [Type; 2],

    pub base_stats: Option<StatTable>,

    /// Exact stats, bypassing the stat formula
    pub stats_override: Option<StatTable>,

    /// Whether computed stats are withheld from the view
    pub hidden: bool,

    pub item: Option<String>,

    pub ability: Option<String>,

    pub status: Status,

    pub hp_fraction: f64,

    pub boosts: [i8; 5],

    pub tera_type: Option<Type>,
}

impl PokemonConfig {
    /// Create a new config for a species
    pub fn new(species: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            level: DEFAULT_LEVEL,
            iv: DEFAULT_IV,
            evs: EvSpread::default(),
            types: [Type::Normal, Type::Normal],
            base_stats: None,
            stats_override: None,
            hidden: false,
            item: None,
            ability: None,
            status: Status::NONE,
            hp_fraction: 1.0,
            boosts: [0; 5],
            tera_type: None,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set level
    pub fn level(mut self, level: u8) -> Self {
        self.level = level.clamp(1, 100);
        self
    }

    pub fn iv(mut self, iv: u8) -> Self {
        self.iv = iv.min(31);
        self
    }

    /// Set EVs
    pub fn evs(mut self, evs: EvSpread) -> Self {
        self.evs = evs.clamped();
        self
    }

    /// Set types. A missing secondary repeats the primary.
    pub fn types(mut self, primary: Type, secondary: Option<Type>) -> Self {
        self.types = [primary, secondary.unwrap_or(primary)];
        self
    }

    pub fn base_stats(mut self, base: StatTable) -> Self {
        self.base_stats = Some(base);
        self
    }

    /// Use exact stats instead of deriving them from base stats.
    pub fn stats(mut self, stats: StatTable) -> Self {
        self.stats_override = Some(stats);
        self
    }

    /// Withhold computed stats (an opponent whose spread is unknown).
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Set held item
    pub fn item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    /// Set ability
    pub fn ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = Some(ability.into());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Set current HP (for partially damaged Pokémon)
    pub fn hp_fraction(mut self, fraction: f64) -> Self {
        self.hp_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn boost(mut self, stat: BattleStat, stage: i8) -> Self {
        if let Some(i) = stat.boost_index() {
            self.boosts[i] = stage.clamp(-6, 6);
        }
        self
    }

    pub fn tera_type(mut self, tera: Type) -> Self {
        self.tera_type = Some(tera);
        self
    }

    // ========================================================================
    // Stat Calculation
    // ========================================================================

    /// Calculate final stats from the override, or from base stats, IV, EVs
    /// and level. `None` when neither is available.
    pub fn calculate_stats(&self) -> Option<StatTable> {
        self.stats_override
            .or_else(|| self.base_stats.map(|base| stats_from_spread(&base, &self.evs, self.iv, self.level)))
    }

    // ========================================================================
    // Spawning
    // ========================================================================

    /// Build the Pokémon that would stand on `side`.
    pub fn build(&self, side: Side) -> Pokemon {
        let stats = if self.hidden { None } else { self.calculate_stats() };
        Pokemon {
            identifier: format!("{}: {}", side.prefix(), self.species),
            species: self.species.clone(),
            level: self.level,
            types: self.types,
            base_stats: self.base_stats,
            stats,
            boosts: self.boosts,
            item: self.item.clone(),
            ability: self.ability.clone(),
            status: self.status,
            hp_fraction: self.hp_fraction,
            tera_type: self.tera_type,
        }
    }

    /// Spawn this Pokémon into the battle state on `side` and return its
    /// identifier.
    pub fn spawn(&self, state: &mut BattleState, side: Side) -> String {
        let pokemon = self.build(side);
        let identifier = pokemon.identifier.clone();
        state.insert(side, pokemon);
        identifier
    }
}
