//! Non-mutating "what if" views of a battle.
//!
//! A [`ShadowPokemon`] answers every [`Combatant`] query from its
//! [`Overrides`] when one is set, and from the real combatant otherwise. A
//! [`ShadowBattle`] routes identifier lookups to its shadows and delegates
//! everything else to the real battle. Nothing is copied: building an overlay
//! costs one map entry per overridden combatant, and the real battle is only
//! ever borrowed immutably.

use std::collections::HashMap;
use std::fmt;

use crate::state::{SideConditions, Status, Weather};
use crate::stats::StatTable;
use crate::types::Type;
use crate::view::{BattleView, Combatant, Side};

/// Per-field overrides for one combatant. `None` means "read through".
///
/// `item` and `ability` are doubly optional: `Some(None)` overrides the
/// field to "no item"/"no ability", which is different from not overriding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub stats: Option<StatTable>,
    pub level: Option<u8>,
    pub item: Option<Option<String>>,
    pub ability: Option<Option<String>>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(mut self, stats: StatTable) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    pub fn item(mut self, item: Option<String>) -> Self {
        self.item = Some(item);
        self
    }

    pub fn ability(mut self, ability: Option<String>) -> Self {
        self.ability = Some(ability);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_none() && self.level.is_none() && self.item.is_none() && self.ability.is_none()
    }
}

/// A combatant seen through a set of overrides.
pub struct ShadowPokemon<'a> {
    real: &'a dyn Combatant,
    overrides: Overrides,
}

impl<'a> ShadowPokemon<'a> {
    pub fn new(real: &'a dyn Combatant, overrides: Overrides) -> Self {
        Self { real, overrides }
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// The underlying combatant.
    pub fn real(&self) -> &'a dyn Combatant {
        self.real
    }
}

impl fmt::Debug for ShadowPokemon<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShadowPokemon")
            .field("identifier", &self.real.identifier())
            .field("overrides", &self.overrides)
            .finish()
    }
}

impl Combatant for ShadowPokemon<'_> {
    fn identifier(&self) -> &str {
        self.real.identifier()
    }

    fn species(&self) -> &str {
        self.real.species()
    }

    fn level(&self) -> u8 {
        self.overrides.level.unwrap_or_else(|| self.real.level())
    }

    fn types(&self) -> [Type; 2] {
        self.real.types()
    }

    fn base_stats(&self) -> Option<StatTable> {
        self.real.base_stats()
    }

    fn stats(&self) -> Option<StatTable> {
        self.overrides.stats.or_else(|| self.real.stats())
    }

    fn boosts(&self) -> [i8; 5] {
        self.real.boosts()
    }

    fn item(&self) -> Option<&str> {
        match &self.overrides.item {
            Some(item) => item.as_deref(),
            None => self.real.item(),
        }
    }

    fn ability(&self) -> Option<&str> {
        match &self.overrides.ability {
            Some(ability) => ability.as_deref(),
            None => self.real.ability(),
        }
    }

    fn status(&self) -> Status {
        self.real.status()
    }

    fn current_hp_fraction(&self) -> f64 {
        self.real.current_hp_fraction()
    }

    fn tera_type(&self) -> Option<Type> {
        self.real.tera_type()
    }
}

/// A battle in which some combatants are replaced by shadows.
pub struct ShadowBattle<'a> {
    real: &'a dyn BattleView,
    shadows: HashMap<String, ShadowPokemon<'a>>,
}

impl<'a> ShadowBattle<'a> {
    pub fn new(real: &'a dyn BattleView) -> Self {
        Self {
            real,
            shadows: HashMap::new(),
        }
    }

    /// Shadow `identifier` with `overrides`, replacing any earlier shadow of
    /// it. Returns false (and changes nothing) if the real battle has no
    /// such combatant.
    pub fn insert(&mut self, identifier: &str, overrides: Overrides) -> bool {
        match self.real.get_pokemon(identifier) {
            Some(real) => {
                self.shadows
                    .insert(identifier.to_string(), ShadowPokemon::new(real, overrides));
                true
            }
            None => false,
        }
    }

    /// Builder form of [`ShadowBattle::insert`].
    pub fn with_override(mut self, identifier: &str, overrides: Overrides) -> Self {
        self.insert(identifier, overrides);
        self
    }

    pub fn shadow(&self, identifier: &str) -> Option<&ShadowPokemon<'a>> {
        self.shadows.get(identifier)
    }

    pub fn real(&self) -> &'a dyn BattleView {
        self.real
    }
}

impl BattleView for ShadowBattle<'_> {
    fn get_pokemon(&self, identifier: &str) -> Option<&dyn Combatant> {
        match self.shadows.get(identifier) {
            Some(shadow) => Some(shadow as &dyn Combatant),
            None => self.real.get_pokemon(identifier),
        }
    }

    fn active_identifier(&self, side: Side) -> Option<&str> {
        self.real.active_identifier(side)
    }

    // Resolve the identifier on the real battle, then look it up again here
    // so an overridden active combatant is seen through its shadow.
    fn active_pokemon(&self, side: Side) -> Option<&dyn Combatant> {
        let identifier = self.real.active_pokemon(side)?.identifier();
        self.get_pokemon(identifier)
    }

    fn player_side(&self) -> Side {
        self.real.player_side()
    }

    fn side_conditions(&self, side: Side) -> SideConditions {
        self.real.side_conditions(side)
    }

    fn weather(&self) -> Weather {
        self.real.weather()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PokemonConfig;
    use crate::state::BattleState;

    const FERROTHORN_BASE: StatTable = StatTable::new(74, 94, 131, 54, 116, 20);

    fn battle() -> BattleState {
        let mut state = BattleState::new(Side::P1);
        PokemonConfig::new("Gholdengo")
            .types(Type::Steel, Some(Type::Ghost))
            .base_stats(StatTable::new(87, 60, 95, 133, 91, 84))
            .ability("Good as Gold")
            .item("Choice Specs")
            .spawn(&mut state, Side::P1);
        PokemonConfig::new("Ferrothorn")
            .types(Type::Grass, Some(Type::Steel))
            .base_stats(FERROTHORN_BASE)
            .hidden()
            .spawn(&mut state, Side::P2);
        state.set_weather(Weather::Rain);
        state
    }

    #[test]
    fn test_override_then_read_through() {
        let state = battle();
        let stats = StatTable::new(250, 100, 256, 100, 200, 50);
        let shadow = ShadowBattle::new(&state).with_override(
            "p2: Ferrothorn",
            Overrides::new().stats(stats).item(Some("Leftovers".into())),
        );

        let ferro = shadow.get_pokemon("p2: Ferrothorn").unwrap();
        assert_eq!(ferro.stats(), Some(stats));
        assert_eq!(ferro.item(), Some("Leftovers"));
        // Not overridden: falls through
        assert_eq!(ferro.ability(), None);
        assert_eq!(ferro.level(), 80);
        assert_eq!(ferro.types(), [Type::Grass, Type::Steel]);
    }

    #[test]
    fn test_override_to_none() {
        let state = battle();
        let shadow = ShadowBattle::new(&state)
            .with_override("p1: Gholdengo", Overrides::new().item(None).ability(None));
        let gholdengo = shadow.get_pokemon("p1: Gholdengo").unwrap();
        assert_eq!(gholdengo.item(), None);
        assert_eq!(gholdengo.ability(), None);
    }

    #[test]
    fn test_real_battle_untouched() {
        let state = battle();
        {
            let shadow = ShadowBattle::new(&state)
                .with_override("p2: Ferrothorn", Overrides::new().stats(StatTable::FALLBACK).level(100));
            assert_eq!(shadow.get_pokemon("p2: Ferrothorn").unwrap().level(), 100);
        }
        let ferro = state.get_pokemon("p2: Ferrothorn").unwrap();
        assert_eq!(ferro.stats(), None);
        assert_eq!(ferro.level(), 80);
    }

    #[test]
    fn test_active_pokemon_sees_shadow() {
        let state = battle();
        let shadow = ShadowBattle::new(&state).with_override("p2: Ferrothorn", Overrides::new().level(55));
        let active = shadow.active_pokemon(Side::P2).unwrap();
        assert_eq!(active.level(), 55);
        assert_eq!(shadow.active_pokemon(Side::P1).unwrap().item(), Some("Choice Specs"));
    }

    #[test]
    fn test_context_delegates() {
        let state = battle();
        let shadow = ShadowBattle::new(&state);
        assert_eq!(shadow.weather(), Weather::Rain);
        assert_eq!(shadow.player_side(), Side::P1);
        assert_eq!(shadow.active_identifier(Side::P2), Some("p2: Ferrothorn"));
    }

    #[test]
    fn test_unknown_identifier_ignored() {
        let state = battle();
        let mut shadow = ShadowBattle::new(&state);
        assert!(!shadow.insert("p2: Garchomp", Overrides::new().level(1)));
        assert!(shadow.get_pokemon("p2: Garchomp").is_none());
        assert!(shadow.shadow("p2: Garchomp").is_none());
    }

    #[test]
    fn test_overlays_are_independent() {
        let state = battle();
        let a = ShadowBattle::new(&state).with_override("p2: Ferrothorn", Overrides::new().level(60));
        let b = ShadowBattle::new(&state).with_override("p2: Ferrothorn", Overrides::new().level(90));
        assert_eq!(a.get_pokemon("p2: Ferrothorn").unwrap().level(), 60);
        assert_eq!(b.get_pokemon("p2: Ferrothorn").unwrap().level(), 90);
    }
}
