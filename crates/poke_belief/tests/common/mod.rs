//! Shared fixtures for the integration tests.
//!
//! A small Ferrothorn/Heatran catalogue and helpers that set up a singles
//! battle with the caller on p1 and a hidden-spread opponent on p2.

#![allow(dead_code)]

use std::sync::Arc;

use poke_belief::catalogue::{BuildCatalogue, Role, SpeciesEntry};
use poke_belief::entities::PokemonConfig;
use poke_belief::state::BattleState;
use poke_belief::stats::{EvSpread, StatTable};
use poke_belief::types::Type;
use poke_belief::view::Side;

pub const FERROTHORN_BASE: StatTable = StatTable::new(74, 94, 131, 54, 116, 20);
pub const HEATRAN_BASE: StatTable = StatTable::new(91, 90, 106, 130, 106, 77);
pub const GARCHOMP_BASE: StatTable = StatTable::new(108, 130, 95, 80, 85, 102);

pub const EPS: f64 = 1e-9;

/// Bulky support vs. an offensive set with a lighter spread.
pub fn ferrothorn_entry() -> SpeciesEntry {
    SpeciesEntry::new("Ferrothorn")
        .with_role(
            Role::new("Bulky Support")
                .abilities(["Iron Barbs"])
                .items(["Leftovers"])
                .moves(["Leech Seed", "Stealth Rock", "Spikes", "Power Whip", "Knock Off"])
                .tera_types(["Water"])
                .evs(EvSpread { hp: 252, atk: 0, def: 128, spa: 0, spd: 128, spe: 0 })
                .level(84),
        )
        .with_role(
            Role::new("Bulky Attacker")
                .abilities(["Iron Barbs"])
                .items(["Rocky Helmet", "Leftovers"])
                .moves(["Gyro Ball", "Power Whip", "Knock Off", "Leech Seed"])
                .tera_types(["Fighting"])
                .evs(EvSpread::uniform(85))
                .level(84),
        )
}

pub fn garchomp_entry() -> SpeciesEntry {
    SpeciesEntry::new("Garchomp")
        .with_role(
            Role::new("Fast Attacker")
                .abilities(["Rough Skin"])
                .items(["Life Orb", "Choice Band"])
                .moves(["Earthquake", "Outrage", "Stone Edge", "Swords Dance", "Fire Fang"])
                .level(80),
        )
        .with_role(
            Role::new("Bulky Support")
                .abilities(["Rough Skin"])
                .items(["Rocky Helmet"])
                .moves(["Earthquake", "Stealth Rock", "Spikes", "Dragon Tail"])
                .level(80),
        )
        .with_role(
            Role::new("Setup Sweeper")
                .abilities(["Rough Skin"])
                .items(["Loaded Dice"])
                .moves(["Scale Shot", "Earthquake", "Swords Dance", "Fire Fang"])
                .level(80),
        )
}

pub fn catalogue() -> Arc<BuildCatalogue> {
    Arc::new(
        BuildCatalogue::from_entries([ferrothorn_entry(), garchomp_entry()])
            .expect("fixture catalogue is valid"),
    )
}

pub fn heatran() -> PokemonConfig {
    PokemonConfig::new("Heatran")
        .level(82)
        .types(Type::Fire, Some(Type::Steel))
        .base_stats(HEATRAN_BASE)
        .ability("Flash Fire")
}

/// Opponent Ferrothorn whose spread has not been revealed.
pub fn hidden_ferrothorn() -> PokemonConfig {
    PokemonConfig::new("Ferrothorn")
        .level(84)
        .types(Type::Grass, Some(Type::Steel))
        .base_stats(FERROTHORN_BASE)
        .hidden()
}

/// Caller's Heatran on p1 against a hidden Ferrothorn on p2.
pub fn heatran_vs_ferrothorn() -> (BattleState, String, String) {
    battle_with(heatran(), hidden_ferrothorn())
}

pub fn battle_with(attacker: PokemonConfig, defender: PokemonConfig) -> (BattleState, String, String) {
    let mut state = BattleState::new(Side::P1);
    let attacker_id = attacker.spawn(&mut state, Side::P1);
    let defender_id = defender.spawn(&mut state, Side::P2);
    (state, attacker_id, defender_id)
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}
