//! Concrete host-side battle state.
//!
//! `BattleState` is the reference `BattleView`: two teams of [`Pokemon`],
//! one active slot per side, side conditions and weather. Hosts that track a
//! battle some other way implement the view traits directly instead.

use tracing::warn;

use crate::entities::Pokemon;
use crate::view::{BattleView, Combatant, Side};

/// Maximum team size per player
pub const MAX_TEAM_SIZE: usize = 6;

// ============================================================================
// Status & Side Flags
// ============================================================================

bitflags::bitflags! {
    /// Major status conditions (only one can be active at a time)
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Status: u8 {
        const NONE      = 0;
        const BURN      = 1 << 0;
        const FREEZE    = 1 << 1;
        const PARALYSIS = 1 << 2;
        const POISON    = 1 << 3;
        const TOXIC     = 1 << 4; // Badly poisoned
        const SLEEP     = 1 << 5;
    }
}

bitflags::bitflags! {
    /// Side conditions (team-wide effects like hazards and screens)
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SideConditions: u32 {
        // Entry hazards
        const STEALTH_ROCK  = 1 << 0;
        const SPIKES        = 1 << 1;
        const TOXIC_SPIKES  = 1 << 2;
        const STICKY_WEB    = 1 << 3;

        // Screens
        const REFLECT       = 1 << 4;
        const LIGHT_SCREEN  = 1 << 5;
        const AURORA_VEIL   = 1 << 6;

        const TAILWIND      = 1 << 7;
    }
}

impl Status {
    /// Parse a protocol status token ("brn", "par", "tox", ...).
    pub fn from_token(token: &str) -> Status {
        match token {
            "brn" => Status::BURN,
            "frz" => Status::FREEZE,
            "par" => Status::PARALYSIS,
            "psn" => Status::POISON,
            "tox" => Status::TOXIC,
            "slp" => Status::SLEEP,
            _ => Status::NONE,
        }
    }
}

/// Weather in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Weather {
    #[default]
    None = 0,
    Sun = 1,
    Rain = 2,
    Sand = 3,
    Snow = 4,
    HarshSun = 5,  // Primal
    HeavyRain = 6, // Primal
}

impl Weather {
    pub fn from_str(name: &str) -> Weather {
        match crate::ids::normalize_id(name).as_str() {
            "sun" | "sunnyday" => Weather::Sun,
            "rain" | "raindance" => Weather::Rain,
            "sand" | "sandstorm" => Weather::Sand,
            "snow" | "hail" | "snowscape" => Weather::Snow,
            "harshsun" | "desolateland" => Weather::HarshSun,
            "heavyrain" | "primordialsea" => Weather::HeavyRain,
            _ => Weather::None,
        }
    }

    pub const fn is_sun(self) -> bool {
        matches!(self, Weather::Sun | Weather::HarshSun)
    }

    pub const fn is_rain(self) -> bool {
        matches!(self, Weather::Rain | Weather::HeavyRain)
    }
}

// ============================================================================
// Battle State
// ============================================================================

/// A singles battle as the host tracks it.
///
/// Team index 0 is player 1, index 1 is player 2. Each side has at most one
/// active Pokémon.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleState {
    teams: [Vec<Pokemon>; 2],

    /// Index into `teams[side]` of the active Pokémon
    active: [Option<usize>; 2],

    player_side: Side,

    side_conditions: [SideConditions; 2],

    weather: Weather,

    /// Current turn number
    pub turn: u16,
}

impl Default for BattleState {
    fn default() -> Self {
        Self::new(Side::P1)
    }
}

impl BattleState {
    /// Create an empty battle seen from `player_side`.
    pub fn new(player_side: Side) -> Self {
        Self {
            teams: [Vec::new(), Vec::new()],
            active: [None, None],
            player_side,
            side_conditions: [SideConditions::empty(); 2],
            weather: Weather::None,
            turn: 0,
        }
    }

    /// Add a Pokémon to `side`, replacing any with the same identifier.
    /// The first Pokémon on a side becomes active. Returns its team slot, or
    /// `None` if the team is already full.
    pub fn insert(&mut self, side: Side, pokemon: Pokemon) -> Option<usize> {
        let team = &mut self.teams[side.index()];
        let slot = match team.iter().position(|p| p.identifier() == pokemon.identifier()) {
            Some(slot) => {
                team[slot] = pokemon;
                slot
            }
            None if team.len() >= MAX_TEAM_SIZE => {
                warn!(side = ?side, identifier = pokemon.identifier(), "team is full, ignoring insert");
                return None;
            }
            None => {
                team.push(pokemon);
                team.len() - 1
            }
        };
        if self.active[side.index()].is_none() {
            self.active[side.index()] = Some(slot);
        }
        Some(slot)
    }

    /// Switch `side`'s active Pokémon. Returns false if `identifier` is not
    /// on that team.
    pub fn set_active(&mut self, side: Side, identifier: &str) -> bool {
        match self.teams[side.index()].iter().position(|p| p.identifier() == identifier) {
            Some(slot) => {
                self.active[side.index()] = Some(slot);
                true
            }
            None => false,
        }
    }

    pub fn team(&self, side: Side) -> &[Pokemon] {
        &self.teams[side.index()]
    }

    pub fn pokemon(&self, identifier: &str) -> Option<&Pokemon> {
        self.teams.iter().flatten().find(|p| p.identifier() == identifier)
    }

    pub fn pokemon_mut(&mut self, identifier: &str) -> Option<&mut Pokemon> {
        self.teams.iter_mut().flatten().find(|p| p.identifier() == identifier)
    }

    pub fn set_weather(&mut self, weather: Weather) {
        self.weather = weather;
    }

    pub fn set_side_condition(&mut self, side: Side, condition: SideConditions, active: bool) {
        self.side_conditions[side.index()].set(condition, active);
    }

    /// Number of Pokémon on each team
    pub fn team_sizes(&self) -> [usize; 2] {
        [self.teams[0].len(), self.teams[1].len()]
    }
}

impl BattleView for BattleState {
    fn get_pokemon(&self, identifier: &str) -> Option<&dyn Combatant> {
        self.pokemon(identifier).map(|p| p as &dyn Combatant)
    }

    fn active_identifier(&self, side: Side) -> Option<&str> {
        let slot = self.active[side.index()]?;
        self.teams[side.index()].get(slot).map(|p| p.identifier())
    }

    fn player_side(&self) -> Side {
        self.player_side
    }

    fn side_conditions(&self, side: Side) -> SideConditions {
        self.side_conditions[side.index()]
    }

    fn weather(&self) -> Weather {
        self.weather
    }
}
