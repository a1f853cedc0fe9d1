//! poke_belief - opponent-build inference and belief-weighted damage estimates
//!
//! Tracks a probability distribution over each opposing species' competitive
//! roles, updates it from revealed moves, items, abilities and tera types,
//! and uses it to estimate damage against Pokémon whose spreads are hidden.

/// Identifier normalization
pub mod ids;

/// Type definitions and type chart
pub mod types;

/// Stat tables and stat formulas
pub mod stats;

/// Move descriptions
pub mod moves;

/// Error types
pub mod error;

/// Species/role build catalogue
pub mod catalogue;

/// Tunable parameters
pub mod config;

/// Read-only battle interfaces
pub mod view;

/// Concrete battle state
pub mod state;

/// Entity blueprints and spawning
pub mod entities;

/// Non-mutating battle overlays
pub mod overlay;

/// Per-species role beliefs
pub mod belief;

/// Damage formula and belief-weighted estimator
pub mod damage;

// Re-export commonly used types
pub use belief::{belief_embedding, entropy, BeliefModel, BeliefState, Distribution, Observation};
pub use catalogue::{BuildCatalogue, Role, SpeciesEntry};
pub use config::{BeliefConfig, EmbeddingLayout, EngineConfig, EstimatorConfig};
pub use damage::{BeliefDamageEstimator, DamageFormula, DamageRange, DamageResult, StandardFormula};
pub use entities::{Pokemon, PokemonConfig};
pub use error::{BeliefError, CatalogueError, ConfigError, FormulaError, RevealedAttribute};
pub use ids::normalize_id;
pub use moves::{MoveCategory, MoveInfo};
pub use overlay::{Overrides, ShadowBattle, ShadowPokemon};
pub use state::{BattleState, SideConditions, Status, Weather};
pub use stats::{BattleStat, EvSpread, StatTable};
pub use types::Type;
pub use view::{BattleView, Combatant, Side};
