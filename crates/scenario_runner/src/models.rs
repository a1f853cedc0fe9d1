use poke_belief::{DamageResult, Distribution, EngineConfig, EvSpread, MoveInfo, Observation, StatTable, Type};
use serde::{Deserialize, Serialize};

// ============================================================================
// Scenario input
// ============================================================================

#[derive(Deserialize, Debug, Clone)]
pub struct Scenario {
    pub name: String,
    #[serde(default = "default_player_side")]
    pub player_side: String,
    #[serde(default)]
    pub weather: Option<String>,
    pub pokemon: Vec<PokemonSetup>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_player_side() -> String {
    "p1".to_string()
}

#[derive(Deserialize, Debug, Clone)]
pub struct PokemonSetup {
    pub side: String,
    pub species: String,
    pub level: Option<u8>,
    pub types: Vec<Type>,
    pub base_stats: Option<StatTable>,
    /// Exact stats, for a Pokémon whose spread is fully known
    pub stats: Option<StatTable>,
    pub evs: Option<EvSpread>,
    pub item: Option<String>,
    pub ability: Option<String>,
    /// Protocol status token ("brn", "par", ...)
    pub status: Option<String>,
    pub hp_fraction: Option<f64>,
    pub tera_type: Option<Type>,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Step {
    pub turn: u16,
    pub species: String,
    #[serde(default)]
    pub observations: Vec<Observation>,
    #[serde(default)]
    pub estimates: Vec<EstimateRequest>,
    #[serde(default)]
    pub incoming: Vec<IncomingRequest>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EstimateRequest {
    #[serde(rename = "move")]
    pub mv: MoveInfo,
    /// Opponent's active attacks ours instead of the reverse
    #[serde(default)]
    pub incoming: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy)]
pub struct IncomingRequest {
    #[serde(rename = "type")]
    pub move_type: Type,
    pub power: u16,
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Serialize, Debug, Clone)]
pub struct ReplayReport {
    pub scenario: String,
    pub config: EngineConfig,
    pub steps: Vec<StepReport>,
}

#[derive(Serialize, Debug, Clone)]
pub struct StepReport {
    pub turn: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<String>,
    pub belief: BeliefSummary,
    pub estimates: Vec<EstimateReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub incoming: Vec<IncomingReport>,
}

#[derive(Serialize, Debug, Clone)]
pub struct EstimateReport {
    #[serde(rename = "move")]
    pub mv: String,
    pub incoming: bool,
    pub result: DamageResult,
}

#[derive(Serialize, Debug, Clone)]
pub struct IncomingReport {
    #[serde(flatten)]
    pub request: IncomingRequest,
    pub fraction: f64,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct BeliefSummary {
    pub species: String,
    pub roles: Distribution,
    pub most_likely_role: Option<String>,
    pub entropy: f64,
    pub observed_moves: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tera: Option<String>,
    pub unrevealed_moves: Distribution,
    pub items: Distribution,
    pub embedding: Vec<f32>,
}
