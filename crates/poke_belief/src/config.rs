//! Tunables for the belief model and the damage estimator.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes. Environment variables override on top.

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::stats::{StatTable, DEFAULT_EV, DEFAULT_IV, DEFAULT_LEVEL, MAX_EV};

/// Likelihood assigned to a role whose pool does not contain an observed value.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Roles below this probability are skipped by the estimator.
pub const DEFAULT_ROLE_THRESHOLD: f64 = 0.01;

/// Shape of the fixed-length belief embedding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingLayout {
    /// Leading slots holding the highest role probabilities
    pub top_roles: usize,
    /// Slots holding the highest unrevealed-move probabilities
    pub top_moves: usize,
    /// Observed-move count is divided by this
    pub move_count_scale: f32,
}

impl Default for EmbeddingLayout {
    fn default() -> Self {
        Self {
            top_roles: 4,
            top_moves: 4,
            move_count_scale: 4.0,
        }
    }
}

impl EmbeddingLayout {
    /// Total embedding length: roles, moves, item flag, move count.
    pub const fn len(&self) -> usize {
        self.top_roles + self.top_moves + 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeliefConfig {
    pub epsilon: f64,
    pub embedding: EmbeddingLayout,
}

impl Default for BeliefConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            embedding: EmbeddingLayout::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub role_threshold: f64,
    /// EV used for every stat of a neutral (unknown) spread
    pub default_ev: u8,
    /// Level assumed when an entity reports none
    pub default_level: u8,
    pub iv: u8,
    /// Stat line used when not even base stats are known
    pub fallback_stats: StatTable,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            role_threshold: DEFAULT_ROLE_THRESHOLD,
            default_ev: DEFAULT_EV,
            default_level: DEFAULT_LEVEL,
            iv: DEFAULT_IV,
            fallback_stats: StatTable::FALLBACK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub belief: BeliefConfig,
    pub estimator: EstimatorConfig,
}

impl EngineConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Read a JSON config file and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `POKE_BELIEF_*` variables. Unparseable or out-of-range values
    /// are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        let epsilon = parse_env("POKE_BELIEF_EPSILON", self.belief.epsilon);
        if epsilon > 0.0 && epsilon < 1.0 {
            self.belief.epsilon = epsilon;
        }

        let threshold = parse_env("POKE_BELIEF_ROLE_THRESHOLD", self.estimator.role_threshold);
        if (0.0..1.0).contains(&threshold) {
            self.estimator.role_threshold = threshold;
        }

        self.estimator.default_ev = parse_env("POKE_BELIEF_DEFAULT_EV", self.estimator.default_ev).min(MAX_EV);

        let level = parse_env("POKE_BELIEF_DEFAULT_LEVEL", self.estimator.default_level);
        if (1..=100).contains(&level) {
            self.estimator.default_level = level;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let eps = self.belief.epsilon;
        if !(eps > 0.0 && eps < 1.0) {
            return Err(out_of_range("belief.epsilon", eps, "(0, 1)"));
        }
        let layout = &self.belief.embedding;
        if layout.top_roles == 0 {
            return Err(out_of_range("belief.embedding.top_roles", layout.top_roles, ">= 1"));
        }
        if layout.top_moves == 0 {
            return Err(out_of_range("belief.embedding.top_moves", layout.top_moves, ">= 1"));
        }
        if !(layout.move_count_scale > 0.0 && layout.move_count_scale.is_finite()) {
            return Err(out_of_range("belief.embedding.move_count_scale", layout.move_count_scale, "> 0"));
        }

        let est = &self.estimator;
        if !(0.0..1.0).contains(&est.role_threshold) {
            return Err(out_of_range("estimator.role_threshold", est.role_threshold, "[0, 1)"));
        }
        if est.default_ev > MAX_EV {
            return Err(out_of_range("estimator.default_ev", est.default_ev, "[0, 252]"));
        }
        if !(1..=100).contains(&est.default_level) {
            return Err(out_of_range("estimator.default_level", est.default_level, "[1, 100]"));
        }
        if est.iv > 31 {
            return Err(out_of_range("estimator.iv", est.iv, "[0, 31]"));
        }
        if est.fallback_stats.hp == 0 {
            return Err(out_of_range("estimator.fallback_stats.hp", 0, ">= 1"));
        }
        Ok(())
    }
}

fn out_of_range(field: &'static str, value: impl ToString, range: &'static str) -> ConfigError {
    ConfigError::OutOfRange {
        field,
        value: value.to_string(),
        range,
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(fallback)
}
