//! Opponent build inference.
//!
//! A [`BeliefModel`] keeps one [`BeliefState`] per opponent species: a
//! probability mass over the catalogue roles of that species, updated by
//! Bayes' rule as moves, items and abilities are revealed.

mod embedding;
mod model;
mod state;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use embedding::belief_embedding;
pub use model::BeliefModel;
pub use state::BeliefState;

/// Name → probability. Ordered so that output is deterministic.
pub type Distribution = BTreeMap<String, f64>;

/// One revealed fact about an opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Observation {
    Move(String),
    Item(String),
    Ability(String),
    Tera(String),
}

impl Observation {
    pub fn value(&self) -> &str {
        match self {
            Observation::Move(v) | Observation::Item(v) | Observation::Ability(v) | Observation::Tera(v) => v,
        }
    }
}

/// Shannon entropy in bits. Zero-probability entries contribute nothing.
pub fn entropy<I: IntoIterator<Item = f64>>(probs: I) -> f64 {
    probs
        .into_iter()
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.log2())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy() {
        assert_eq!(entropy(Vec::<f64>::new()), 0.0);
        assert_eq!(entropy([1.0]), 0.0);
        assert!((entropy([0.5, 0.5]) - 1.0).abs() < 1e-12);
        assert!((entropy([0.25; 4]) - 2.0).abs() < 1e-12);
        assert!((entropy([0.5, 0.5, 0.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_observation_serde() {
        let obs: Observation = serde_json::from_str(r#"{"kind": "move", "value": "Stealth Rock"}"#).unwrap();
        assert_eq!(obs, Observation::Move("Stealth Rock".into()));
        assert_eq!(obs.value(), "Stealth Rock");
    }
}
