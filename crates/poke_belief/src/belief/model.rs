use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::{belief_embedding, BeliefState, Distribution, Observation};
use crate::catalogue::{BuildCatalogue, Role};
use crate::config::BeliefConfig;
use crate::error::BeliefError;
use crate::ids::normalize_id;

/// Per-battle store of opponent beliefs, keyed by normalized species.
///
/// States are created lazily the first time a species is referenced and
/// dropped on [`BeliefModel::reset`].
#[derive(Debug, Clone)]
pub struct BeliefModel {
    catalogue: Arc<BuildCatalogue>,
    config: BeliefConfig,
    beliefs: HashMap<String, BeliefState>,
}

impl BeliefModel {
    pub fn new(catalogue: Arc<BuildCatalogue>) -> Self {
        Self::with_config(catalogue, BeliefConfig::default())
    }

    pub fn with_config(catalogue: Arc<BuildCatalogue>, config: BeliefConfig) -> Self {
        Self {
            catalogue,
            config,
            beliefs: HashMap::new(),
        }
    }

    pub fn config(&self) -> &BeliefConfig {
        &self.config
    }

    pub fn catalogue(&self) -> &Arc<BuildCatalogue> {
        &self.catalogue
    }

    /// Forget every opponent (new battle).
    pub fn reset(&mut self) {
        self.beliefs.clear();
    }

    pub fn len(&self) -> usize {
        self.beliefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beliefs.is_empty()
    }

    /// Existing belief for `species`, if it has been referenced.
    pub fn belief(&self, species: &str) -> Option<&BeliefState> {
        self.beliefs.get(&normalize_id(species))
    }

    /// The belief for `species`, created with a uniform prior on first use.
    pub fn get_or_create_belief(&mut self, species: &str) -> &mut BeliefState {
        let catalogue = &self.catalogue;
        self.beliefs.entry(normalize_id(species)).or_insert_with(|| {
            let entry = catalogue.get(species).cloned();
            if entry.is_none() {
                debug!(species, "no catalogue entry, tracking raw observations only");
            }
            BeliefState::new(species, entry)
        })
    }

    /// Feed one revealed fact. Only a contradiction of an earlier reveal is
    /// an error; the earlier value is kept.
    pub fn update(&mut self, species: &str, observation: Observation) -> Result<(), BeliefError> {
        let epsilon = self.config.epsilon;
        let result = self.get_or_create_belief(species).observe(&observation, epsilon);
        if let Err(err) = &result {
            warn!(species, error = %err, "inconsistent reveal");
        }
        result
    }

    /// Feed several facts at once. Every observation is applied; the first
    /// error (if any) is returned.
    pub fn update_many<I>(&mut self, species: &str, observations: I) -> Result<(), BeliefError>
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut first_err = None;
        for observation in observations {
            if let Err(err) = self.update(species, observation) {
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    pub fn get_unrevealed_move_probs(&mut self, species: &str) -> &Distribution {
        self.get_or_create_belief(species).unrevealed_move_probs()
    }

    pub fn get_item_probs(&mut self, species: &str) -> &Distribution {
        self.get_or_create_belief(species).item_probs()
    }

    /// Role entropy in bits.
    pub fn get_role_entropy(&mut self, species: &str) -> f64 {
        self.get_or_create_belief(species).role_entropy()
    }

    pub fn get_belief_embedding(&mut self, species: &str) -> Vec<f32> {
        let layout = self.config.embedding;
        belief_embedding(self.get_or_create_belief(species), &layout)
    }

    /// Roles of `species` with their weights, without creating a belief.
    /// Unreferenced species get the uniform prior.
    pub fn role_weights(&self, species: &str) -> Vec<(&Role, f64)> {
        if let Some(state) = self.belief(species) {
            return state.roles().collect();
        }
        match self.catalogue.get(species) {
            Some(entry) if !entry.is_empty() => {
                let p = 1.0 / entry.roles().len() as f64;
                entry.roles().iter().map(|role| (role, p)).collect()
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::SpeciesEntry;

    fn catalogue() -> Arc<BuildCatalogue> {
        let ferrothorn = SpeciesEntry::new("Ferrothorn")
            .with_role(
                Role::new("Wall")
                    .abilities(["Iron Barbs"])
                    .items(["Leftovers"])
                    .moves(["Stealth Rock", "Leech Seed", "Gyro Ball"]),
            )
            .with_role(
                Role::new("Offense")
                    .abilities(["Iron Barbs"])
                    .items(["Rocky Helmet"])
                    .moves(["Swords Dance", "Gyro Ball", "Knock Off"]),
            );
        Arc::new(BuildCatalogue::from_entries([ferrothorn]).unwrap())
    }

    #[test]
    fn test_lazy_creation() {
        let mut model = BeliefModel::new(catalogue());
        assert!(model.belief("Ferrothorn").is_none());
        model.get_or_create_belief("Ferrothorn");
        assert_eq!(model.len(), 1);
        // Same species, other spelling
        model.get_or_create_belief("ferro-thorn");
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_update_and_query() {
        let mut model = BeliefModel::new(catalogue());
        model.update("Ferrothorn", Observation::Move("Stealth Rock".into())).unwrap();

        let belief = model.belief("Ferrothorn").unwrap();
        assert!(belief.role_prob("Wall").unwrap() > 0.999_999);

        let items = model.get_item_probs("Ferrothorn").clone();
        assert!(items["Leftovers"] > 0.999_999);
        assert!(items["Rocky Helmet"] < 1e-6);

        let entropy = model.get_role_entropy("Ferrothorn");
        assert!(entropy < 0.01);
    }

    #[test]
    fn test_unknown_species_has_empty_distributions() {
        let mut model = BeliefModel::new(catalogue());
        model.update("Missingno", Observation::Move("Sky Attack".into())).unwrap();
        model.update("Missingno", Observation::Ability("Levitate".into())).unwrap();
        assert!(model.get_unrevealed_move_probs("Missingno").is_empty());
        assert!(model.get_item_probs("Missingno").is_empty());
        assert_eq!(model.get_role_entropy("Missingno"), 0.0);
    }

    #[test]
    fn test_update_many_applies_all() {
        let mut model = BeliefModel::new(catalogue());
        let result = model.update_many(
            "Ferrothorn",
            [
                Observation::Item("Leftovers".into()),
                Observation::Item("Rocky Helmet".into()),
                Observation::Move("Leech Seed".into()),
            ],
        );
        assert!(result.is_err());
        let belief = model.belief("Ferrothorn").unwrap();
        assert_eq!(belief.observed_item(), Some("Leftovers"));
        assert_eq!(belief.move_usage("Leech Seed"), 1);
    }

    #[test]
    fn test_role_weights_without_belief() {
        let model = BeliefModel::new(catalogue());
        let weights = model.role_weights("Ferrothorn");
        assert_eq!(weights.len(), 2);
        assert!(weights.iter().all(|(_, p)| *p == 0.5));
        assert!(model.is_empty());
        assert!(model.role_weights("Missingno").is_empty());
    }

    #[test]
    fn test_reset() {
        let mut model = BeliefModel::new(catalogue());
        model.update("Ferrothorn", Observation::Move("Knock Off".into())).unwrap();
        model.reset();
        assert!(model.is_empty());
        assert_eq!(model.get_or_create_belief("Ferrothorn").role_prob("Offense"), Some(0.5));
    }

    #[test]
    fn test_custom_epsilon() {
        let config = BeliefConfig {
            epsilon: 0.5,
            ..BeliefConfig::default()
        };
        let mut model = BeliefModel::with_config(catalogue(), config);
        model.update("Ferrothorn", Observation::Move("Knock Off".into())).unwrap();
        let offense = model.belief("Ferrothorn").unwrap().role_prob("Offense").unwrap();
        // 0.5 / (0.5 + 0.25)
        assert!((offense - 2.0 / 3.0).abs() < 1e-12);
    }
}
