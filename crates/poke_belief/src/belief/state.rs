use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::warn;

use super::{entropy, Distribution, Observation};
use crate::catalogue::{Role, SpeciesEntry};
use crate::error::{BeliefError, RevealedAttribute};
use crate::ids::{normalize_id, same_id};

/// What we believe about one opponent species.
///
/// `probs` is index-aligned with `entry.roles()`. Without catalogue data the
/// role set is empty and only raw observations are recorded.
#[derive(Debug, Clone)]
pub struct BeliefState {
    species: String,
    entry: Option<Arc<SpeciesEntry>>,
    pub(crate) probs: Vec<f64>,

    /// Normalized ids of moves seen so far
    observed_moves: BTreeSet<String>,
    move_usage: BTreeMap<String, u32>,

    observed_item: Option<String>,
    observed_ability: Option<String>,
    observed_tera: Option<String>,

    move_cache: Option<Distribution>,
    item_cache: Option<Distribution>,
}

impl BeliefState {
    /// Uniform prior over the roles of `entry` (empty without one).
    pub fn new(species: impl Into<String>, entry: Option<Arc<SpeciesEntry>>) -> Self {
        let mut state = Self {
            species: species.into(),
            entry,
            probs: Vec::new(),
            observed_moves: BTreeSet::new(),
            move_usage: BTreeMap::new(),
            observed_item: None,
            observed_ability: None,
            observed_tera: None,
            move_cache: None,
            item_cache: None,
        };
        state.reset_uniform();
        state
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn entry(&self) -> Option<&Arc<SpeciesEntry>> {
        self.entry.as_ref()
    }

    pub fn has_roles(&self) -> bool {
        !self.probs.is_empty()
    }

    /// Roles paired with their current probability, in catalogue order.
    pub fn roles(&self) -> impl Iterator<Item = (&Role, f64)> + '_ {
        let roles: &[Role] = self.entry.as_deref().map(SpeciesEntry::roles).unwrap_or(&[]);
        roles.iter().zip(self.probs.iter().copied())
    }

    pub fn role_prob(&self, role: &str) -> Option<f64> {
        self.roles().find(|(r, _)| r.name() == role).map(|(_, p)| p)
    }

    /// The role pmf keyed by role name.
    pub fn role_distribution(&self) -> Distribution {
        self.roles().map(|(r, p)| (r.name().to_string(), p)).collect()
    }

    /// Highest-probability role. Ties go to the earlier role.
    pub fn most_likely_role(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (role, p) in self.roles() {
            if best.map_or(true, |(_, bp)| p > bp) {
                best = Some((role.name(), p));
            }
        }
        best
    }

    pub fn role_entropy(&self) -> f64 {
        entropy(self.probs.iter().copied())
    }

    pub fn observed_moves(&self) -> &BTreeSet<String> {
        &self.observed_moves
    }

    /// How many times `mv` has been seen (any spelling).
    pub fn move_usage(&self, mv: &str) -> u32 {
        self.move_usage.get(&normalize_id(mv)).copied().unwrap_or(0)
    }

    pub fn observed_item(&self) -> Option<&str> {
        self.observed_item.as_deref()
    }

    pub fn observed_ability(&self) -> Option<&str> {
        self.observed_ability.as_deref()
    }

    pub fn observed_tera(&self) -> Option<&str> {
        self.observed_tera.as_deref()
    }

    /// Whether any catalogue role of this species lists `mv`.
    pub fn is_move_possible(&self, mv: &str) -> bool {
        let id = normalize_id(mv);
        self.entry
            .as_deref()
            .map_or(false, |entry| entry.roles().iter().any(|r| r.has_move_id(&id)))
    }

    // ========================================================================
    // Updates
    // ========================================================================

    pub(crate) fn observe(&mut self, observation: &Observation, epsilon: f64) -> Result<(), BeliefError> {
        match observation {
            Observation::Move(mv) => {
                self.observe_move(mv, epsilon);
                Ok(())
            }
            Observation::Item(item) => self.observe_item(item, epsilon),
            Observation::Ability(ability) => self.observe_ability(ability, epsilon),
            Observation::Tera(tera) => self.observe_tera(tera),
        }
    }

    fn observe_move(&mut self, mv: &str, epsilon: f64) {
        let id = normalize_id(mv);
        *self.move_usage.entry(id.clone()).or_insert(0) += 1;
        if self.observed_moves.contains(&id) {
            return;
        }
        self.observed_moves.insert(id.clone());
        self.move_cache = None;
        self.reweight(epsilon, |role| role.has_move_id(&id));
    }

    fn observe_item(&mut self, item: &str, epsilon: f64) -> Result<(), BeliefError> {
        if let Some(previous) = &self.observed_item {
            return self.check_repeat(RevealedAttribute::Item, previous, item);
        }
        self.observed_item = Some(item.to_string());
        self.item_cache = None;
        let id = normalize_id(item);
        self.reweight(epsilon, |role| role.has_item_id(&id));
        Ok(())
    }

    fn observe_ability(&mut self, ability: &str, epsilon: f64) -> Result<(), BeliefError> {
        if let Some(previous) = &self.observed_ability {
            return self.check_repeat(RevealedAttribute::Ability, previous, ability);
        }
        self.observed_ability = Some(ability.to_string());
        let id = normalize_id(ability);
        self.reweight(epsilon, |role| role.has_ability_id(&id));
        Ok(())
    }

    // Tera is recorded only: catalogue tera pools are too broad to
    // discriminate between roles.
    fn observe_tera(&mut self, tera: &str) -> Result<(), BeliefError> {
        if let Some(previous) = &self.observed_tera {
            return self.check_repeat(RevealedAttribute::Tera, previous, tera);
        }
        self.observed_tera = Some(tera.to_string());
        Ok(())
    }

    fn check_repeat(&self, attribute: RevealedAttribute, previous: &str, observed: &str) -> Result<(), BeliefError> {
        if same_id(previous, observed) {
            return Ok(());
        }
        Err(BeliefError::RevealConflict {
            species: self.species.clone(),
            attribute,
            previous: previous.to_string(),
            observed: observed.to_string(),
        })
    }

    /// Multiply each role by 1 or `epsilon`, then renormalize.
    fn reweight(&mut self, epsilon: f64, compatible: impl Fn(&Role) -> bool) {
        let Some(entry) = &self.entry else { return };
        if self.probs.is_empty() {
            return;
        }
        for (p, role) in self.probs.iter_mut().zip(entry.roles()) {
            *p *= if compatible(role) { 1.0 } else { epsilon };
        }
        self.normalize();
    }

    pub(crate) fn normalize(&mut self) {
        let total: f64 = self.probs.iter().sum();
        if total > 0.0 && total.is_finite() {
            for p in &mut self.probs {
                *p /= total;
            }
        } else {
            warn!(species = %self.species, total, "degenerate role mass, resetting to uniform");
            self.reset_uniform();
        }
        self.move_cache = None;
        self.item_cache = None;
    }

    fn reset_uniform(&mut self) {
        let n = self.entry.as_deref().map_or(0, |e| e.roles().len());
        self.probs = vec![1.0 / n as f64; n];
        self.move_cache = None;
        self.item_cache = None;
    }

    // ========================================================================
    // Derived distributions
    // ========================================================================

    /// Probability of each not-yet-seen move, keyed by display name.
    pub fn unrevealed_move_probs(&mut self) -> &Distribution {
        if self.move_cache.is_none() {
            self.move_cache = Some(self.compute_move_probs());
        }
        self.move_cache.get_or_insert_with(Distribution::new)
    }

    /// Probability of each held item. Certain once revealed.
    pub fn item_probs(&mut self) -> &Distribution {
        if self.item_cache.is_none() {
            self.item_cache = Some(self.compute_item_probs());
        }
        self.item_cache.get_or_insert_with(Distribution::new)
    }

    fn compute_move_probs(&self) -> Distribution {
        let observed = &self.observed_moves;
        spread_over_pools(self.roles(), |role| {
            role.move_pool()
                .iter()
                .zip(role.move_ids())
                .filter(|(_, id)| !observed.contains(*id))
                .map(|(name, id)| (name.as_str(), id.as_str()))
                .collect()
        }, |role| role.move_pool().len())
    }

    fn compute_item_probs(&self) -> Distribution {
        if let Some(item) = &self.observed_item {
            return Distribution::from([(item.clone(), 1.0)]);
        }
        spread_over_pools(self.roles(), |role| {
            role.item_pool()
                .iter()
                .zip(role.item_ids())
                .map(|(name, id)| (name.as_str(), id.as_str()))
                .collect()
        }, |role| role.item_pool().len())
    }
}

/// Give each role's mass to its pool in equal shares (`p / pool_len`),
/// accumulate by normalized id and renormalize what was kept.
fn spread_over_pools<'r>(
    roles: impl Iterator<Item = (&'r Role, f64)>,
    kept: impl Fn(&'r Role) -> Vec<(&'r str, &'r str)>,
    pool_len: impl Fn(&'r Role) -> usize,
) -> Distribution {
    // id -> (display name, mass)
    let mut acc: BTreeMap<&str, (&str, f64)> = BTreeMap::new();
    for (role, p) in roles {
        let len = pool_len(role);
        if len == 0 {
            continue;
        }
        let share = p / len as f64;
        for (name, id) in kept(role) {
            acc.entry(id).or_insert((name, 0.0)).1 += share;
        }
    }

    let total: f64 = acc.values().map(|(_, m)| m).sum();
    if !(total > 0.0 && total.is_finite()) {
        return Distribution::new();
    }
    acc.into_values()
        .map(|(name, mass)| (name.to_string(), mass / total))
        .collect()
}
