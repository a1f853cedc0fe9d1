use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use poke_belief::{BeliefModel, Observation};
use tracing::warn;

use crate::models::BeliefSummary;
use crate::utils::{load_catalogue, load_config, print_json};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Random-battle set file
    #[arg(short, long)]
    pub catalogue: PathBuf,

    /// Species to inspect
    #[arg(short, long)]
    pub species: String,

    /// Revealed move (repeatable)
    #[arg(short = 'm', long = "move")]
    pub moves: Vec<String>,

    /// Revealed item
    #[arg(long)]
    pub item: Option<String>,

    /// Revealed ability
    #[arg(long)]
    pub ability: Option<String>,

    /// Revealed tera type
    #[arg(long)]
    pub tera: Option<String>,

    /// Engine config file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let catalogue = load_catalogue(&args.catalogue)?;
    let config = load_config(args.config.as_deref())?;
    let mut model = BeliefModel::with_config(catalogue, config.belief);

    let observations = args
        .moves
        .into_iter()
        .map(Observation::Move)
        .chain(args.item.map(Observation::Item))
        .chain(args.ability.map(Observation::Ability))
        .chain(args.tera.map(Observation::Tera));

    if let Err(err) = model.update_many(&args.species, observations) {
        warn!(error = %err, "reveals were inconsistent");
    }

    print_json(&summarize(&mut model, &args.species))
}

/// Everything the model currently believes about `species`.
pub fn summarize(model: &mut BeliefModel, species: &str) -> BeliefSummary {
    let embedding = model.get_belief_embedding(species);
    let belief = model.get_or_create_belief(species);

    BeliefSummary {
        species: belief.species().to_string(),
        roles: belief.role_distribution(),
        most_likely_role: belief.most_likely_role().map(|(role, _)| role.to_string()),
        entropy: belief.role_entropy(),
        observed_moves: belief.observed_moves().iter().cloned().collect(),
        item: belief.observed_item().map(str::to_string),
        ability: belief.observed_ability().map(str::to_string),
        tera: belief.observed_tera().map(str::to_string),
        unrevealed_moves: belief.unrevealed_move_probs().clone(),
        items: belief.item_probs().clone(),
        embedding,
    }
}
