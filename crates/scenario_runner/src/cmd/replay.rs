use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use poke_belief::{
    BattleState, BeliefDamageEstimator, BeliefModel, PokemonConfig, StandardFormula, Status, Weather,
};
use tracing::{info, warn};

use super::inspect::summarize;
use crate::models::{EstimateReport, IncomingReport, PokemonSetup, ReplayReport, Scenario, StepReport};
use crate::utils::{load_catalogue, load_config, parse_side, print_json, read_json};

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Random-battle set file
    #[arg(short, long)]
    pub catalogue: PathBuf,

    /// Scenario file (JSON)
    #[arg(short, long)]
    pub scenario: PathBuf,

    /// Engine config file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: ReplayArgs) -> Result<()> {
    let catalogue = load_catalogue(&args.catalogue)?;
    let config = load_config(args.config.as_deref())?;
    let scenario: Scenario = read_json(&args.scenario)?;
    info!(scenario = %scenario.name, steps = scenario.steps.len(), "replaying");

    let mut state = build_battle(&scenario)?;
    let mut model = BeliefModel::with_config(catalogue, config.belief);
    let estimator = BeliefDamageEstimator::with_config(StandardFormula, config.estimator);

    let mut steps = Vec::with_capacity(scenario.steps.len());
    for step in &scenario.steps {
        state.turn = step.turn;

        let mut conflicts = Vec::new();
        for observation in &step.observations {
            if let Err(err) = model.update(&step.species, observation.clone()) {
                conflicts.push(err.to_string());
            }
        }

        let estimates = step
            .estimates
            .iter()
            .map(|request| EstimateReport {
                mv: request.mv.name.clone(),
                incoming: request.incoming,
                result: estimator.estimate_active(&state, &model, &request.mv, !request.incoming),
            })
            .collect();

        let incoming = step
            .incoming
            .iter()
            .map(|request| IncomingReport {
                request: *request,
                fraction: estimator.estimate_incoming(&state, request.move_type, request.power),
            })
            .collect();

        steps.push(StepReport {
            turn: step.turn,
            conflicts,
            belief: summarize(&mut model, &step.species),
            estimates,
            incoming,
        });
    }

    print_json(&ReplayReport {
        scenario: scenario.name,
        config,
        steps,
    })
}

fn build_battle(scenario: &Scenario) -> Result<BattleState> {
    let mut state = BattleState::new(parse_side(&scenario.player_side)?);
    if let Some(weather) = &scenario.weather {
        state.set_weather(Weather::from_str(weather));
    }
    for setup in &scenario.pokemon {
        let side = parse_side(&setup.side).with_context(|| format!("pokemon {}", setup.species))?;
        let identifier = pokemon_config(setup)?.spawn(&mut state, side);
        if setup.hidden && setup.base_stats.is_none() {
            warn!(pokemon = %identifier, "hidden with no base stats, estimates will use the fallback line");
        }
    }
    Ok(state)
}

fn pokemon_config(setup: &PokemonSetup) -> Result<PokemonConfig> {
    let (primary, secondary) = match setup.types.as_slice() {
        [primary] => (*primary, None),
        [primary, secondary] => (*primary, Some(*secondary)),
        _ => bail!("{}: expected one or two types, got {}", setup.species, setup.types.len()),
    };

    let mut config = PokemonConfig::new(setup.species.as_str()).types(primary, secondary);
    if let Some(level) = setup.level {
        config = config.level(level);
    }
    if let Some(base) = setup.base_stats {
        config = config.base_stats(base);
    }
    if let Some(stats) = setup.stats {
        config = config.stats(stats);
    }
    if let Some(evs) = setup.evs {
        config = config.evs(evs);
    }
    if let Some(item) = &setup.item {
        config = config.item(item.as_str());
    }
    if let Some(ability) = &setup.ability {
        config = config.ability(ability.as_str());
    }
    if let Some(status) = &setup.status {
        config = config.status(Status::from_token(status));
    }
    if let Some(fraction) = setup.hp_fraction {
        config = config.hp_fraction(fraction);
    }
    if let Some(tera) = setup.tera_type {
        config = config.tera_type(tera);
    }
    if setup.hidden {
        config = config.hidden();
    }
    Ok(config)
}
