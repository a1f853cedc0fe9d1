//! Scenario runner for the belief model.
//!
//! Replays scripted battles (reveals plus damage queries) and prints a JSON
//! report, or prints the belief for one species after a list of reveals.
//!
//! Usage:
//!   cargo run -p scenario_runner -- replay --catalogue data/gen9_sample_sets.json --scenario data/scenarios/ferrothorn.json
//!   cargo run -p scenario_runner -- inspect --catalogue data/gen9_sample_sets.json --species Garchomp --move "Fire Fang"

mod cmd;
mod models;
mod utils;

use clap::{Parser, Subcommand};
use cmd::{inspect, replay};

#[derive(Parser)]
#[command(name = "scenario_runner")]
struct Cli {
    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario file and report beliefs and estimates per step
    Replay(replay::ReplayArgs),

    /// Show the belief for one species after some reveals
    Inspect(inspect::InspectArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    utils::init_logging(cli.log_json);

    match cli.command {
        Some(Commands::Replay(args)) => replay::execute(args),
        Some(Commands::Inspect(args)) => inspect::execute(args),
        None => {
            // Require explicit subcommand to avoid flag ambiguity at the root.
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
