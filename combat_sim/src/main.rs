//! combat_sim - run a lane battle and print the outcome

use clap::Parser;
use combat_core::config::load_unit_roster;
use combat_core::RandomIds;
use combat_sim::{logging, Battle, Scenario};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "combat_sim")]
#[command(about = "Headless lane battle simulator", long_about = None)]
#[command(version)]
pub struct Args {
    /// Battle scenario TOML; the built-in scenario is used when omitted
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Extra unit templates merged over the built-in roster
    #[arg(long, value_name = "UNITS_FILE")]
    pub units: Option<PathBuf>,

    /// Time limit in milliseconds (overrides the scenario)
    #[arg(long)]
    pub max_ms: Option<f64>,

    /// Seed for random effect ids; sequential ids when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

fn main() -> ExitCode {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(logging::env_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "battle failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let scenario = match &args.config {
        Some(path) => Scenario::load(path)?,
        None => Scenario::builtin()?,
    };

    let mut roster = scenario.roster()?;
    if let Some(path) = &args.units {
        roster.merge(load_unit_roster(path)?);
    }

    let mut battle = Battle::from_scenario(&scenario, &roster)?;
    if let Some(seed) = args.seed {
        battle = battle.with_id_generator(Box::new(RandomIds::seeded(seed)));
    }

    let report = battle.run(args.max_ms.unwrap_or(scenario.max_ms));
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{report}");
    }
    Ok(())
}
