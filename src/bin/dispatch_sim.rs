use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dronedispatch::*;
use rand::{SeedableRng, rngs::StdRng};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortKey {
	Priority,
	Weight,
	Distance,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Allocate delivery orders to a drone fleet and fly the trips", long_about = None)]
struct Args {
	/// JSON simulation config (seed, rounds, generator spans)
	#[arg(long)]
	config: Option<PathBuf>,

	/// JSON scenario with fixed drones and orders; skips random generation
	#[arg(long)]
	scenario: Option<PathBuf>,

	/// Overrides the config seed
	#[arg(long)]
	seed: Option<u64>,

	/// Overrides the config round limit
	#[arg(long)]
	rounds: Option<usize>,

	/// Order report sort key
	#[arg(long, value_enum, default_value_t = SortKey::Priority)]
	sort: SortKey,
}

fn build_engine(args: &Args, config: &SimulationConfig) -> Result<Engine> {
	if let Some(path) = &args.scenario {
		let scenario = Scenario::from_file(path).with_context(|| format!("loading scenario {}", path.display()))?;
		return Ok(scenario.build_engine()?);
	}
	let mut rng = StdRng::seed_from_u64(config.seed);
	let fleet = generate_fleet(&mut rng, &config.generator)?;
	let mut engine = Engine::new();
	for d in fleet {
		engine.add_drone(d)?;
	}
	if let Some(base) = engine.reference_origin() {
		for o in generate_orders(&mut rng, &config.generator, base)? {
			engine.add_order(o)?;
		}
	}
	tracing::info!(
		seed = config.seed,
		drones = engine.drones().len(),
		orders = engine.orders().len(),
		"generated fleet and orders"
	);
	Ok(engine)
}

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let args = Args::parse();
	let mut config = match &args.config {
		Some(path) => SimulationConfig::from_file(path).with_context(|| format!("loading config {}", path.display()))?,
		None => SimulationConfig::default(),
	};
	if let Some(seed) = args.seed {
		config.seed = seed;
	}
	if let Some(rounds) = args.rounds {
		config.max_rounds = rounds;
	}

	let mut engine = build_engine(&args, &config)?;
	let rounds = engine.run_until_idle(config.max_rounds)?;
	tracing::info!(rounds, pending = engine.pending_count(), "simulation finished");

	let sort = match args.sort {
		SortKey::Priority => OrderSort::Priority,
		SortKey::Weight => OrderSort::Weight,
		SortKey::Distance => match engine.reference_origin() {
			Some(base) => OrderSort::Distance(base),
			None => OrderSort::Priority,
		},
	};
	let lines = format_drone_report(engine.drones())
		.into_iter()
		.chain(format_order_report(sorted_orders(engine.orders(), sort)))
		.chain(format_summary(&FleetSummary::from_drones(engine.drones())));
	for line in lines {
		println!("{line}");
	}
	Ok(())
}
