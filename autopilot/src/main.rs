use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use arena_core::config::NavConfig;
use torus_autopilot::runner::{run_batch, run_scenario, write_report};
use torus_autopilot::scenario::ScenarioConfig;

#[derive(Parser, Debug)]
#[command(name = "torus-autopilot")]
#[command(about = "Navigation-core lab: deterministic toroidal-arena scenario runs and benchmarks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct ScenarioArgs {
    #[arg(long, default_value_t = 2_000)]
    ticks: u64,
    #[arg(long, default_value_t = 3)]
    craft: usize,
    #[arg(long, default_value_t = 30)]
    debris: usize,
    #[arg(long, default_value_t = 10)]
    movable: usize,
    #[arg(long, default_value_t = 8)]
    cargo: usize,
    #[arg(long, default_value_t = 4)]
    beacons: usize,
    #[arg(long, default_value_t = 2)]
    rivals: usize,
    /// Steer with the greedy hill climber instead of A*
    #[arg(long)]
    hill_climb: bool,
    #[arg(long, default_value_t = 20.0)]
    grid_size: f64,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single scenario and print its metrics
    Run {
        #[arg(long, default_value = "0xC0FFEE")]
        seed: String,
        #[command(flatten)]
        scenario: ScenarioArgs,
    },
    /// Fan a scenario across many seeds and aggregate the results
    Batch {
        #[arg(long, default_value = "1")]
        seed_start: String,
        #[arg(long, default_value_t = 16)]
        seed_count: u32,
        #[arg(long)]
        jobs: Option<usize>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        scenario: ScenarioArgs,
    },
}

fn parse_seed(seed: &str) -> Result<u32> {
    let s = seed.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).with_context(|| format!("invalid hex seed: {s}"))
    } else {
        s.parse::<u32>()
            .with_context(|| format!("invalid decimal seed: {s}"))
    }
}

fn scenario_config(seed: u32, args: &ScenarioArgs) -> ScenarioConfig {
    ScenarioConfig {
        seed,
        ticks: args.ticks,
        craft_count: args.craft,
        debris_count: args.debris,
        movable_debris: args.movable.min(args.debris),
        cargo_count: args.cargo,
        beacon_count: args.beacons,
        rival_count: args.rivals,
        nav: NavConfig {
            grid_size: args.grid_size,
            use_astar: !args.hill_climb,
            ..NavConfig::default()
        },
    }
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Commands::Run { seed, scenario } => {
            let seed = parse_seed(&seed)?;
            let metrics = run_scenario(scenario_config(seed, &scenario))?;
            println!("seed=0x{seed:08x}");
            println!("ticks={}", metrics.ticks_run);
            println!("cargo_collected={}", metrics.cargo_collected);
            println!("beacons_collected={}", metrics.beacons_collected);
            println!("collisions={}", metrics.collisions);
            println!("idle_ticks={}", metrics.idle_ticks);
            println!("searches_run={}", metrics.searches_run);
        }
        Commands::Batch {
            seed_start,
            seed_count,
            jobs,
            output,
            scenario,
        } => {
            let start = parse_seed(&seed_start)?;
            let seeds: Vec<u32> = (0..seed_count).map(|i| start.wrapping_add(i)).collect();
            let base = scenario_config(start, &scenario);
            let report = run_batch(&base, &seeds, jobs)?;
            println!("runs={}", report.run_count);
            println!("avg_cargo={:.2}", report.avg_cargo);
            println!("max_cargo={}", report.max_cargo);
            println!("total_beacons={}", report.total_beacons);
            println!("total_collisions={}", report.total_collisions);
            println!("avg_idle_ticks={:.2}", report.avg_idle_ticks);
            println!("total_searches={}", report.total_searches);
            if let Some(path) = output {
                write_report(&path, &report)?;
                println!("report={}", path.display());
            }
        }
    }
    Ok(())
}
