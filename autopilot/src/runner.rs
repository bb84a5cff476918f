//! Single and multi-seed execution of scenario runs.

use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::scenario::{Scenario, ScenarioConfig, ScenarioMetrics};

pub fn run_scenario(config: ScenarioConfig) -> Result<ScenarioMetrics> {
    let mut scenario =
        Scenario::new(config).map_err(|err| anyhow!("invalid scenario config: {err}"))?;
    Ok(scenario.run())
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchReport {
    pub ticks: u64,
    pub run_count: usize,
    pub total_cargo: u64,
    pub avg_cargo: f64,
    pub max_cargo: u32,
    pub total_beacons: u64,
    pub total_collisions: u64,
    pub avg_idle_ticks: f64,
    pub total_searches: u64,
    pub runs: Vec<ScenarioMetrics>,
}

/// Run the base scenario once per seed, in parallel, and aggregate.
pub fn run_batch(
    base: &ScenarioConfig,
    seeds: &[u32],
    jobs: Option<usize>,
) -> Result<BatchReport> {
    if seeds.is_empty() {
        return Err(anyhow!("batch requires at least one seed"));
    }
    if let Some(jobs) = jobs {
        if jobs == 0 {
            return Err(anyhow!("--jobs must be >= 1 when provided"));
        }
    }

    let run_one = |seed: &u32| -> Result<ScenarioMetrics> {
        let mut config = base.clone();
        config.seed = *seed;
        run_scenario(config).with_context(|| format!("run failed for seed={seed:#x}"))
    };

    let results: Vec<Result<ScenarioMetrics>> = if let Some(jobs) = jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| seeds.par_iter().map(run_one).collect())
    } else {
        seeds.par_iter().map(run_one).collect()
    };

    let mut runs = Vec::with_capacity(results.len());
    for result in results {
        runs.push(result?);
    }

    let run_count = runs.len();
    let total_cargo: u64 = runs.iter().map(|r| u64::from(r.cargo_collected)).sum();
    let max_cargo = runs.iter().map(|r| r.cargo_collected).max().unwrap_or(0);
    let total_beacons: u64 = runs.iter().map(|r| u64::from(r.beacons_collected)).sum();
    let total_collisions: u64 = runs.iter().map(|r| u64::from(r.collisions)).sum();
    let total_idle: u64 = runs.iter().map(|r| u64::from(r.idle_ticks)).sum();
    let total_searches: u64 = runs.iter().map(|r| r.searches_run).sum();

    Ok(BatchReport {
        ticks: base.ticks,
        run_count,
        total_cargo,
        avg_cargo: total_cargo as f64 / run_count as f64,
        max_cargo,
        total_beacons,
        total_collisions,
        avg_idle_ticks: total_idle as f64 / run_count as f64,
        total_searches,
        runs,
    })
}

pub fn write_report(path: &Path, report: &BatchReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }
    let encoded = serde_json::to_vec_pretty(report).context("failed encoding report")?;
    fs::write(path, encoded).with_context(|| format!("failed writing {}", path.display()))
}
