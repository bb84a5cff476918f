use torus_autopilot::runner::{run_batch, run_scenario, write_report, BatchReport};
use torus_autopilot::scenario::ScenarioConfig;

fn quick_config() -> ScenarioConfig {
    ScenarioConfig {
        ticks: 300,
        ..ScenarioConfig::default()
    }
}

#[test]
fn single_run_is_deterministic() {
    let a = run_scenario(quick_config()).expect("run");
    let b = run_scenario(quick_config()).expect("run");
    assert_eq!(a.cargo_collected, b.cargo_collected);
    assert_eq!(a.beacons_collected, b.beacons_collected);
    assert_eq!(a.collisions, b.collisions);
    assert_eq!(a.idle_ticks, b.idle_ticks);
    assert_eq!(a.searches_run, b.searches_run);
}

#[test]
fn batch_aggregates_every_seed() {
    let seeds = [1u32, 2, 3, 4];
    let report = run_batch(&quick_config(), &seeds, Some(2)).expect("batch");
    assert_eq!(report.run_count, 4);
    assert_eq!(report.runs.len(), 4);
    let sum: u64 = report
        .runs
        .iter()
        .map(|r| u64::from(r.cargo_collected))
        .sum();
    assert_eq!(report.total_cargo, sum);
    for (seed, run) in seeds.iter().zip(&report.runs) {
        assert_eq!(run.seed, *seed);
        assert_eq!(run.ticks_run, 300);
    }
}

#[test]
fn empty_seed_list_is_rejected() {
    assert!(run_batch(&quick_config(), &[], None).is_err());
}

#[test]
fn report_round_trips_through_json() {
    let report = run_batch(&quick_config(), &[7, 8], None).expect("batch");
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("reports/batch.json");
    write_report(&path, &report).expect("write");

    let raw = std::fs::read(&path).expect("read back");
    let decoded: BatchReport = serde_json::from_slice(&raw).expect("decode");
    assert_eq!(decoded.run_count, report.run_count);
    assert_eq!(decoded.total_cargo, report.total_cargo);
    assert_eq!(decoded.runs.len(), report.runs.len());
}
