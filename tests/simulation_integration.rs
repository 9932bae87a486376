//! End-to-End Simulation Tests
//!
//! Runs the full pipeline into a real CSV file in a temp directory:
//! RpmGenerator -> classifier -> accumulator -> CsvRowSink -> diagnostic.

use std::fs;

use tachometer_sim::sink::{RecordingNotifier, CSV_HEADER};
use tachometer_sim::{
    run_to_path, DiagnosticStatus, PowerBand, RpmGenerator, RpmZone, SequenceSource, SimulationConfig,
    SimulationError,
};
use tempfile::TempDir;

fn config_in(dir: &TempDir, ticks: u32) -> SimulationConfig {
    SimulationConfig {
        ticks,
        output: dir.path().join("flight_log.csv"),
        seed: Some(2025),
        ..SimulationConfig::default()
    }
}

fn band_from_name(name: &str) -> Option<PowerBand> {
    PowerBand::ALL.into_iter().find(|band| band.name() == name)
}

#[test]
fn default_length_run_writes_header_plus_3000_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_in(&dir, 3000);
    let path = config.output.clone();
    let mut notices = RecordingNotifier::new();

    let report = run_to_path(config, RpmGenerator::seeded(2025), &mut notices, true)
        .expect("simulation should complete");

    let text = fs::read_to_string(&path).expect("read flight log");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3001, "header + one row per tick");
    assert_eq!(lines[0], CSV_HEADER);

    let mut previous_total = 0u64;
    for (tick, line) in lines[1..].iter().enumerate() {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 9, "line {line}");

        let time_step: f64 = fields[0].parse().expect("time_step");
        assert!((time_step - tick as f64 * 60.0).abs() < f64::EPSILON);

        let total: u64 = fields[1].parse().expect("total_seconds");
        assert!(total >= previous_total, "total_seconds went backwards at tick {tick}");
        assert!(total <= 180_000);
        previous_total = total;

        let rpm: i64 = fields[5].parse().expect("rpm");
        let band = band_from_name(fields[6]).expect("known band name");
        assert_eq!(tachometer_sim::types::band_for_rpm(rpm), band, "line {line}");
    }

    assert_eq!(previous_total, report.counters.total_seconds);
    assert_eq!(report.ticks, 3000);

    // one band notice per tick, zone advisories on change, then three closing lines
    let zone_lines = notices
        .lines
        .iter()
        .filter(|line| {
            [RpmZone::BelowIdle, RpmZone::Normal, RpmZone::Caution, RpmZone::RedLine]
                .iter()
                .any(|zone| line.as_str() == zone.advisory())
        })
        .count();
    assert_eq!(notices.lines.len() - zone_lines - 3, 3000);
    assert_eq!(zone_lines as u64, report.zone_transitions + 1);
    assert_eq!(
        notices.lines.last().map(String::as_str),
        Some(format!("Simulation Finished. Check {}", path.display()).as_str())
    );
}

#[test]
fn same_seed_produces_identical_logs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut first = config_in(&dir, 500);
    first.output = dir.path().join("a.csv");
    let mut second = config_in(&dir, 500);
    second.output = dir.path().join("b.csv");

    let mut notices = RecordingNotifier::new();
    run_to_path(first.clone(), RpmGenerator::seeded(9), &mut notices, false).expect("first run");
    run_to_path(second.clone(), RpmGenerator::seeded(9), &mut notices, false).expect("second run");

    let a = fs::read_to_string(&first.output).expect("read a");
    let b = fs::read_to_string(&second.output).expect("read b");
    assert_eq!(a, b);
}

#[test]
fn scripted_caution_heavy_flight_requires_maintenance() {
    let dir = tempfile::tempdir().expect("tempdir");
    // 200 minutes of Caution (> 3 h), no redline
    let config = config_in(&dir, 200);
    let mut notices = RecordingNotifier::new();

    let report = run_to_path(config, SequenceSource::constant(9400.0), &mut notices, false)
        .expect("simulation should complete");

    assert_eq!(report.counters.caution_seconds, 12_000);
    assert_eq!(report.counters.redline_seconds, 0);
    assert_eq!(report.diagnostic.status(), DiagnosticStatus::MaintenanceRequired);
    assert_eq!(report.diagnostic.code(), 1);
    assert!(notices.lines[0].contains("MAINTENANCE REQUIRED"));
    assert_eq!(
        notices.lines[1],
        "Caution time (sec): 12000, Redline/OverLimit time (sec): 0"
    );
}

#[test]
fn unopenable_log_aborts_before_any_tick() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = config_in(&dir, 10);
    config.output = dir.path().join("missing").join("flight_log.csv");
    let mut notices = RecordingNotifier::new();

    let result = run_to_path(config.clone(), SequenceSource::constant(5000.0), &mut notices, true);

    assert!(matches!(result, Err(SimulationError::SinkUnavailable(_))));
    assert!(notices.lines.is_empty(), "no notices should be emitted");
    assert!(!config.output.exists());
}
