//! Simulation driver
//!
//! Runs the fixed-length tick loop in three phases:
//!
//! - **Init**: build the classifier, accumulator and zone tracker around an
//!   injected [`AngularSpeedSource`]; the caller acquires the row sink.
//! - **Running**: for each tick, sample -> classify -> accumulate -> emit row.
//!   Ticks are independent apart from the accumulated counters.
//! - **Finalize**: flush the row sink, evaluate the diagnostic from the final
//!   counters, emit the verdict and summary lines.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, trace};

use crate::config::{ConfigError, SimulationConfig};
use crate::diagnostics;
use crate::engine::zones::ZoneTracker;
use crate::engine::PowerBandClassifier;
use crate::flight::{FlightCounters, FlightRow, FlightTimeAccumulator};
use crate::generator::AngularSpeedSource;
use crate::sink::{CsvRowSink, NotificationSink, NullNotifier, RowSink, SinkError};
use crate::types::{Diagnostic, PowerBand};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid simulation config: {0}")]
    Config(#[from] ConfigError),

    #[error("Flight log unavailable, no ticks run: {0}")]
    SinkUnavailable(#[source] SinkError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

// ============================================================================
// Run Report
// ============================================================================

/// Ticks spent in each band
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BandTally([u64; 7]);

impl BandTally {
    pub fn record(&mut self, band: PowerBand) {
        self.0[band.index()] += 1;
    }

    pub const fn count(&self, band: PowerBand) -> u64 {
        self.0[band.index()]
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub ticks: u32,
    pub counters: FlightCounters,
    pub diagnostic: Diagnostic,
    pub band_ticks: BandTally,
    pub zone_transitions: u64,
    pub source: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

// ============================================================================
// Driver
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Init,
    Running,
    Finalize,
}

impl Phase {
    const fn name(self) -> &'static str {
        match self {
            Phase::Init => "init",
            Phase::Running => "running",
            Phase::Finalize => "finalize",
        }
    }
}

/// Owns every piece of per-run state for exactly one run.
pub struct SimulationDriver<S: AngularSpeedSource> {
    config: SimulationConfig,
    source: S,
    classifier: PowerBandClassifier,
    accumulator: FlightTimeAccumulator,
    zones: ZoneTracker,
    tally: BandTally,
    tick_notices: bool,
    phase: Phase,
}

impl<S: AngularSpeedSource> SimulationDriver<S> {
    pub fn new(config: SimulationConfig, source: S) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            classifier: PowerBandClassifier::new(),
            accumulator: FlightTimeAccumulator::new(),
            zones: ZoneTracker::new(),
            tally: BandTally::default(),
            tick_notices: true,
            phase: Phase::Init,
        })
    }

    /// Whether band-entry and zone lines are emitted every tick (default on).
    /// The verdict and summary lines are always emitted.
    #[must_use]
    pub fn with_tick_notices(mut self, enabled: bool) -> Self {
        self.tick_notices = enabled;
        self
    }

    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn enter(&mut self, phase: Phase) {
        debug!(from = self.phase.name(), to = phase.name(), "Simulation phase change");
        self.phase = phase;
    }

    /// Run every configured tick, then finalize.
    pub fn run(
        mut self,
        rows: &mut dyn RowSink,
        notices: &mut dyn NotificationSink,
    ) -> Result<RunReport, SimulationError> {
        let started_at = Utc::now();
        self.enter(Phase::Running);
        info!(
            ticks = self.config.ticks,
            tick_seconds = self.config.tick_seconds,
            source = self.source.source_name(),
            "Simulation start"
        );

        {
            let mut muted = NullNotifier;
            let tick_sink: &mut dyn NotificationSink = if self.tick_notices {
                &mut *notices
            } else {
                &mut muted
            };

            for tick in 0..self.config.ticks {
                let omega = self.source.sample();
                let state = self.classifier.update(omega, tick_sink);
                self.accumulator.accumulate(&state, self.config.tick_seconds);
                self.tally.record(state.band());

                if let Some(zone) = self.zones.observe(state.zone()) {
                    tick_sink.notify(zone.advisory());
                }

                let time_step = f64::from(tick) * self.config.tick_seconds;
                rows.write_row(&FlightRow::new(time_step, self.accumulator.counters(), &state))?;
                trace!(tick, rpm = state.filtered_rpm(), omega, band = %state.band(), "Tick");
            }
        }

        self.enter(Phase::Finalize);
        rows.finish()?;

        let counters = *self.accumulator.counters();
        let diagnostic = diagnostics::evaluate(&counters);

        notices.notify(&diagnostic.to_string());
        notices.notify(&format!(
            "Caution time (sec): {}, Redline/OverLimit time (sec): {}",
            counters.caution_seconds, counters.redline_seconds
        ));
        notices.notify(&format!(
            "Simulation Finished. Check {}",
            self.config.output.display()
        ));

        info!(
            engine_time = %counters,
            caution_seconds = counters.caution_seconds,
            redline_seconds = counters.redline_seconds,
            code = diagnostic.code(),
            "Simulation complete"
        );

        Ok(RunReport {
            ticks: self.config.ticks,
            counters,
            diagnostic,
            band_ticks: self.tally,
            zone_transitions: self.zones.transitions(),
            source: self.source.source_name().to_string(),
            started_at,
            finished_at: Utc::now(),
        })
    }
}

/// Open the CSV log at `config.output` and run a full simulation into it.
///
/// If the file cannot be created nothing is simulated and
/// [`SimulationError::SinkUnavailable`] is returned.
pub fn run_to_path<S: AngularSpeedSource>(
    config: SimulationConfig,
    source: S,
    notices: &mut dyn NotificationSink,
    tick_notices: bool,
) -> Result<RunReport, SimulationError> {
    let driver = SimulationDriver::new(config, source)?.with_tick_notices(tick_notices);

    let mut sink = CsvRowSink::create(&driver.config().output).map_err(|e| {
        error!(error = %e, "Cannot open flight log");
        SimulationError::SinkUnavailable(e)
    })?;

    // The file handle is released when `sink` drops, on success or error.
    driver.run(&mut sink, notices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{RpmGenerator, SequenceSource};
    use crate::sink::{RecordingNotifier, RecordingRowSink};
    use crate::types::DiagnosticStatus;

    fn config(ticks: u32) -> SimulationConfig {
        SimulationConfig {
            ticks,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn one_row_per_tick_with_elapsed_time_step() {
        let driver = SimulationDriver::new(config(5), SequenceSource::constant(2000.0)).expect("driver");
        let mut rows = RecordingRowSink::new();
        let mut notices = RecordingNotifier::new();
        let report = driver.run(&mut rows, &mut notices).expect("run");

        assert_eq!(rows.rows.len(), 5);
        assert!(rows.finished);
        let steps: Vec<f64> = rows.rows.iter().map(|r| r.time_step).collect();
        assert_eq!(steps, [0.0, 60.0, 120.0, 180.0, 240.0]);
        assert_eq!(rows.rows[4].total_seconds, 300);
        assert_eq!(report.counters.total_seconds, 300);
        assert_eq!(report.band_ticks.count(PowerBand::Idle), 5);
    }

    #[test]
    fn ticks_do_not_smooth_between_readings() {
        let source = SequenceSource::from_rpms([0.0, 9900.0, 500.0, 9500.0]);
        let driver = SimulationDriver::new(config(4), source).expect("driver");
        let mut rows = RecordingRowSink::new();
        let report = driver
            .run(&mut rows, &mut RecordingNotifier::new())
            .expect("run");

        let bands: Vec<PowerBand> = rows.rows.iter().map(|r| r.band).collect();
        assert_eq!(
            bands,
            [PowerBand::PowerOff, PowerBand::RedLine, PowerBand::PowerOff, PowerBand::Caution]
        );
        assert_eq!(report.counters.total_seconds, 120);
        assert_eq!(report.counters.redline_seconds, 60);
        assert_eq!(report.counters.caution_seconds, 60);
    }

    #[test]
    fn finalize_emits_verdict_summary_and_completion() {
        let driver = SimulationDriver::new(config(3), SequenceSource::constant(7000.0)).expect("driver");
        let mut notices = RecordingNotifier::new();
        driver.run(&mut RecordingRowSink::new(), &mut notices).expect("run");

        let tail = &notices.lines[notices.lines.len() - 3..];
        assert_eq!(tail[0], format!("{} (code 0)", diagnostics::SUCCESS_MESSAGE));
        assert_eq!(tail[1], "Caution time (sec): 0, Redline/OverLimit time (sec): 0");
        assert_eq!(tail[2], "Simulation Finished. Check flight_log.csv");
        assert_eq!(notices.count_containing("Cruise: Value is within range."), 3);
    }

    #[test]
    fn zone_advisory_only_on_change() {
        let source = SequenceSource::from_rpms([2000.0, 5000.0, 9500.0, 9600.0, 2000.0]);
        let driver = SimulationDriver::new(config(5), source).expect("driver");
        let mut notices = RecordingNotifier::new();
        let report = driver.run(&mut RecordingRowSink::new(), &mut notices).expect("run");

        assert_eq!(notices.count_containing("RPM Within Normal Range"), 2);
        assert_eq!(notices.count_containing("Caution: High RPM"), 1);
        assert_eq!(report.zone_transitions, 2);
    }

    #[test]
    fn quiet_run_keeps_only_final_lines() {
        let driver = SimulationDriver::new(config(50), SequenceSource::constant(9000.0))
            .expect("driver")
            .with_tick_notices(false);
        let mut notices = RecordingNotifier::new();
        driver.run(&mut RecordingRowSink::new(), &mut notices).expect("run");
        assert_eq!(notices.lines.len(), 3);
    }

    #[test]
    fn sustained_redline_fails_the_engine() {
        // 300 minutes in RedLine = 5 hours > 4 hour limit
        let driver = SimulationDriver::new(config(300), SequenceSource::constant(10_000.0)).expect("driver");
        let report = driver
            .run(&mut RecordingRowSink::new(), &mut RecordingNotifier::new())
            .expect("run");
        assert_eq!(report.counters.redline_seconds, 18_000);
        assert_eq!(report.diagnostic.status(), DiagnosticStatus::SystemFailure);
    }

    #[test]
    fn full_default_run_stays_within_duration() {
        let driver = SimulationDriver::new(SimulationConfig::default(), RpmGenerator::seeded(11))
            .expect("driver");
        let mut rows = RecordingRowSink::new();
        let report = driver.run(&mut rows, &mut RecordingNotifier::new()).expect("run");

        assert_eq!(rows.rows.len(), 3000);
        assert_eq!(report.band_ticks.total(), 3000);
        assert!(report.counters.total_seconds <= 180_000);
        assert_eq!(
            report.counters.total_seconds,
            (3000 - report.band_ticks.count(PowerBand::PowerOff)) * 60
        );
    }

    #[test]
    fn invalid_config_is_rejected_before_running() {
        let result = SimulationDriver::new(config(0), SequenceSource::default());
        assert!(matches!(result, Err(SimulationError::Config(ConfigError::Validation(_)))));
    }
}
