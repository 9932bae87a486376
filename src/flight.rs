//! Flight time accounting
//!
//! [`FlightTimeAccumulator`] owns the run's [`FlightCounters`] and adds each
//! tick's rounded duration to the counters its band qualifies for:
//!
//! | Band                 | total | caution | redline |
//! |----------------------|-------|---------|---------|
//! | PowerOff             |       |         |         |
//! | Idle / Climb / Cruise| ✓     |         |         |
//! | Caution              | ✓     | ✓       |         |
//! | RedLine / OverLimit  | ✓     |         | ✓       |
//!
//! Counters only ever grow.

use serde::Serialize;

use crate::types::{EngineState, PowerBand};

const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Cumulative simulated seconds, segmented by band category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FlightCounters {
    /// Time the engine was not PowerOff
    pub total_seconds: u64,
    /// Time in Caution
    pub caution_seconds: u64,
    /// Time in RedLine or OverLimit
    pub redline_seconds: u64,
}

impl FlightCounters {
    pub const fn hours(&self) -> u64 {
        self.total_seconds / SECONDS_PER_HOUR
    }

    pub const fn minutes(&self) -> u64 {
        (self.total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE
    }

    pub const fn seconds(&self) -> u64 {
        self.total_seconds % SECONDS_PER_MINUTE
    }
}

impl std::fmt::Display for FlightCounters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}

/// Round a tick duration to whole seconds.
///
/// Negative durations are not meaningful; they saturate to zero so the
/// counters stay monotonic.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_seconds(delta_seconds: f64) -> u64 {
    delta_seconds.round() as u64
}

/// Mutates one [`FlightCounters`] per tick.
#[derive(Debug, Default)]
pub struct FlightTimeAccumulator {
    counters: FlightCounters,
}

impl FlightTimeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta_seconds` (rounded) to every counter `state`'s band qualifies for.
    pub fn accumulate(&mut self, state: &EngineState, delta_seconds: f64) {
        let delta = whole_seconds(delta_seconds);
        let band = state.band();

        if band != PowerBand::PowerOff {
            self.counters.total_seconds = self.counters.total_seconds.saturating_add(delta);
        }
        if band == PowerBand::Caution {
            self.counters.caution_seconds = self.counters.caution_seconds.saturating_add(delta);
        }
        if band.is_redline() {
            self.counters.redline_seconds = self.counters.redline_seconds.saturating_add(delta);
        }
    }

    pub const fn counters(&self) -> &FlightCounters {
        &self.counters
    }

    pub const fn into_counters(self) -> FlightCounters {
        self.counters
    }
}

/// One line of the flight log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightRow {
    /// Elapsed simulated seconds at the start of the tick
    pub time_step: f64,
    pub total_seconds: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub rpm: i64,
    pub band: PowerBand,
    pub caution_seconds: u64,
    pub redline_seconds: u64,
}

impl FlightRow {
    /// Snapshot of the counters after a tick was accumulated
    pub const fn new(time_step: f64, counters: &FlightCounters, state: &EngineState) -> Self {
        Self {
            time_step,
            total_seconds: counters.total_seconds,
            hours: counters.hours(),
            minutes: counters.minutes(),
            seconds: counters.seconds(),
            rpm: state.filtered_rpm(),
            band: state.band(),
            caution_seconds: counters.caution_seconds,
            redline_seconds: counters.redline_seconds,
        }
    }
}
