//! Power band classifier
//!
//! Converts an angular speed reading (rad/s) to RPM, rounds it to the nearest
//! whole RPM and looks the result up in the shared [`crate::types::BAND_TABLE`]. Every
//! classification yields a [`BandNotice`] describing the band entered; the
//! notice text is delivered to a [`NotificationSink`], never returned inside
//! the engine state.

pub mod zones;

use crate::sink::NotificationSink;
use crate::types::thresholds::conversion::{RADIANS_PER_REVOLUTION, SECONDS_PER_MINUTE};
use crate::types::{EngineState, PowerBand};

/// rad/s -> RPM
pub fn rpm_from_angular_speed(angular_speed_rad_per_sec: f64) -> f64 {
    angular_speed_rad_per_sec * SECONDS_PER_MINUTE / RADIANS_PER_REVOLUTION
}

/// RPM -> rad/s
pub fn angular_speed_from_rpm(rpm: f64) -> f64 {
    rpm * RADIANS_PER_REVOLUTION / SECONDS_PER_MINUTE
}

/// What a single classification found, in human readable terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandNotice {
    /// Filtered RPM is exactly zero
    Stopped,
    /// Spinning, but below the Idle band (still PowerOff)
    BelowIdle,
    /// Filtered RPM is negative
    Negative,
    /// The reading was NaN or infinite
    InvalidReading,
    /// Entered one of the running bands
    Entered(PowerBand),
}

impl BandNotice {
    fn for_state(state: &EngineState) -> Self {
        let rpm = state.filtered_rpm();
        if !state.raw_rpm().is_finite() {
            Self::InvalidReading
        } else if rpm == 0 {
            Self::Stopped
        } else if rpm < 0 {
            Self::Negative
        } else if state.band() == PowerBand::PowerOff {
            Self::BelowIdle
        } else {
            Self::Entered(state.band())
        }
    }
}

impl std::fmt::Display for BandNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stopped => write!(f, "PowerOff: Engine is not turning."),
            Self::BelowIdle => write!(f, "RPM Below Idle: Engine not in normal operating band."),
            Self::Negative => write!(f, "RPM Negative: Reading treated as power off."),
            Self::InvalidReading => write!(f, "Invalid reading: Non-finite angular speed treated as power off."),
            Self::Entered(PowerBand::Idle) => write!(f, "Idle: Value is within range."),
            Self::Entered(PowerBand::Climb) => write!(f, "Climb: Value is within range."),
            Self::Entered(PowerBand::Cruise) => write!(f, "Cruise: Value is within range."),
            Self::Entered(PowerBand::Caution) => write!(f, "Caution: Engine is reaching Redline."),
            Self::Entered(PowerBand::RedLine) => write!(f, "Warning: Engine may overheat."),
            Self::Entered(PowerBand::OverLimit) => {
                write!(f, "WARNING: RPM ABOVE Defined RedLine (OverLimit).")
            }
            Self::Entered(PowerBand::PowerOff) => write!(f, "PowerOff: Engine is not turning."),
        }
    }
}

/// Pure classification of one angular speed reading.
///
/// Total over every `f64`; see [`EngineState::from_rpm`] for the handling of
/// non-finite input.
pub fn classify(angular_speed_rad_per_sec: f64) -> (EngineState, BandNotice) {
    let state = EngineState::from_rpm(rpm_from_angular_speed(angular_speed_rad_per_sec));
    let notice = BandNotice::for_state(&state);
    (state, notice)
}

/// Owns the current [`EngineState`] and replaces it on every reading.
#[derive(Debug, Default)]
pub struct PowerBandClassifier {
    state: EngineState,
    classifications: u64,
}

impl PowerBandClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a reading, emit the band notice, and return the new state.
    pub fn update(
        &mut self,
        angular_speed_rad_per_sec: f64,
        notices: &mut dyn NotificationSink,
    ) -> EngineState {
        let (state, notice) = classify(angular_speed_rad_per_sec);
        notices.notify(&notice.to_string());
        self.state = state;
        self.classifications += 1;
        state
    }

    /// State as of the latest [`update`](Self::update)
    pub const fn state(&self) -> &EngineState {
        &self.state
    }

    pub const fn classifications(&self) -> u64 {
        self.classifications
    }
}
