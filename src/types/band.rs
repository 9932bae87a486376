//! Power bands, the shared band table, and the per-tick engine state

use serde::{Deserialize, Serialize};

use super::thresholds::band_limits::{
    CAUTION_MAX, CAUTION_MIN, CLIMB_MAX, CLIMB_MIN, CRUISE_MAX, CRUISE_MIN, IDLE_MAX, IDLE_MIN,
    OVERLIMIT_MIN, REDLINE_MAX, REDLINE_MIN,
};
use crate::engine::zones::RpmZone;

/// High level engine power state - how hard the engine is working.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum PowerBand {
    #[default]
    PowerOff = 0,
    Idle = 1,
    Climb = 2,
    Cruise = 3,
    Caution = 4,
    RedLine = 5,
    OverLimit = 6,
}

impl PowerBand {
    /// All bands in ascending RPM order
    pub const ALL: [Self; 7] = [
        Self::PowerOff,
        Self::Idle,
        Self::Climb,
        Self::Cruise,
        Self::Caution,
        Self::RedLine,
        Self::OverLimit,
    ];

    /// Name as rendered in the CSV `band` column
    pub const fn name(self) -> &'static str {
        match self {
            Self::PowerOff => "PowerOff",
            Self::Idle => "Idle",
            Self::Climb => "Climb",
            Self::Cruise => "Cruise",
            Self::Caution => "Caution",
            Self::RedLine => "RedLine",
            Self::OverLimit => "OverLimit",
        }
    }

    /// Position of this band in [`PowerBand::ALL`] and [`BAND_TABLE`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether time in this band counts against the redline budget
    pub const fn is_redline(self) -> bool {
        matches!(self, Self::RedLine | Self::OverLimit)
    }
}

impl std::fmt::Display for PowerBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One inclusive filtered-RPM range of the band partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandRange {
    pub band: PowerBand,
    pub min_rpm: i64,
    pub max_rpm: i64,
}

impl BandRange {
    const fn new(band: PowerBand, min_rpm: i64, max_rpm: i64) -> Self {
        Self { band, min_rpm, max_rpm }
    }

    pub const fn contains(&self, rpm: i64) -> bool {
        rpm >= self.min_rpm && rpm <= self.max_rpm
    }
}

/// Ordered, non-overlapping partition of the non-negative RPM line.
///
/// Shared by the classifier and the RPM generator; index `i` holds the range
/// of `PowerBand::ALL[i]`. The PowerOff row covers both a stopped engine (0)
/// and one spinning below idle (1..=999).
pub static BAND_TABLE: [BandRange; 7] = [
    BandRange::new(PowerBand::PowerOff, 0, IDLE_MIN - 1),
    BandRange::new(PowerBand::Idle, IDLE_MIN, IDLE_MAX),
    BandRange::new(PowerBand::Climb, CLIMB_MIN, CLIMB_MAX),
    BandRange::new(PowerBand::Cruise, CRUISE_MIN, CRUISE_MAX),
    BandRange::new(PowerBand::Caution, CAUTION_MIN, CAUTION_MAX),
    BandRange::new(PowerBand::RedLine, REDLINE_MIN, REDLINE_MAX),
    BandRange::new(PowerBand::OverLimit, OVERLIMIT_MIN, i64::MAX),
];

/// Band containing `filtered_rpm`; negative RPM falls through to PowerOff.
pub fn band_for_rpm(filtered_rpm: i64) -> PowerBand {
    BAND_TABLE
        .iter()
        .find(|range| range.contains(filtered_rpm))
        .map_or(PowerBand::PowerOff, |range| range.band)
}

/// Range row for a band
pub fn range_of(band: PowerBand) -> &'static BandRange {
    &BAND_TABLE[band.index()]
}

/// Engine speed and band as of the latest classification.
///
/// `filtered_rpm` and `band` are only ever produced together by
/// [`EngineState::from_rpm`], so they cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngineState {
    raw_rpm: f64,
    filtered_rpm: i64,
    band: PowerBand,
}

impl EngineState {
    /// Build a state from an unrounded RPM value.
    ///
    /// Non-finite input keeps `raw_rpm` but filters to 0 (PowerOff).
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_rpm(raw_rpm: f64) -> Self {
        // f64::round is half-away-from-zero; the cast saturates far outside i64
        let filtered_rpm = if raw_rpm.is_finite() {
            raw_rpm.round() as i64
        } else {
            0
        };
        Self {
            raw_rpm,
            filtered_rpm,
            band: band_for_rpm(filtered_rpm),
        }
    }

    pub const fn raw_rpm(&self) -> f64 {
        self.raw_rpm
    }

    pub const fn filtered_rpm(&self) -> i64 {
        self.filtered_rpm
    }

    pub const fn band(&self) -> PowerBand {
        self.band
    }

    pub fn is_power_off(&self) -> bool {
        self.band == PowerBand::PowerOff
    }

    /// Pilot-facing safety zone for the filtered RPM
    pub fn zone(&self) -> RpmZone {
        RpmZone::from_rpm(self.filtered_rpm)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            raw_rpm: 0.0,
            filtered_rpm: 0,
            band: PowerBand::PowerOff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_line_up_with_band_order() {
        for (i, band) in PowerBand::ALL.iter().enumerate() {
            assert_eq!(BAND_TABLE[i].band, *band);
            assert_eq!(band.index(), i);
        }
    }

    #[test]
    fn table_is_contiguous_partition() {
        assert_eq!(BAND_TABLE[0].min_rpm, 0);
        for pair in BAND_TABLE.windows(2) {
            assert!(pair[0].min_rpm <= pair[0].max_rpm);
            assert_eq!(pair[0].max_rpm + 1, pair[1].min_rpm, "gap or overlap after {:?}", pair[0].band);
        }
        assert_eq!(BAND_TABLE[6].max_rpm, i64::MAX);
    }

    #[test]
    fn negative_rpm_is_power_off() {
        assert_eq!(band_for_rpm(-1), PowerBand::PowerOff);
        assert_eq!(band_for_rpm(i64::MIN), PowerBand::PowerOff);
    }

    #[test]
    fn from_rpm_rounds_half_away_from_zero() {
        assert_eq!(EngineState::from_rpm(999.5).filtered_rpm(), 1000);
        assert_eq!(EngineState::from_rpm(999.5).band(), PowerBand::Idle);
        assert_eq!(EngineState::from_rpm(999.49).band(), PowerBand::PowerOff);
        assert_eq!(EngineState::from_rpm(-0.5).filtered_rpm(), -1);
    }

    #[test]
    fn non_finite_rpm_filters_to_zero() {
        for raw in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let state = EngineState::from_rpm(raw);
            assert_eq!(state.filtered_rpm(), 0);
            assert!(state.is_power_off());
        }
        assert!(EngineState::from_rpm(f64::NAN).raw_rpm().is_nan());
    }

    #[test]
    fn band_names_match_csv_rendering() {
        let names: Vec<String> = PowerBand::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            ["PowerOff", "Idle", "Climb", "Cruise", "Caution", "RedLine", "OverLimit"]
        );
    }
}
