//! Pilot-facing RPM safety zones
//!
//! A coarser view than [`PowerBand`]: Idle through Cruise collapse into
//! `Normal`, RedLine and OverLimit collapse into `RedLine`. Derived from the
//! band table so the two views never disagree on a boundary.

use serde::Serialize;

use crate::types::{band_for_rpm, PowerBand};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RpmZone {
    BelowIdle = 0,
    Normal = 1,
    Caution = 2,
    RedLine = 3,
}

impl RpmZone {
    pub fn from_rpm(filtered_rpm: i64) -> Self {
        Self::from(band_for_rpm(filtered_rpm))
    }

    /// Safety message shown to the pilot
    pub const fn advisory(self) -> &'static str {
        match self {
            Self::BelowIdle => "RPM Below Idle",
            Self::Normal => "RPM Within Normal Range",
            Self::Caution => "Caution: High RPM",
            Self::RedLine => "Redline: Potential Engine Damage",
        }
    }
}

impl From<PowerBand> for RpmZone {
    fn from(band: PowerBand) -> Self {
        match band {
            PowerBand::PowerOff => Self::BelowIdle,
            PowerBand::Idle | PowerBand::Climb | PowerBand::Cruise => Self::Normal,
            PowerBand::Caution => Self::Caution,
            PowerBand::RedLine | PowerBand::OverLimit => Self::RedLine,
        }
    }
}

impl std::fmt::Display for RpmZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.advisory())
    }
}

/// Remembers the last zone seen and reports only changes.
#[derive(Debug, Default)]
pub struct ZoneTracker {
    current: Option<RpmZone>,
    transitions: u64,
}

impl ZoneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `zone`; returns it if it differs from the previous one (or is the first).
    pub fn observe(&mut self, zone: RpmZone) -> Option<RpmZone> {
        if self.current == Some(zone) {
            return None;
        }
        if self.current.is_some() {
            self.transitions += 1;
        }
        self.current = Some(zone);
        Some(zone)
    }

    pub const fn current(&self) -> Option<RpmZone> {
        self.current
    }

    /// Zone changes seen, not counting the first observation
    pub const fn transitions(&self) -> u64 {
        self.transitions
    }
}
