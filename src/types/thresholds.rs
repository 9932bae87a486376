//! Fixed design constants: RPM conversion, band limits, flight profile and diagnostic policy

/// Angular speed <-> RPM conversion
pub mod conversion {
    /// Seconds per minute
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
    /// Radians per revolution (2π)
    pub const RADIANS_PER_REVOLUTION: f64 = 2.0 * std::f64::consts::PI;
}

/// Inclusive filtered-RPM limits of each power band
pub mod band_limits {
    /// Lowest RPM of the Idle band; anything in 1..IDLE_MIN is "spinning below idle"
    pub const IDLE_MIN: i64 = 1000;
    pub const IDLE_MAX: i64 = 3500;

    pub const CLIMB_MIN: i64 = 3501;
    pub const CLIMB_MAX: i64 = 6000;

    pub const CRUISE_MIN: i64 = 6001;
    pub const CRUISE_MAX: i64 = 9000;

    pub const CAUTION_MIN: i64 = 9001;
    pub const CAUTION_MAX: i64 = 9799;

    pub const REDLINE_MIN: i64 = 9800;
    pub const REDLINE_MAX: i64 = 10200;

    /// Everything above REDLINE_MAX is OverLimit
    pub const OVERLIMIT_MIN: i64 = REDLINE_MAX + 1;
}

/// Weights of the synthetic flight profile (fraction of ticks per band)
pub mod profile_weights {
    /// Spinning below idle (sampled as PowerOff)
    pub const POWER_OFF: f64 = 0.05;
    pub const IDLE: f64 = 0.15;
    pub const CLIMB: f64 = 0.25;
    /// Cruise dominates a normal flight (35%)
    pub const CRUISE: f64 = 0.35;
    pub const CAUTION: f64 = 0.12;
    pub const RED_LINE: f64 = 0.06;
    pub const OVER_LIMIT: f64 = 0.02;

    /// Upper RPM sampled for the PowerOff slot
    pub const BELOW_IDLE_SAMPLE_CEILING_RPM: f64 = 900.0;
    /// Upper RPM sampled for the OverLimit slot (the band itself is open-ended)
    pub const OVERLIMIT_SAMPLE_CEILING_RPM: f64 = 11000.0;
}

/// End-of-run maintenance policy, tuned for a ~50 hour run
pub mod diagnostic_limits {
    pub const ONE_HOUR_SECONDS: u64 = 3600;

    /// Redline/OverLimit time above this is a system failure
    pub const FAILURE_REDLINE_SECONDS: u64 = 4 * ONE_HOUR_SECONDS;
    /// Redline/OverLimit time above this requires maintenance
    pub const MAINTENANCE_REDLINE_SECONDS: u64 = ONE_HOUR_SECONDS;
    /// Caution time above this requires maintenance
    pub const MAINTENANCE_CAUTION_SECONDS: u64 = 3 * ONE_HOUR_SECONDS;
}

/// Default run shape
pub mod run_defaults {
    /// 50 hours at one-minute resolution
    pub const TICKS: u32 = 50 * 60;
    /// Simulated seconds per tick
    pub const TICK_SECONDS: f64 = 60.0;
    /// Default CSV log path
    pub const OUTPUT_PATH: &str = "flight_log.csv";
}
