//! Run Configuration Module
//!
//! Only the shape of a run is configurable: tick count, tick length, output
//! path and RNG seed. Band limits and the diagnostic policy are fixed design
//! constants in [`crate::types::thresholds`].
//!
//! ## Loading Order
//!
//! 1. Built-in defaults (3000 ticks of 60 s into `flight_log.csv`)
//! 2. An optional TOML file passed with `--config`
//! 3. Individual command line overrides
//!
//! ```ignore
//! let mut config = SimulationConfig::load_from_file(Path::new("run.toml"))?;
//! config.ticks = 600;
//! config.validate()?;
//! ```

mod simulation_config;

pub use simulation_config::*;
