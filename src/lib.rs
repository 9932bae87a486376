//! Tachometer Simulator: Jet Engine Power Band Monitoring
//!
//! Generates synthetic engine speed readings, classifies each into a power
//! band, accumulates time-in-band over a simulated flight and issues an
//! end-of-run maintenance verdict.
//!
//! ## Pipeline
//!
//! - **Generator**: weighted random RPM source, injected RNG
//! - **Engine**: rad/s -> RPM -> power band, via the shared band table
//! - **Flight**: total / caution / redline time accumulation
//! - **Diagnostics**: most-severe-first maintenance policy
//! - **Simulation**: fixed tick loop writing rows and notices to sinks

pub mod config;
pub mod types;
pub mod engine;
pub mod generator;
pub mod flight;
pub mod diagnostics;
pub mod sink;
pub mod simulation;

// Re-export run configuration
pub use config::{ConfigError, SimulationConfig};

// Re-export commonly used types
pub use types::{
    BandRange, Diagnostic, DiagnosticStatus, EngineState, PowerBand, BAND_TABLE,
};

// Re-export pipeline stages
pub use engine::{classify, BandNotice, PowerBandClassifier};
pub use engine::zones::RpmZone;
pub use generator::{AngularSpeedSource, FlightProfile, RpmGenerator, SequenceSource};
pub use flight::{FlightCounters, FlightRow, FlightTimeAccumulator};
pub use simulation::{run_to_path, RunReport, SimulationDriver, SimulationError};

// Re-export sinks
pub use sink::{CsvRowSink, NotificationSink, RowSink, SinkError};
