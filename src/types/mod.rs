//! Shared data structures for the tachometer pipeline
//!
//! - PowerBand / BandRange / EngineState: classifier output, one per tick
//! - Diagnostic: end-of-run verdict
//! - thresholds: fixed design constants shared by every stage

mod band;
mod diagnostic;
pub mod thresholds;

pub use band::*;
pub use diagnostic::*;
