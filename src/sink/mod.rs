//! Output sinks for the simulation.
//!
//! The domain stages never write to a stream directly. The driver is handed
//! two capabilities:
//! - a [`RowSink`] that receives one [`FlightRow`] per tick (the CSV log)
//! - a [`NotificationSink`] that receives free-text, human readable lines
//!   (band entries, zone advisories, the final verdict)

mod console;
mod csv;
mod memory;

pub use console::{NullNotifier, StdoutNotifier};
pub use csv::{CsvRowSink, CSV_HEADER};
pub use memory::{RecordingNotifier, RecordingRowSink};

use std::path::PathBuf;
use thiserror::Error;

use crate::flight::FlightRow;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write flight row: {0}")]
    Write(#[from] std::io::Error),
}

// ============================================================================
// Sink Traits
// ============================================================================

/// Destination for per-tick flight rows.
pub trait RowSink {
    /// Append one row. Called exactly once per tick, in tick order.
    fn write_row(&mut self, row: &FlightRow) -> Result<(), SinkError>;

    /// Flush anything buffered. Called once, after the last row.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Destination for human readable notification lines.
///
/// Notifications are informational; delivering one cannot fail the run.
pub trait NotificationSink {
    fn notify(&mut self, message: &str);
}
