//! In-memory sinks, used to run the pipeline without touching the filesystem

use super::{NotificationSink, RowSink, SinkError};
use crate::flight::FlightRow;

/// Keeps every row it receives.
#[derive(Debug, Default)]
pub struct RecordingRowSink {
    pub rows: Vec<FlightRow>,
    pub finished: bool,
}

impl RecordingRowSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RowSink for RecordingRowSink {
    fn write_row(&mut self, row: &FlightRow) -> Result<(), SinkError> {
        self.rows.push(*row);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.finished = true;
        Ok(())
    }
}

/// Keeps every notification line it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub lines: Vec<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded lines containing `needle`
    pub fn count_containing(&self, needle: &str) -> usize {
        self.lines.iter().filter(|line| line.contains(needle)).count()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }
}
