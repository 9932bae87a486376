//! CSV flight log writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{RowSink, SinkError};
use crate::flight::FlightRow;

/// Header row, written once before any data row
pub const CSV_HEADER: &str =
    "time_step,total_seconds,hours,minutes,seconds,rpm,band,caution_seconds,redline_seconds";

/// Writes flight rows as comma-separated lines.
///
/// The header is written when the sink is constructed, so a sink that exists
/// always has a well-formed file behind it.
pub struct CsvRowSink<W: Write> {
    writer: W,
    path: Option<PathBuf>,
    rows_written: u64,
}

impl CsvRowSink<BufWriter<File>> {
    /// Create (or truncate) the log file at `path` and write the header.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| SinkError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let mut sink = Self::new(BufWriter::new(file))?;
        sink.path = Some(path.to_path_buf());
        tracing::info!(path = %path.display(), "Opened flight log");
        Ok(sink)
    }
}

impl<W: Write> CsvRowSink<W> {
    /// Wrap an arbitrary writer and write the header.
    pub fn new(mut writer: W) -> Result<Self, SinkError> {
        writeln!(writer, "{CSV_HEADER}")?;
        Ok(Self {
            writer,
            path: None,
            rows_written: 0,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub const fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(mut self) -> Result<W, SinkError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> RowSink for CsvRowSink<W> {
    fn write_row(&mut self, row: &FlightRow) -> Result<(), SinkError> {
        writeln!(
            self.writer,
            "{},{},{},{},{},{},{},{},{}",
            row.time_step,
            row.total_seconds,
            row.hours,
            row.minutes,
            row.seconds,
            row.rpm,
            row.band,
            row.caution_seconds,
            row.redline_seconds,
        )?;
        self.rows_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        if let Some(path) = &self.path {
            tracing::debug!(path = %path.display(), rows = self.rows_written, "Flushed flight log");
        }
        Ok(())
    }
}
