//! Line-oriented notification sinks

use std::io::Write;

use super::NotificationSink;

/// Prints each notification as a line on stdout.
///
/// A failed stdout write is logged and dropped; notifications never abort a run.
#[derive(Debug, Default)]
pub struct StdoutNotifier;

impl NotificationSink for StdoutNotifier {
    fn notify(&mut self, message: &str) {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        if let Err(e) = writeln!(lock, "{message}") {
            tracing::warn!(error = %e, "Failed to write notification to stdout");
        }
    }
}

/// Discards every notification.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl NotificationSink for NullNotifier {
    fn notify(&mut self, _message: &str) {}
}
