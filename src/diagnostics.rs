//! End-of-run maintenance verdict
//!
//! Rules are checked most severe first; the first match wins:
//! 1. redline > 4h                      -> SystemFailure (2)
//! 2. redline > 1h or caution > 3h      -> MaintenanceRequired (1)
//! 3. otherwise                         -> Successful (0)

use crate::flight::FlightCounters;
use crate::types::thresholds::diagnostic_limits::{
    FAILURE_REDLINE_SECONDS, MAINTENANCE_CAUTION_SECONDS, MAINTENANCE_REDLINE_SECONDS,
};
use crate::types::Diagnostic;

pub const FAILURE_MESSAGE: &str =
    "SYSTEM CHECK: SYSTEM FAILURE - Excessive time in REDLINE/OVERLIMIT";
pub const MAINTENANCE_MESSAGE: &str =
    "SYSTEM CHECK: MAINTENANCE REQUIRED - Heavy use in CAUTION/REDLINE bands";
pub const SUCCESS_MESSAGE: &str = "SYSTEM CHECK: SUCCESSFUL - Engine within expected use profile";

/// Evaluate the final counters of a run.
pub fn evaluate(counters: &FlightCounters) -> Diagnostic {
    if counters.redline_seconds > FAILURE_REDLINE_SECONDS {
        Diagnostic::failure(FAILURE_MESSAGE)
    } else if counters.redline_seconds > MAINTENANCE_REDLINE_SECONDS
        || counters.caution_seconds > MAINTENANCE_CAUTION_SECONDS
    {
        Diagnostic::maintenance(MAINTENANCE_MESSAGE)
    } else {
        Diagnostic::successful(SUCCESS_MESSAGE)
    }
}
