//! End-of-run diagnostic verdict

use serde::{Deserialize, Serialize};

/// Severity of the end-of-run system check
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticStatus {
    Successful = 0,
    MaintenanceRequired = 1,
    SystemFailure = 2,
}

impl DiagnosticStatus {
    /// Numeric severity code reported alongside the message
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for DiagnosticStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticStatus::Successful => write!(f, "SUCCESSFUL"),
            DiagnosticStatus::MaintenanceRequired => write!(f, "MAINTENANCE REQUIRED"),
            DiagnosticStatus::SystemFailure => write!(f, "SYSTEM FAILURE"),
        }
    }
}

/// Immutable verdict produced once from the final flight counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    status: DiagnosticStatus,
    message: String,
    code: u8,
}

impl Diagnostic {
    fn new(status: DiagnosticStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: status.code(),
        }
    }

    pub fn successful(message: impl Into<String>) -> Self {
        Self::new(DiagnosticStatus::Successful, message)
    }

    pub fn maintenance(message: impl Into<String>) -> Self {
        Self::new(DiagnosticStatus::MaintenanceRequired, message)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(DiagnosticStatus::SystemFailure, message)
    }

    pub const fn status(&self) -> DiagnosticStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> u8 {
        self.code
    }
}

impl Default for Diagnostic {
    fn default() -> Self {
        Self::successful("SYSTEM CHECK: SUCCESSFUL")
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}
