//! # Diagnostics
//!
//! The channel through which warnings and errors reach the host. Each
//! diagnostic is recorded for the round report and mirrored to `tracing`
//! at the matching level, so a CLI run sees them in the log and a library
//! caller can inspect them afterwards.

use std::fmt;
use std::sync::Mutex;

use tracing::{error, info, warn};

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub enum Severity {
    /// Informational note
    Info,
    /// A deterministic fallback was taken; generation continues
    Warning,
    /// A type or round failed
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single reported diagnostic
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Diagnostic {
    /// Severity of the diagnostic
    pub severity: Severity,
    /// Where it occurred (e.g. `type:com.acme.Order`, `endpoint:com.acme.OrderController#get`)
    pub location: String,
    /// Human-readable description
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: Severity, location: impl Into<String>, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.location, self.message)
    }
}

/// Thread-safe diagnostic collector for one round
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl Diagnostics {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it
    pub fn report(&self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Info => info!(location = %diagnostic.location, "{}", diagnostic.message),
            Severity::Warning => warn!(location = %diagnostic.location, "{}", diagnostic.message),
            Severity::Error => error!(location = %diagnostic.location, "{}", diagnostic.message),
        }
        match self.entries.lock() {
            Ok(mut entries) => entries.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }

    /// Record a warning
    pub fn warning(&self, location: impl Into<String>, message: impl Into<String>) {
        self.report(Diagnostic::new(Severity::Warning, location, message));
    }

    /// Record an error
    pub fn error(&self, location: impl Into<String>, message: impl Into<String>) {
        self.report(Diagnostic::new(Severity::Error, location, message));
    }

    /// Snapshot of everything recorded so far
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Drain the collector, returning its contents
    pub fn take(&self) -> Vec<Diagnostic> {
        match self.entries.lock() {
            Ok(mut entries) => std::mem::take(&mut *entries),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// `true` when at least one error has been recorded
    pub fn has_errors(&self) -> bool {
        self.snapshot()
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}
