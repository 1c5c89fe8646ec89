//! The logging facility seam that bound loggers forward to.
//!
//! Production code hands a [`TracingFacility`] to the registry; tests hand a
//! [`CaptureFacility`] and assert on the records it collected.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::severity::Severity;

/// Target every record emitted by [`TracingFacility`] is tagged with.
pub const TRACING_TARGET: &str = "loglabel";

/// Sink for already-labeled messages.
pub trait LogFacility: Send + Sync {
    /// Emit one record at `severity`.
    fn log(&self, severity: Severity, message: &str);

    fn info(&self, message: &str) {
        self.log(Severity::Info, message);
    }

    fn debug(&self, message: &str) {
        self.log(Severity::Debug, message);
    }

    fn warning(&self, message: &str) {
        self.log(Severity::Warning, message);
    }
}

/// Forwards records to the `tracing` dispatcher installed by the application.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFacility;

impl LogFacility for TracingFacility {
    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => tracing::debug!(target: TRACING_TARGET, "{message}"),
            Severity::Info => tracing::info!(target: TRACING_TARGET, "{message}"),
            Severity::Warning => tracing::warn!(target: TRACING_TARGET, "{message}"),
        }
    }
}

/// One record captured by [`CaptureFacility`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub severity: Severity,
    pub message: String,
}

impl Record {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// In-memory facility for tests. Clones share the same record buffer, so a
/// test can keep one handle and give another to the registry.
#[derive(Debug, Clone, Default)]
pub struct CaptureFacility {
    records: Arc<Mutex<Vec<Record>>>,
}

impl CaptureFacility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything captured so far, in emission order.
    pub fn records(&self) -> Vec<Record> {
        self.lock().clone()
    }

    /// Messages captured at one severity.
    pub fn messages_at(&self, severity: Severity) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|record| record.severity == severity)
            .map(|record| record.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        // Records stay readable after a panicking writer.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogFacility for CaptureFacility {
    fn log(&self, severity: Severity, message: &str) {
        self.lock().push(Record::new(severity, message));
    }
}
