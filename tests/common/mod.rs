//! Shared helpers for the integration tests.

use access_log::{LogSink, RequestLogRecord, Severity};
use std::sync::{Arc, Mutex};

/// One entry as it reached the sink
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Entry {
    pub severity: Severity,
    pub message: String,
    pub record: RequestLogRecord,
}

/// Sink that keeps every entry in memory.
#[derive(Debug, Default)]
pub struct CapturingSink {
    entries: Mutex<Vec<Entry>>,
}

impl CapturingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.entries.lock().unwrap().clone()
    }

    /// The single entry logged so far; panics when there are zero or several.
    #[allow(dead_code)]
    pub fn only(&self) -> Entry {
        let entries = self.entries();
        assert_eq!(entries.len(), 1, "expected one entry, got {entries:?}");
        entries.into_iter().next().unwrap()
    }
}

impl LogSink for CapturingSink {
    fn emit(&self, severity: Severity, message: &str, record: &RequestLogRecord) {
        self.entries.lock().unwrap().push(Entry {
            severity,
            message: message.to_string(),
            record: record.clone(),
        });
    }
}
