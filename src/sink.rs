//! Destinations for access log entries.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::record::{RequestLogRecord, Severity};

/// Accepts one finished access log entry per request.
///
/// Called concurrently from every in-flight request, so implementations must
/// do their own synchronization.
pub trait LogSink: Send + Sync + 'static {
    fn emit(&self, severity: Severity, message: &str, record: &RequestLogRecord);
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn emit(&self, severity: Severity, message: &str, record: &RequestLogRecord) {
        (**self).emit(severity, message, record);
    }
}

/// Emits entries as `tracing` events under the `access_log` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

macro_rules! access_event {
    ($level:ident, $record:ident, $message:ident) => {
        $level!(
            target: "access_log",
            status_code = $record.status_code,
            duration = $record.duration_nanos,
            duration_pretty = %$record.duration_pretty,
            client_ip = %$record.client_ip,
            method = %$record.method,
            path = %$record.path,
            referer = %$record.referer,
            data_length = $record.data_length,
            user_agent = %$record.user_agent,
            errors = ?$record.errors,
            "{}",
            $message
        )
    };
}

impl LogSink for TracingSink {
    fn emit(&self, severity: Severity, message: &str, record: &RequestLogRecord) {
        match severity {
            Severity::Info => access_event!(info, record, message),
            Severity::Warn => access_event!(warn, record, message),
            Severity::Error => access_event!(error, record, message),
        }
    }
}
