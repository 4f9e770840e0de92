//! Picks the severity and message for a finished request and emits it.

use chrono::{DateTime, TimeZone};
use std::fmt;

use crate::{
    record::{RequestLogRecord, Severity},
    sink::LogSink,
};

/// Emits exactly one entry for `record`.
///
/// Recorded private errors take precedence over the status code: when any
/// exist they are concatenated into a single ERROR entry. Otherwise the
/// summary line is logged at the severity of the status code.
pub fn report<Tz>(sink: &dyn LogSink, record: &RequestLogRecord, now: &DateTime<Tz>)
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if !record.errors.is_empty() {
        sink.emit(Severity::Error, &record.errors.concat(), record);
        return;
    }

    let message = record.summary_line(now);
    sink.emit(Severity::from_status(record.status_code), &message, record);
}
