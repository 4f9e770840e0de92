//! The per-request log record and the fields collected into it.

use axum::{
    body::HttpBody,
    http::header,
    response::Response,
};
use chrono::{DateTime, TimeZone};
use std::{fmt, time::Duration};

use crate::recorded::RecordedErrors;

/// Timestamp layout of the summary line, e.g. `05/Mar/2026:07:08:09 +0200`.
pub const TIME_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Severity of an emitted access log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Classifies a response status when no error was recorded downstream.
    pub fn from_status(status: u16) -> Self {
        if status >= 500 {
            Severity::Error
        } else if status >= 400 {
            Severity::Warn
        } else {
            Severity::Info
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        })
    }
}

/// Request attributes captured before the rest of the chain runs.
///
/// Downstream handlers may rewrite the request URI, so the path logged is
/// always the one seen on entry.
#[derive(Debug, Clone, Default)]
pub struct RequestSnapshot {
    pub client_ip: String,
    pub method: String,
    pub path: String,
    pub referer: String,
    pub user_agent: String,
}

/// One access log record, built once per request and handed to the sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLogRecord {
    pub status_code: u16,
    pub duration_nanos: u64,
    pub duration_pretty: String,
    pub client_ip: String,
    pub method: String,
    pub path: String,
    pub referer: String,
    pub data_length: u64,
    pub user_agent: String,
    /// Private errors recorded by downstream handlers, in recorded order
    pub errors: Vec<String>,
}

impl RequestLogRecord {
    /// Assembles the record from the entry snapshot and the final response.
    pub fn collect(snapshot: RequestSnapshot, response: &Response, elapsed: Duration) -> Self {
        let errors = response
            .extensions()
            .get::<RecordedErrors>()
            .map(|recorded| recorded.private_messages().map(str::to_owned).collect())
            .unwrap_or_default();

        Self {
            status_code: response.status().as_u16(),
            duration_nanos: u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
            duration_pretty: pretty_duration(elapsed),
            client_ip: snapshot.client_ip,
            method: snapshot.method,
            path: snapshot.path,
            referer: snapshot.referer,
            data_length: clamp_data_length(written_size(response)),
            user_agent: snapshot.user_agent,
            errors,
        }
    }

    /// Renders the combined-log-style summary line used on the status path.
    pub fn summary_line<Tz>(&self, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        format!(
            "{} - [{}] \"{} {}\" {} {} \"{}\" \"{}\" ({})",
            self.client_ip,
            now.format(TIME_FORMAT),
            self.method,
            self.path,
            self.status_code,
            self.data_length,
            self.referer,
            self.user_agent,
            self.duration_pretty,
        )
    }
}

/// Human-readable rendering of an elapsed duration (`150.204ms`, `1.200s`).
pub fn pretty_duration(elapsed: Duration) -> String {
    format!("{elapsed:.3?}")
}

/// Byte counts below zero mean "nothing written or unknown" and log as 0.
pub fn clamp_data_length(size: i64) -> u64 {
    u64::try_from(size).unwrap_or(0)
}

/// Size of the response body, or -1 when it is streamed with no known length.
pub fn written_size(response: &Response) -> i64 {
    if let Some(exact) = response.body().size_hint().exact() {
        return i64::try_from(exact).unwrap_or(i64::MAX);
    }

    response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(-1)
}
