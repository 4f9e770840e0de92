//! Access-log - one structured log entry per HTTP request for axum servers.

pub mod cli;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod record;
pub mod recorded;
pub mod report;
pub mod server;
pub mod sink;

pub use error::Error;
pub use middleware::{AccessLogger, log_requests};
pub use record::{RequestLogRecord, Severity};
pub use recorded::{ErrorScope, RecordedError, RecordedErrors};
pub use sink::{LogSink, TracingSink};
