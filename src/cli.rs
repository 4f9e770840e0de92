//! Command-line interface configuration.

use argh::FromArgs;
use std::{net::SocketAddr, path::PathBuf};

/// A static file server that writes one access log entry per request
#[derive(Debug, FromArgs)]
pub struct Cli {
    /// path to static files directory (e.g. 'dist/')
    #[argh(option, long = "static-dir")]
    pub static_dir: PathBuf,

    /// server bind address (default: '127.0.0.1:8000')
    #[argh(option, default = "SocketAddr::from(([127, 0, 0, 1], 8000))")]
    pub bind: SocketAddr,

    /// take the client address from X-Forwarded-For / X-Real-IP
    #[argh(switch, long = "trust-forwarded")]
    pub trust_forwarded: bool,

    /// write log lines as JSON
    #[argh(switch)]
    pub json: bool,

    /// log filter when RUST_LOG is unset (default: 'info')
    #[argh(option, long = "log-level", default = "String::from(\"info\")")]
    pub log_level: String,
}
