//! Startup errors for the access-log server.

use std::{io, net::SocketAddr, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("static directory {path:?} is not usable: {source}")]
    StaticDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] io::Error),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}
