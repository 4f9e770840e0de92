//! Static file server with per-request access logging.
//!
//! Every request is logged once after it completes:
//! - INFO for 1xx-3xx, WARN for 4xx, ERROR for 5xx
//! - ERROR with the handler's message when a private error was recorded

use access_log::{AccessLogger, Error, TracingSink, cli::Cli, logging, server};
use std::net::SocketAddr;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args: Cli = argh::from_env();
    logging::init(&args.log_level, args.json)?;

    let static_dir = args
        .static_dir
        .canonicalize()
        .map_err(|source| Error::StaticDir {
            path: args.static_dir.clone(),
            source,
        })?;

    let logger = AccessLogger::new(TracingSink).trust_forwarded_headers(args.trust_forwarded);
    let app = server::app(static_dir.clone(), logger);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .map_err(|source| Error::Bind {
            addr: args.bind,
            source,
        })?;

    info!("Serving static files from: {:?}", static_dir);
    info!("Server running on: http://{}", args.bind);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
