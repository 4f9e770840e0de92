//! Router wiring for the server binary.

use axum::{Router, middleware};
use std::path::PathBuf;
use tower_http::services::ServeDir;

use crate::middleware::{AccessLogger, log_requests};

/// Serves `static_dir` with every request passing through the access log.
///
/// Serve with `into_make_service_with_connect_info::<SocketAddr>()` so the
/// client address is available.
pub fn app(static_dir: PathBuf, logger: AccessLogger) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn_with_state(logger, log_requests))
}
