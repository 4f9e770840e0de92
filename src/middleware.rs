//! Request logging middleware.

use axum::{
    extract::{ConnectInfo, OriginalUri, Request, State},
    http::{HeaderMap, HeaderName, header},
    middleware::Next,
    response::Response,
};
use chrono::Local;
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::Instant,
};

use crate::{
    record::{RequestLogRecord, RequestSnapshot},
    report::report,
    sink::{LogSink, TracingSink},
};

const X_REAL_IP: HeaderName = HeaderName::from_static("x-real-ip");
const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// State for [`log_requests`]: where entries go and how the client is identified
#[derive(Clone)]
pub struct AccessLogger {
    sink: Arc<dyn LogSink>,
    trust_forwarded_headers: bool,
}

impl AccessLogger {
    pub fn new(sink: impl LogSink) -> Self {
        Self {
            sink: Arc::new(sink),
            trust_forwarded_headers: false,
        }
    }

    /// Resolve the client from `X-Forwarded-For` / `X-Real-IP` before the
    /// socket peer. Only enable behind a proxy that sets these headers.
    pub fn trust_forwarded_headers(mut self, trust: bool) -> Self {
        self.trust_forwarded_headers = trust;
        self
    }

    fn snapshot(&self, req: &Request) -> RequestSnapshot {
        RequestSnapshot {
            client_ip: self.client_ip(req),
            method: req.method().to_string(),
            path: request_path(req),
            referer: header_str(req.headers(), &header::REFERER),
            user_agent: header_str(req.headers(), &header::USER_AGENT),
        }
    }

    fn client_ip(&self, req: &Request) -> String {
        if self.trust_forwarded_headers {
            if let Some(ip) = forwarded_client(req.headers()) {
                return ip;
            }
        }

        req.extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_default()
    }
}

impl Default for AccessLogger {
    fn default() -> Self {
        Self::new(TracingSink)
    }
}

/// Middleware that logs one access entry per request
///
/// Install with `axum::middleware::from_fn_with_state(logger, log_requests)`.
/// The request attributes are captured on entry, the timer covers only the
/// rest of the chain, and the entry is emitted after it returns.
pub async fn log_requests(
    State(logger): State<AccessLogger>,
    req: Request,
    next: Next,
) -> Response {
    let snapshot = logger.snapshot(&req);

    let start = Instant::now();
    let response = next.run(req).await;
    let elapsed = start.elapsed();

    let record = RequestLogRecord::collect(snapshot, &response, elapsed);
    report(logger.sink.as_ref(), &record, &Local::now());

    response
}

fn header_str(headers: &HeaderMap, name: &HeaderName) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Path as the client sent it; nested routers see `req.uri()` with the
/// mount prefix already stripped.
fn request_path(req: &Request) -> String {
    req.extensions()
        .get::<OriginalUri>()
        .map(|OriginalUri(uri)| uri.path())
        .unwrap_or_else(|| req.uri().path())
        .to_string()
}

/// First forwarded address that parses as an IP; anything else is ignored.
fn forwarded_client(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers
        .get(X_FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').find_map(parse_ip));

    forwarded
        .or_else(|| {
            headers
                .get(X_REAL_IP)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_ip)
        })
        .map(|ip| ip.to_string())
}

fn parse_ip(candidate: &str) -> Option<IpAddr> {
    candidate.trim().parse().ok()
}
