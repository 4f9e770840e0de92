//! Integration tests for the static file server over a real socket

mod common;

use access_log::{AccessLogger, Severity, server};
use axum::http::StatusCode;
use common::CapturingSink;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};

async fn static_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_static")
        .join(name);
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(dir.join("index.html"), "<h1>hello</h1>")
        .await
        .unwrap();
    dir
}

async fn spawn_server(dir: PathBuf, logger: AccessLogger) -> SocketAddr {
    let app = server::app(dir, logger);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    addr
}

#[tokio::test]
async fn test_static_file_is_logged() {
    let sink = CapturingSink::new();
    let dir = static_dir("served").await;
    let addr = spawn_server(dir, AccessLogger::new(Arc::clone(&sink))).await;

    let response = reqwest::Client::new()
        .get(format!("http://{}/index.html", addr))
        .header("user-agent", "reqwest-test")
        .header("referer", "http://localhost/")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "<h1>hello</h1>");

    let entry = sink.only();
    assert_eq!(entry.severity, Severity::Info);
    assert_eq!(entry.record.client_ip, "127.0.0.1");
    assert_eq!(entry.record.path, "/index.html");
    assert_eq!(entry.record.user_agent, "reqwest-test");
    assert_eq!(entry.record.referer, "http://localhost/");
    assert_eq!(entry.record.data_length, "<h1>hello</h1>".len() as u64);
    assert!(entry.message.starts_with("127.0.0.1 - ["));
}

#[tokio::test]
async fn test_missing_file_logs_warn() {
    let sink = CapturingSink::new();
    let dir = static_dir("missing").await;
    let addr = spawn_server(dir, AccessLogger::new(Arc::clone(&sink))).await;

    let response = reqwest::get(format!("http://{}/nope.css", addr))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let entry = sink.only();
    assert_eq!(entry.severity, Severity::Warn);
    assert!(entry.message.contains("\"GET /nope.css\" 404 "));
}

#[tokio::test]
async fn test_forwarded_client_when_trusted() {
    let sink = CapturingSink::new();
    let dir = static_dir("forwarded").await;
    let logger = AccessLogger::new(Arc::clone(&sink)).trust_forwarded_headers(true);
    let addr = spawn_server(dir, logger).await;

    reqwest::Client::new()
        .get(format!("http://{}/index.html", addr))
        .header("x-forwarded-for", "203.0.113.50, 10.0.0.1")
        .send()
        .await
        .unwrap();

    let entries = sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].record.client_ip, "203.0.113.50");
    assert!(entries[0].message.starts_with("203.0.113.50 - ["));
}

#[tokio::test]
async fn test_forwarded_header_ignored_by_default() {
    let sink = CapturingSink::new();
    let dir = static_dir("untrusted").await;
    let addr = spawn_server(dir, AccessLogger::new(Arc::clone(&sink))).await;

    reqwest::Client::new()
        .get(format!("http://{}/index.html", addr))
        .header("x-forwarded-for", "203.0.113.50")
        .send()
        .await
        .unwrap();

    assert_eq!(sink.only().record.client_ip, "127.0.0.1");
}
