//! Minimal local inbox backend for trying the client without a real agent.
//!
//! Run with `cargo run --example mock_inbox`, then point the `basic` demo at
//! it via `AGENT_INBOX_URL=http://127.0.0.1:8000`.

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value as JsonValue};
use std::net::SocketAddr;

async fn inbox(Json(body): Json<JsonValue>) -> Json<JsonValue> {
    let sender = body["sender"].as_str().unwrap_or("unknown");
    let message = body["message"].as_str().unwrap_or("");
    Json(json!({
        "response": format!("echo to {sender}: {message}"),
        "trace_url": "http://127.0.0.1:8000/trace/0",
    }))
}

async fn health() -> Json<JsonValue> {
    Json(json!({"status": "healthy", "version": "0.2.0"}))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = Router::new()
        .route("/inbox", post(inbox))
        .route("/health", get(health));

    let addr = SocketAddr::from(([127, 0, 0, 1], 8000));
    println!("mock inbox listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
