//! Scripted local HTTP service for exercising the detector clients.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone)]
struct Script {
    replies: Arc<Vec<(u16, Value)>>,
    hits: Arc<AtomicUsize>,
}

async fn reply(State(script): State<Script>) -> (StatusCode, Json<Value>) {
    let hit = script.hits.fetch_add(1, Ordering::SeqCst);
    // The last reply repeats once the script runs out
    let (status, body) = script
        .replies
        .get(hit)
        .or_else(|| script.replies.last())
        .cloned()
        .unwrap_or((200, Value::Null));
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body))
}

/// Serve `replies` in order on `path`. Returns the base URL and a hit counter.
pub async fn spawn(path: &str, replies: Vec<(u16, Value)>) -> (String, Arc<AtomicUsize>) {
    let script = Script {
        replies: Arc::new(replies),
        hits: Arc::new(AtomicUsize::new(0)),
    };
    let hits = script.hits.clone();
    let app = Router::new().route(path, post(reply)).with_state(script);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), hits)
}
