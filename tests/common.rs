#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use rtimekeeper::api::{self, AppState};
use rtimekeeper::db::Store;
use serde_json::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tower::ServiceExt;

pub fn rtk() -> Command {
    cargo_bin_cmd!("rtimekeeper")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtimekeeper.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    for suffix in ["", "-wal", "-shm"] {
        fs::remove_file(format!("{}{}", db_path, suffix)).ok();
    }
    db_path
}

/// Create a unique temp directory, emptied first
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtimekeeper_dir", name));
    fs::remove_dir_all(&path).ok();
    path
}

/// Fresh store with the schema in place
pub fn test_store(name: &str) -> Store {
    let store = Store::new(setup_test_db(name), Duration::from_secs(5));
    store.init().expect("init db");
    store
}

pub fn app(store: &Store) -> Router {
    api::router(
        AppState::new(store.clone()),
        Path::new("this-static-dir-does-not-exist"),
    )
}

/// Send one request through the router and decode the JSON body (Null when empty).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
    };
    (status, value)
}

pub async fn get_data(app: &Router) -> Value {
    let (status, body) = send(app, Method::GET, "/api/data", None).await;
    assert_eq!(status, StatusCode::OK);
    body
}

pub fn names(value: &Value) -> Vec<String> {
    let mut out: Vec<String> = value
        .as_array()
        .expect("array of names")
        .iter()
        .map(|v| v.as_str().expect("name").to_string())
        .collect();
    out.sort();
    out
}
