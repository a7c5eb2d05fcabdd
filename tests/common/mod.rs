#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::Router;
use tokio::sync::Mutex;

/// Port 1 is never served in the test environment.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

/// Requests seen by a fake backend, as `"METHOD /path?query"` lines or bodies.
pub type Recorder = Arc<Mutex<Vec<String>>>;

pub fn recorder() -> Recorder {
    Arc::new(Mutex::new(Vec::new()))
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A session file path unique to this test run.
pub fn session_path(name: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir()
        .join(format!("zapdash-test-{}", std::process::id()))
        .join(format!("{}-{}.json", name, n))
}
