//! Rendering host entry point.
//!
//! # Responsibility
//! - Serve the task-list page on the configured address.
//! - Own the process-wide store instance for the session lifetime.

mod render;
mod routes;

use log::{error, info};
use std::sync::{Arc, Mutex};
use taskdeck_core::{default_log_level, init_logging, TaskListStore};

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error!("event=host_failed module=web status=error reason={err}");
        eprintln!("taskdeck_web: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let level = std::env::var("TASKDECK_LOG").unwrap_or_else(|_| default_log_level().to_string());
    init_logging(&level)?;

    let addr = std::env::var("TASKDECK_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let store = Arc::new(Mutex::new(TaskListStore::new()));
    let app = routes::app(store);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|err| format!("failed to bind `{addr}`: {err}"))?;
    info!("event=host_start module=web status=ok addr={addr}");

    axum::serve(listener, app)
        .await
        .map_err(|err| format!("server error: {err}"))
}
