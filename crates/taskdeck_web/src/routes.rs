//! HTTP surface of the rendering host.
//!
//! # Responsibility
//! - Map form posts onto store mutations and re-render via
//!   POST-redirect-GET.
//! - Expose a JSON snapshot endpoint for black-box inspection.
//!
//! # Invariants
//! - Handlers take the store lock for the duration of one mutation or
//!   render only.
//! - An out-of-range delete is answered 404 and leaves the store
//!   untouched.

use crate::render::render_page;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use log::{info, warn};
use serde::Deserialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use taskdeck_core::{StoreSnapshot, TaskListStore};

pub type SharedStore = Arc<Mutex<TaskListStore>>;

/// Builds the application router over a shared store.
pub fn app(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/add", post(add_task))
        .route("/delete/{index}", post(delete_task))
        .route("/state", get(state))
        .with_state(store)
}

fn lock(store: &SharedStore) -> MutexGuard<'_, TaskListStore> {
    // A poisoned lock only means a panicked handler; the store itself
    // stays consistent because every mutation is a single call.
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn index(State(store): State<SharedStore>) -> Html<String> {
    let guard = lock(&store);
    Html(render_page(&guard, Instant::now()))
}

#[derive(Debug, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub task: String,
}

async fn add_task(State(store): State<SharedStore>, Form(form): Form<AddForm>) -> Redirect {
    let mut guard = lock(&store);
    guard.set_pending_input(form.task);
    guard.add_task(Instant::now());
    info!(
        "event=add_task module=web status=ok count={}",
        guard.task_count()
    );
    Redirect::to("/")
}

async fn delete_task(
    State(store): State<SharedStore>,
    Path(index): Path<usize>,
) -> Result<Redirect, (StatusCode, String)> {
    let mut guard = lock(&store);
    match guard.delete_task(index) {
        Ok(()) => {
            info!(
                "event=delete_task module=web status=ok index={index} count={}",
                guard.task_count()
            );
            Ok(Redirect::to("/"))
        }
        Err(err) => {
            warn!("event=delete_task module=web status=rejected index={index} reason={err}");
            Err((StatusCode::NOT_FOUND, err.to_string()))
        }
    }
}

async fn state(State(store): State<SharedStore>) -> Json<StoreSnapshot> {
    let guard = lock(&store);
    Json(guard.snapshot(Instant::now()))
}

#[cfg(test)]
mod tests {
    use super::{add_task, delete_task, state, AddForm, SharedStore};
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::Form;
    use std::sync::{Arc, Mutex};
    use taskdeck_core::TaskListStore;

    fn shared_store() -> SharedStore {
        Arc::new(Mutex::new(TaskListStore::new()))
    }

    #[tokio::test]
    async fn add_appends_and_clears_pending_input() {
        let store = shared_store();

        add_task(
            State(store.clone()),
            Form(AddForm {
                task: "  write tests  ".to_string(),
            }),
        )
        .await;

        let guard = store.lock().expect("store lock");
        assert_eq!(guard.tasks(), ["write tests"]);
        assert_eq!(guard.pending_input(), "");
    }

    #[tokio::test]
    async fn empty_add_is_a_silent_no_op() {
        let store = shared_store();

        add_task(
            State(store.clone()),
            Form(AddForm {
                task: "   ".to_string(),
            }),
        )
        .await;

        let guard = store.lock().expect("store lock");
        assert_eq!(guard.task_count(), 0);
    }

    #[tokio::test]
    async fn delete_shifts_later_tasks_left() {
        let store = shared_store();
        for task in ["a", "b", "c"] {
            add_task(
                State(store.clone()),
                Form(AddForm {
                    task: task.to_string(),
                }),
            )
            .await;
        }

        delete_task(State(store.clone()), Path(0))
            .await
            .expect("index 0 is valid");

        let guard = store.lock().expect("store lock");
        assert_eq!(guard.tasks(), ["b", "c"]);
    }

    #[tokio::test]
    async fn delete_out_of_range_is_a_404() {
        let store = shared_store();

        let error = delete_task(State(store.clone()), Path(7))
            .await
            .expect_err("empty list has no index 7");
        assert_eq!(error.0, StatusCode::NOT_FOUND);

        let guard = store.lock().expect("store lock");
        assert_eq!(guard.task_count(), 0);
    }

    #[tokio::test]
    async fn state_endpoint_snapshots_the_store() {
        let store = shared_store();
        add_task(
            State(store.clone()),
            Form(AddForm {
                task: "snapshot me".to_string(),
            }),
        )
        .await;

        let snapshot = state(State(store)).await.0;
        assert_eq!(snapshot.tasks, ["snapshot me"]);
        assert!(snapshot.notice_visible);
    }

    #[tokio::test]
    async fn state_response_serializes_to_the_expected_json_shape() {
        let store = shared_store();
        add_task(
            State(store.clone()),
            Form(AddForm {
                task: "snapshot me".to_string(),
            }),
        )
        .await;

        let snapshot = state(State(store)).await.0;
        let json = serde_json::to_value(&snapshot).expect("snapshot should serialize");
        assert_eq!(json["tasks"][0], "snapshot me");
        assert_eq!(json["pending_input"], "");
        assert_eq!(json["notice_visible"], true);
    }
}
