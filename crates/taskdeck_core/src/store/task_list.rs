//! Task-list store.
//!
//! # Responsibility
//! - Hold the ordered task strings plus the transient UI state around
//!   them (pending input, success notice).
//! - Expose the add/delete mutations and read accessors the rendering
//!   host needs.
//!
//! # Invariants
//! - Stored tasks are trimmed and never empty.
//! - `add_task` on an empty-after-trim buffer is a silent no-op that
//!   keeps the buffer untouched.
//! - The notice deadline is replaced on every successful add, so the
//!   last add always wins over an earlier pending hide.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

/// How long the success notice stays visible after a successful add.
pub const NOTICE_DURATION: Duration = Duration::from_millis(2000);

pub type StoreResult<T> = Result<T, StoreError>;

/// Semantic errors raised by task-list mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "task index {index} out of range for list of {len}")
            }
        }
    }
}

impl Error for StoreError {}

/// Serializable read-only view of the store for inspection endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreSnapshot {
    pub tasks: Vec<String>,
    pub pending_input: String,
    pub notice_visible: bool,
}

/// Ordered task list plus transient UI flags.
///
/// All mutations are synchronous; the notice auto-hide is modeled as a
/// deadline instead of a background timer, so callers pass the current
/// `Instant` and visibility stays a pure read. That makes overlapping
/// adds deterministic and keeps tests free of sleeps.
#[derive(Debug, Clone, Default)]
pub struct TaskListStore {
    tasks: Vec<String>,
    pending_input: String,
    notice_deadline: Option<Instant>,
}

impl TaskListStore {
    /// Creates an empty store with no pending input and a hidden notice.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the pending-input buffer with `text`.
    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }

    /// Submits the pending-input buffer as a new task.
    ///
    /// # Contract
    /// - Trims the buffer; an empty-after-trim buffer is a no-op with no
    ///   state change (the buffer is kept so the user can correct it).
    /// - On success: appends the trimmed text, clears the buffer, and
    ///   arms the notice deadline at `now + NOTICE_DURATION`.
    /// - A second add before an earlier deadline fires simply replaces
    ///   the deadline; the flag stays boolean, nothing double-fires.
    pub fn add_task(&mut self, now: Instant) {
        let trimmed = self.pending_input.trim();
        if trimmed.is_empty() {
            return;
        }
        self.tasks.push(trimmed.to_string());
        self.pending_input.clear();
        self.notice_deadline = Some(now + NOTICE_DURATION);
    }

    /// Removes the task at `index`, shifting later tasks left by one.
    ///
    /// # Contract
    /// - Returns `StoreError::IndexOutOfRange` for an invalid index and
    ///   leaves the list untouched.
    /// - Relative order of the remaining tasks is preserved.
    pub fn delete_task(&mut self, index: usize) -> StoreResult<()> {
        if index >= self.tasks.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        self.tasks.remove(index);
        Ok(())
    }

    /// Current number of tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Current task list in insertion order.
    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    /// Current not-yet-submitted input text.
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Whether the success notice is visible at `now`.
    pub fn notice_visible(&self, now: Instant) -> bool {
        match self.notice_deadline {
            Some(deadline) => now < deadline,
            None => false,
        }
    }

    /// Time left until the visible notice hides, `None` when hidden.
    pub fn notice_remaining(&self, now: Instant) -> Option<Duration> {
        self.notice_deadline.and_then(|deadline| {
            let remaining = deadline.saturating_duration_since(now);
            (remaining > Duration::ZERO).then_some(remaining)
        })
    }

    /// Read-only snapshot evaluated at `now`.
    pub fn snapshot(&self, now: Instant) -> StoreSnapshot {
        StoreSnapshot {
            tasks: self.tasks.clone(),
            pending_input: self.pending_input.clone(),
            notice_visible: self.notice_visible(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreError, TaskListStore, NOTICE_DURATION};
    use std::time::{Duration, Instant};

    #[test]
    fn add_trims_and_appends() {
        let now = Instant::now();
        let mut store = TaskListStore::new();

        store.set_pending_input("  write docs  ");
        store.add_task(now);

        assert_eq!(store.task_count(), 1);
        assert_eq!(store.tasks(), ["write docs"]);
        assert_eq!(store.pending_input(), "");
    }

    #[test]
    fn whitespace_only_add_keeps_buffer_and_list() {
        let now = Instant::now();
        let mut store = TaskListStore::new();

        store.set_pending_input("   ");
        store.add_task(now);

        assert_eq!(store.task_count(), 0);
        assert_eq!(store.pending_input(), "   ");
        assert!(!store.notice_visible(now));
    }

    #[test]
    fn delete_out_of_range_is_rejected() {
        let mut store = TaskListStore::new();
        let error = store.delete_task(0).expect_err("empty list has no index 0");
        assert_eq!(error, StoreError::IndexOutOfRange { index: 0, len: 0 });
    }

    #[test]
    fn notice_deadline_replacement_last_add_wins() {
        let start = Instant::now();
        let mut store = TaskListStore::new();

        store.set_pending_input("first");
        store.add_task(start);
        let second_add = start + Duration::from_millis(1500);
        store.set_pending_input("second");
        store.add_task(second_add);

        // First deadline would already have passed here; the second keeps
        // the notice visible.
        let probe = start + NOTICE_DURATION + Duration::from_millis(500);
        assert!(store.notice_visible(probe));
        assert!(!store.notice_visible(second_add + NOTICE_DURATION));
    }
}
