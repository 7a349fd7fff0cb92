//! Core domain logic for taskdeck.
//! This crate is the single source of truth for task-list behavior and
//! for the automation-script contract that verifies it.

pub mod logging;
pub mod script;
pub mod store;

pub use logging::{default_log_level, init_logging};
pub use script::runner::{run_script, ScriptError, ScriptReport};
pub use script::step::{Browser, BrowserError, BrowserResult, Locator, Step};
pub use store::task_list::{StoreError, StoreSnapshot, TaskListStore, NOTICE_DURATION};

/// Literal success-notice text rendered while the notice flag is visible.
pub const SUCCESS_MESSAGE: &str = "\u{2713} Task added successfully!";

/// Literal page title of the rendering host.
pub const PAGE_TITLE: &str = "Task Manager - Selenium Demo";

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
