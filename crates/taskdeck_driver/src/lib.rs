//! Browser-automation driver for the taskdeck rendering host.
//! Speaks the W3C WebDriver protocol and interprets the declarative
//! scripts defined in `taskdeck_core`.

pub mod cli;
pub mod scripts;
pub mod webdriver;
pub mod wire;

pub use scripts::task_manager_script;
pub use webdriver::{Session, SessionConfig, WebDriverError};
