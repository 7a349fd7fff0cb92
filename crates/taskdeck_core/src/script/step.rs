//! Step and locator vocabulary plus the driver-facing [`Browser`] trait.
//!
//! # Responsibility
//! - Describe "what to verify" as plain data, independent of any
//!   webdriver wire protocol.
//! - Define the minimal action surface a driver must provide.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// How a step addresses an element on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Locator {
    /// Raw CSS selector.
    Css(String),
    /// Stable test identifier, rendered as `[data-testid="..."]`.
    TestId(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId(id.into())
    }

    /// CSS selector form accepted by every driver.
    pub fn to_css(&self) -> String {
        match self {
            Self::Css(selector) => selector.clone(),
            Self::TestId(id) => format!("[data-testid=\"{id}\"]"),
        }
    }
}

impl Display for Locator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// One automation step: a single locate/act/wait/assert unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Load `url` and block until navigation completes.
    Navigate { url: String },
    /// Poll for element presence until found or `timeout` elapses.
    WaitFor { locator: Locator, timeout: Duration },
    /// Send `text` as keystrokes to the element.
    Type { locator: Locator, text: String },
    /// Clear an editable element.
    ClearField { locator: Locator },
    /// Click the element.
    Click { locator: Locator },
    /// Unconditional pacing delay; never load-bearing.
    Pause { duration: Duration },
    /// Assert the page title equals `expected`.
    AssertTitle { expected: String },
    /// Assert the element's rendered text equals `expected`.
    AssertText { locator: Locator, expected: String },
    /// Assert the element's rendered text contains `needle`.
    AssertTextContains { locator: Locator, needle: String },
    /// Assert the element is absent from the page.
    AssertMissing { locator: Locator },
}

impl Step {
    /// Short stable name used in log lines.
    pub fn action_name(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "navigate",
            Self::WaitFor { .. } => "wait_for",
            Self::Type { .. } => "type",
            Self::ClearField { .. } => "clear_field",
            Self::Click { .. } => "click",
            Self::Pause { .. } => "pause",
            Self::AssertTitle { .. } => "assert_title",
            Self::AssertText { .. } => "assert_text",
            Self::AssertTextContains { .. } => "assert_text_contains",
            Self::AssertMissing { .. } => "assert_missing",
        }
    }
}

/// Failures a driver can report for one primitive action.
#[derive(Debug)]
pub enum BrowserError {
    /// No element matched the selector.
    NotFound { selector: String },
    /// Session, transport, or protocol failure; message carries detail.
    Driver(String),
}

impl Display for BrowserError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { selector } => write!(f, "no element matches `{selector}`"),
            Self::Driver(message) => write!(f, "driver failure: {message}"),
        }
    }
}

impl Error for BrowserError {}

pub type BrowserResult<T> = Result<T, BrowserError>;

/// Primitive actions the step runner needs from a driver.
///
/// The wire client implements this against a live webdriver endpoint;
/// tests implement it in memory. Every method blocks until the action
/// settles or fails.
pub trait Browser {
    fn navigate(&mut self, url: &str) -> BrowserResult<()>;
    fn title(&mut self) -> BrowserResult<String>;
    /// Presence probe; `Ok` means at least one element matches now.
    fn find(&mut self, selector: &str) -> BrowserResult<()>;
    fn type_text(&mut self, selector: &str, text: &str) -> BrowserResult<()>;
    fn clear(&mut self, selector: &str) -> BrowserResult<()>;
    fn click(&mut self, selector: &str) -> BrowserResult<()>;
    fn text_of(&mut self, selector: &str) -> BrowserResult<String>;
}

#[cfg(test)]
mod tests {
    use super::{Locator, Step};
    use std::time::Duration;

    #[test]
    fn test_id_renders_to_attribute_selector() {
        let locator = Locator::test_id("task-input");
        assert_eq!(locator.to_css(), "[data-testid=\"task-input\"]");
    }

    #[test]
    fn css_locator_passes_through() {
        assert_eq!(Locator::css("#app").to_css(), "#app");
    }

    #[test]
    fn steps_serialize_with_action_tag() {
        let step = Step::WaitFor {
            locator: Locator::css("#app"),
            timeout: Duration::from_secs(5),
        };
        let json = serde_json::to_value(&step).expect("step should serialize");
        assert_eq!(json["action"], "wait_for");
    }
}
