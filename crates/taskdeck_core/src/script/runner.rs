//! Step-list interpreter.
//!
//! # Responsibility
//! - Execute a script strictly in order against a [`Browser`].
//! - Turn the first failing step into a `ScriptError` with enough
//!   detail to diagnose the run from the log alone.
//!
//! # Invariants
//! - No retries: every wait either succeeds within its timeout or the
//!   run fails.
//! - The runner never owns the driver session; cleanup stays with the
//!   caller.

use crate::script::step::{Browser, BrowserError, Locator, Step};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::thread;
use std::time::{Duration, Instant};

/// How often `WaitFor` re-probes element presence.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub type ScriptResult<T> = Result<T, ScriptError>;

/// Fatal failure of one automation step.
#[derive(Debug)]
pub enum ScriptError {
    /// `WaitFor` exhausted its bounded timeout.
    ElementNotFound {
        step: usize,
        locator: Locator,
        timeout: Duration,
    },
    /// Rendered output did not match the expected literal.
    AssertionFailed {
        step: usize,
        subject: String,
        expected: String,
        actual: String,
    },
    /// The driver failed outside of an assertion.
    Browser {
        step: usize,
        action: &'static str,
        source: BrowserError,
    },
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ElementNotFound {
                step,
                locator,
                timeout,
            } => write!(
                f,
                "step {step}: element `{locator}` not found within {}ms",
                timeout.as_millis()
            ),
            Self::AssertionFailed {
                step,
                subject,
                expected,
                actual,
            } => write!(
                f,
                "step {step}: assertion on {subject} failed: expected `{expected}`, actual `{actual}`"
            ),
            Self::Browser { step, action, source } => {
                write!(f, "step {step}: {action} failed: {source}")
            }
        }
    }
}

impl Error for ScriptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Browser { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptReport {
    pub steps_run: usize,
}

/// Runs `steps` in order against `browser`.
///
/// # Contract
/// - Returns after the last step with a report, or at the first failed
///   step with a `ScriptError` naming that step.
/// - `Pause` steps sleep unconditionally and cannot fail.
pub fn run_script<B: Browser>(browser: &mut B, name: &str, steps: &[Step]) -> ScriptResult<ScriptReport> {
    info!(
        "event=script_start module=runner script={name} steps={}",
        steps.len()
    );
    for (index, step) in steps.iter().enumerate() {
        debug!(
            "event=step_begin module=runner script={name} step={index} action={}",
            step.action_name()
        );
        run_step(browser, index, step)?;
        info!(
            "event=step_ok module=runner script={name} step={index} action={}",
            step.action_name()
        );
    }
    info!(
        "event=script_ok module=runner script={name} steps={}",
        steps.len()
    );
    Ok(ScriptReport {
        steps_run: steps.len(),
    })
}

fn run_step<B: Browser>(browser: &mut B, index: usize, step: &Step) -> ScriptResult<()> {
    match step {
        Step::Navigate { url } => browser
            .navigate(url)
            .map_err(|source| browser_error(index, "navigate", source)),
        Step::WaitFor { locator, timeout } => wait_for(browser, index, locator, *timeout),
        Step::Type { locator, text } => browser
            .type_text(&locator.to_css(), text)
            .map_err(|source| browser_error(index, "type", source)),
        Step::ClearField { locator } => browser
            .clear(&locator.to_css())
            .map_err(|source| browser_error(index, "clear_field", source)),
        Step::Click { locator } => browser
            .click(&locator.to_css())
            .map_err(|source| browser_error(index, "click", source)),
        Step::Pause { duration } => {
            thread::sleep(*duration);
            Ok(())
        }
        Step::AssertTitle { expected } => {
            let actual = browser
                .title()
                .map_err(|source| browser_error(index, "assert_title", source))?;
            if actual == *expected {
                Ok(())
            } else {
                Err(ScriptError::AssertionFailed {
                    step: index,
                    subject: "page title".to_string(),
                    expected: expected.clone(),
                    actual,
                })
            }
        }
        Step::AssertText { locator, expected } => {
            let actual = text_of(browser, index, "assert_text", locator)?;
            if actual == *expected {
                Ok(())
            } else {
                Err(ScriptError::AssertionFailed {
                    step: index,
                    subject: format!("`{locator}`"),
                    expected: expected.clone(),
                    actual,
                })
            }
        }
        Step::AssertTextContains { locator, needle } => {
            let actual = text_of(browser, index, "assert_text_contains", locator)?;
            if actual.contains(needle) {
                Ok(())
            } else {
                Err(ScriptError::AssertionFailed {
                    step: index,
                    subject: format!("`{locator}`"),
                    expected: format!("text containing `{needle}`"),
                    actual,
                })
            }
        }
        Step::AssertMissing { locator } => match browser.find(&locator.to_css()) {
            Err(BrowserError::NotFound { .. }) => Ok(()),
            Ok(()) => Err(ScriptError::AssertionFailed {
                step: index,
                subject: format!("`{locator}`"),
                expected: "element absent".to_string(),
                actual: "element present".to_string(),
            }),
            Err(source) => Err(browser_error(index, "assert_missing", source)),
        },
    }
}

fn wait_for<B: Browser>(
    browser: &mut B,
    index: usize,
    locator: &Locator,
    timeout: Duration,
) -> ScriptResult<()> {
    let selector = locator.to_css();
    let deadline = Instant::now() + timeout;
    loop {
        match browser.find(&selector) {
            Ok(()) => return Ok(()),
            Err(BrowserError::NotFound { .. }) => {}
            Err(source) => return Err(browser_error(index, "wait_for", source)),
        }
        if Instant::now() >= deadline {
            return Err(ScriptError::ElementNotFound {
                step: index,
                locator: locator.clone(),
                timeout,
            });
        }
        thread::sleep(WAIT_POLL_INTERVAL.min(timeout));
    }
}

fn text_of<B: Browser>(
    browser: &mut B,
    index: usize,
    action: &'static str,
    locator: &Locator,
) -> ScriptResult<String> {
    browser
        .text_of(&locator.to_css())
        .map_err(|source| browser_error(index, action, source))
}

fn browser_error(step: usize, action: &'static str, source: BrowserError) -> ScriptError {
    ScriptError::Browser {
        step,
        action,
        source,
    }
}
