//! The task-manager verification script as data.
//!
//! # Responsibility
//! - Encode the eight rendered-page checks (title, add, notice, count,
//!   multi-add, delete, empty-input rejection) as one declarative step
//!   list.
//! - Keep pacing separate from semantics: demo pacing only inserts
//!   `Pause` steps, it never changes what is verified.

use std::time::Duration;
use taskdeck_core::{Locator, Step, NOTICE_DURATION, PAGE_TITLE, SUCCESS_MESSAGE};

/// First task added; its literal is asserted on the rendered page.
pub const FIRST_TASK: &str = "Learn Selenium with JavaScript";

/// Follow-up tasks for the multi-add check.
pub const MORE_TASKS: &[&str] = &["Start the web host", "Write browser checks", "Present the demo"];

/// Bounded wait applied to element-presence checks.
const ELEMENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Demo-only pacing between visible actions.
const DEMO_PAUSE: Duration = Duration::from_millis(1500);

/// Builds the full verification script against `base_url`.
///
/// # Contract
/// - With `paced == false` the script contains only semantic waits: the
///   bounded element waits and the single pause that outlives the
///   notice deadline.
/// - With `paced == true` the same checks run with human-pacing pauses
///   interleaved.
pub fn task_manager_script(base_url: &str, paced: bool) -> Vec<Step> {
    let mut steps = Vec::new();
    let pace = |steps: &mut Vec<Step>| {
        if paced {
            steps.push(Step::Pause {
                duration: DEMO_PAUSE,
            });
        }
    };

    // Page load: title literal, app root mounted.
    steps.push(Step::Navigate {
        url: base_url.to_string(),
    });
    steps.push(Step::AssertTitle {
        expected: PAGE_TITLE.to_string(),
    });
    steps.push(Step::WaitFor {
        locator: Locator::css("#app"),
        timeout: ELEMENT_TIMEOUT,
    });
    pace(&mut steps);

    // Add the first task and verify the success notice literal.
    steps.push(Step::Type {
        locator: Locator::test_id("task-input"),
        text: FIRST_TASK.to_string(),
    });
    steps.push(Step::Click {
        locator: Locator::test_id("add-btn"),
    });
    steps.push(Step::WaitFor {
        locator: Locator::test_id("success-message"),
        timeout: ELEMENT_TIMEOUT,
    });
    steps.push(Step::AssertText {
        locator: Locator::test_id("success-message"),
        expected: SUCCESS_MESSAGE.to_string(),
    });
    steps.push(Step::AssertTextContains {
        locator: Locator::test_id("task-count"),
        needle: "1".to_string(),
    });
    steps.push(Step::AssertText {
        locator: Locator::test_id("task-0"),
        expected: FIRST_TASK.to_string(),
    });

    // The notice must be gone once its 2s window has elapsed.
    steps.push(Step::Pause {
        duration: NOTICE_DURATION + Duration::from_millis(500),
    });
    steps.push(Step::AssertMissing {
        locator: Locator::test_id("success-message"),
    });

    // Three more adds bring the count to four.
    for task in MORE_TASKS {
        pace(&mut steps);
        steps.push(Step::Type {
            locator: Locator::test_id("task-input"),
            text: (*task).to_string(),
        });
        steps.push(Step::Click {
            locator: Locator::test_id("add-btn"),
        });
    }
    steps.push(Step::AssertTextContains {
        locator: Locator::test_id("task-count"),
        needle: "4".to_string(),
    });
    steps.push(Step::AssertText {
        locator: Locator::test_id("task-3"),
        expected: MORE_TASKS[2].to_string(),
    });
    pace(&mut steps);

    // Deleting index 0 shifts the former second task to the front.
    steps.push(Step::Click {
        locator: Locator::test_id("delete-btn-0"),
    });
    steps.push(Step::AssertTextContains {
        locator: Locator::test_id("task-count"),
        needle: "3".to_string(),
    });
    steps.push(Step::AssertText {
        locator: Locator::test_id("task-0"),
        expected: MORE_TASKS[0].to_string(),
    });
    pace(&mut steps);

    // Submitting an empty field must not change the count.
    steps.push(Step::ClearField {
        locator: Locator::test_id("task-input"),
    });
    steps.push(Step::Click {
        locator: Locator::test_id("add-btn"),
    });
    steps.push(Step::AssertTextContains {
        locator: Locator::test_id("task-count"),
        needle: "3".to_string(),
    });

    steps
}
