//! Demo script: the same checks with human pacing and a visible browser.

use std::process::ExitCode;

fn main() -> ExitCode {
    taskdeck_driver::cli::run("taskdeck_demo", true)
}
