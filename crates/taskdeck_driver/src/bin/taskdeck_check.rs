//! CI verification script: full checks, semantic waits only.

use std::process::ExitCode;

fn main() -> ExitCode {
    taskdeck_driver::cli::run("taskdeck_check", false)
}
