//! Shared entry point for the two script binaries.
//!
//! # Responsibility
//! - Read environment configuration, start the session, run the steps,
//!   and translate the outcome into a process exit code.
//!
//! # Invariants
//! - The session is released on every path, including failures, before
//!   the process exits.

use crate::scripts::task_manager_script;
use crate::webdriver::{Session, SessionConfig};
use log::{error, info};
use std::process::ExitCode;
use taskdeck_core::{default_log_level, init_logging, run_script};

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Runs the named script and returns the process exit code.
///
/// `paced` selects demo pacing and a visible (non-headless) browser;
/// `TASKDECK_HEADLESS` overrides the headless choice either way.
pub fn run(script_name: &str, paced: bool) -> ExitCode {
    let level = std::env::var("TASKDECK_LOG").unwrap_or_else(|_| default_log_level().to_string());
    if let Err(err) = init_logging(&level) {
        eprintln!("{script_name}: {err}");
        return ExitCode::FAILURE;
    }

    let base_url =
        std::env::var("TASKDECK_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let mut config = SessionConfig::default();
    if let Ok(url) = std::env::var("WEBDRIVER_URL") {
        config.webdriver_url = url;
    }
    config.headless = match std::env::var("TASKDECK_HEADLESS") {
        Ok(value) => parse_bool_flag(&value),
        Err(_) => !paced,
    };

    let steps = task_manager_script(&base_url, paced);

    let mut session = match Session::start(&config) {
        Ok(session) => session,
        Err(err) => {
            error!("event=session_start module=cli script={script_name} status=error reason={err}");
            eprintln!("{script_name}: failed to start webdriver session: {err}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = run_script(&mut session, script_name, &steps);
    // Release before reporting so a hung browser never outlives the run.
    session.quit();

    match outcome {
        Ok(report) => {
            info!(
                "event=run_ok module=cli script={script_name} steps={}",
                report.steps_run
            );
            println!("{script_name}: all {} steps passed", report.steps_run);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=run_failed module=cli script={script_name} reason={err}");
            eprintln!("{script_name}: {err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_bool_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::parse_bool_flag;

    #[test]
    fn bool_flag_accepts_common_spellings() {
        assert!(parse_bool_flag("1"));
        assert!(parse_bool_flag(" TRUE "));
        assert!(parse_bool_flag("yes"));
        assert!(!parse_bool_flag("0"));
        assert!(!parse_bool_flag("off"));
        assert!(!parse_bool_flag(""));
    }
}
