//! Declarative browser-automation scripts.
//!
//! # Responsibility
//! - Model an automation run as an ordered list of data steps
//!   (navigate, wait, act, assert) separated from any driver.
//! - Interpret those steps against anything implementing [`Browser`].
//!
//! # Invariants
//! - Steps execute strictly in order; the first failure aborts the run.
//! - Waits are bounded by an explicit per-step timeout; pauses are
//!   pacing only and never affect correctness.
//!
//! [`Browser`]: step::Browser

pub mod runner;
pub mod step;
