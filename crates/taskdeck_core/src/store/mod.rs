//! Task-list state and its mutation contract.
//!
//! # Responsibility
//! - Own the ordered task list, the pending-input buffer, and the
//!   transient success-notice flag.
//! - Keep every mutation synchronous and deterministic.
//!
//! # Invariants
//! - No stored task is empty or whitespace-only.
//! - Index position is the only task identity; order is significant.

pub mod task_list;
