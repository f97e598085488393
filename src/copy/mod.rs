//! Copy planning and execution for splitshift.
//!
//! This module handles:
//! - Deciding per tracked file between copy, substitute and skip
//! - Writing destination files, creating directories on demand
//! - Run counters

pub mod executor;
pub mod planner;
pub mod report;

pub use executor::{PlannedCopy, RunOptions, run, run_with};
pub use planner::{CopyDecision, decide};
pub use report::CopyReport;
