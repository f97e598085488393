//! Replacement rule expansion for splitshift.
//!
//! This module handles:
//! - Resolving glob patterns against the source tree
//! - Building the per-file expanded mapping (last pattern wins)

pub mod expander;
pub mod matcher;

pub use expander::{ExpandedMapping, expand};
pub use matcher::{FileMatcher, GlobFileMatcher};
