//! splitshift - mirror the tracked files of a git tree into another directory.
//!
//! This library provides the core functionality for splitshift, including:
//! - Configuration file resolution and parsing
//! - Tracked file enumeration through git
//! - Glob-keyed replacement rule expansion
//! - Per-file copy decisions and execution
//!
//! # Example
//!
//! ```no_run
//! use splitshift::config::load_config;
//! use splitshift::copy::RunOptions;
//! use splitshift::git::GitLsTree;
//! use splitshift::mirror;
//! use splitshift::rules::GlobFileMatcher;
//!
//! let cwd = std::env::current_dir().unwrap();
//! if let Some(loaded) = load_config(&cwd, None).unwrap() {
//!     let report = mirror(
//!         &loaded,
//!         &GitLsTree::default(),
//!         &GlobFileMatcher,
//!         RunOptions::default(),
//!     )
//!     .unwrap();
//!     println!("{report}");
//! }
//! ```

pub mod config;
pub mod copy;
pub mod error;
pub mod git;
pub mod mirror;
pub mod paths;
pub mod rules;

pub use error::{Result, SplitshiftError};
pub use mirror::{mirror, mirror_with};
