//! Configuration loading and parsing for splitshift.
//!
//! This module handles:
//! - Config path resolution (explicit override or `splitshift.toml`)
//! - TOML config file parsing
//! - Resolving source and destination roots

pub mod locate;
pub mod parser;
pub mod types;

pub use locate::{DEFAULT_CONFIG_FILE, LoadedConfig, load_config, resolve_config_path};
pub use parser::{parse_config_file, parse_config_str};
pub use types::{Config, Layout, ReplaceRule, ReplaceTarget, RuleSet};
