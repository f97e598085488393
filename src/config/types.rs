use crate::error::{Result, SplitshiftError};
use crate::paths::normalize;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// On-disk shape of a `splitshift.toml` file, before rule validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
	#[serde(default = "default_source")]
	source: PathBuf,

	destination: PathBuf,

	#[serde(default)]
	replace: Option<toml::Table>,
}

fn default_source() -> PathBuf {
	PathBuf::from(".")
}

/// Top-level configuration from a `splitshift.toml` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	/// Source tree, relative to the config file's directory. Defaults to `.`.
	pub source: PathBuf,

	/// Destination tree, relative to the config file's directory.
	pub destination: PathBuf,

	/// Replacement rules in declaration order.
	/// `None` when the file has no `[replace]` table at all.
	pub replace: Option<RuleSet>,
}

/// What to do with the files a pattern matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceTarget {
	/// Leave the file out of the destination tree.
	Suppress,

	/// Write this file's bytes in place of the tracked file's own.
	Substitute(PathBuf),
}

/// A single `pattern = target` entry from the `[replace]` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceRule {
	/// Glob pattern, relative to the source root.
	pub pattern: String,

	pub target: ReplaceTarget,
}

/// Ordered replacement rules. Later rules override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
	rules: Vec<ReplaceRule>,
}

impl RuleSet {
	pub fn new(rules: Vec<ReplaceRule>) -> Self {
		Self { rules }
	}

	/// Build a rule set from a TOML table, keeping document order.
	///
	/// `false` suppresses, a string substitutes. Anything else is rejected.
	pub fn from_table(table: &toml::Table) -> Result<Self> {
		let mut rules = Vec::with_capacity(table.len());

		for (pattern, value) in table {
			let target = match value {
				toml::Value::Boolean(false) => ReplaceTarget::Suppress,
				toml::Value::String(path) if !path.is_empty() => {
					ReplaceTarget::Substitute(PathBuf::from(path))
				}
				toml::Value::String(_) => {
					return Err(SplitshiftError::InvalidReplaceTarget {
						pattern: pattern.clone(),
						reason: "replacement path is empty".to_string(),
					});
				}
				other => {
					return Err(SplitshiftError::InvalidReplaceTarget {
						pattern: pattern.clone(),
						reason: format!(
							"expected `false` or a path string, found {}",
							other.type_str()
						),
					});
				}
			};

			rules.push(ReplaceRule {
				pattern: pattern.clone(),
				target,
			});
		}

		Ok(Self { rules })
	}

	pub fn iter(&self) -> impl Iterator<Item = &ReplaceRule> {
		self.rules.iter()
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}
}

impl TryFrom<ConfigFile> for Config {
	type Error = SplitshiftError;

	fn try_from(file: ConfigFile) -> Result<Self> {
		let replace = file.replace.as_ref().map(RuleSet::from_table).transpose()?;

		Ok(Config {
			source: file.source,
			destination: file.destination,
			replace,
		})
	}
}

/// Absolute roots a run operates on, resolved against the config file's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
	/// The config file these roots were resolved from.
	pub config_path: PathBuf,

	pub source_root: PathBuf,

	pub destination_root: PathBuf,
}

impl Layout {
	/// Resolve `source` and `destination` relative to `config_path`'s directory.
	///
	/// `config_path` is expected to be absolute; see [`super::resolve_config_path`].
	pub fn from_config(config_path: &Path, config: &Config) -> Self {
		let base = config_path.parent().unwrap_or_else(|| Path::new("/"));

		Layout {
			config_path: config_path.to_path_buf(),
			source_root: normalize(&base.join(&config.source)),
			destination_root: normalize(&base.join(&config.destination)),
		}
	}
}
