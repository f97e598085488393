use std::path::PathBuf;

/// Library-level structured errors for splitshift.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum SplitshiftError {
	#[error("Failed to read config file: {path}")]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid replacement for pattern {pattern}: {reason}")]
	InvalidReplaceTarget { pattern: String, reason: String },

	#[error("Invalid glob pattern: {pattern}")]
	InvalidGlob {
		pattern: String,
		#[source]
		source: globset::Error,
	},

	#[error("Failed to walk source tree: {root}")]
	Walk {
		root: PathBuf,
		#[source]
		source: walkdir::Error,
	},

	#[error("Failed to run git in {root}")]
	GitSpawn {
		root: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to list tracked files in {root}: {stderr}")]
	EnumerationFailed { root: PathBuf, stderr: String },

	#[error("Failed to create directory: {path}")]
	CreateDir {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Destination {destination_root} overlaps source {source_root}")]
	OverlappingRoots {
		source_root: PathBuf,
		destination_root: PathBuf,
	},

	#[error("Refusing to copy {path} onto itself")]
	SameFile { path: PathBuf },

	#[error("Failed to copy {from} to {to}")]
	CopyFailed {
		from: PathBuf,
		to: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Result type alias using SplitshiftError.
pub type Result<T> = std::result::Result<T, SplitshiftError>;
