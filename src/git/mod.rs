//! Tracked file enumeration for splitshift.
//!
//! This module handles:
//! - Listing the files git tracks at a revision
//! - A fixed-list lister for tests and embedding

use crate::error::{Result, SplitshiftError};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Revision listed when none is given.
pub const DEFAULT_REVISION: &str = "HEAD";

/// Source of the repository-relative paths to mirror.
pub trait TrackedFileLister {
	/// List tracked files under `root`, in the order the source reports them.
	fn list(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/// Lists tracked files with `git ls-tree -z --name-only -r <revision>`.
///
/// NUL-separated output keeps names with newlines, tabs, quotes or non-UTF-8
/// bytes intact.
#[derive(Debug, Clone)]
pub struct GitLsTree {
	revision: String,
}

impl GitLsTree {
	pub fn new(revision: impl Into<String>) -> Self {
		Self {
			revision: revision.into(),
		}
	}

	pub fn revision(&self) -> &str {
		&self.revision
	}
}

impl Default for GitLsTree {
	fn default() -> Self {
		Self::new(DEFAULT_REVISION)
	}
}

impl TrackedFileLister for GitLsTree {
	fn list(&self, root: &Path) -> Result<Vec<PathBuf>> {
		let output = Command::new("git")
			.args(["ls-tree", "-z", "--name-only", "-r"])
			.arg(&self.revision)
			.current_dir(root)
			.stdin(Stdio::null())
			.output()
			.map_err(|source| SplitshiftError::GitSpawn {
				root: root.to_path_buf(),
				source,
			})?;

		if !output.status.success() {
			return Err(SplitshiftError::EnumerationFailed {
				root: root.to_path_buf(),
				stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
			});
		}

		let files = parse_listing(&output.stdout);
		tracing::debug!(
			root = %root.display(),
			revision = %self.revision,
			count = files.len(),
			"Listed tracked files"
		);

		Ok(files)
	}
}

/// A fixed list of tracked files, independent of `root`.
#[derive(Debug, Clone, Default)]
pub struct StaticFileList {
	files: Vec<PathBuf>,
}

impl StaticFileList {
	pub fn new<I, P>(files: I) -> Self
	where
		I: IntoIterator<Item = P>,
		P: Into<PathBuf>,
	{
		Self {
			files: files.into_iter().map(Into::into).collect(),
		}
	}
}

impl TrackedFileLister for StaticFileList {
	fn list(&self, _root: &Path) -> Result<Vec<PathBuf>> {
		Ok(self.files.clone())
	}
}

/// Split NUL-separated listing output into paths, dropping empty entries.
fn parse_listing(stdout: &[u8]) -> Vec<PathBuf> {
	stdout
		.split(|byte| *byte == 0)
		.filter(|entry| !entry.is_empty())
		.map(path_from_bytes)
		.collect()
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
	use std::os::unix::ffi::OsStrExt;

	PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

// Git writes UTF-8 paths on platforms without byte-based paths
#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
	PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}
