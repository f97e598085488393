use crate::error::{Result, SplitshiftError};
use globset::{Glob, GlobBuilder, GlobMatcher, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Resolves glob patterns against a tree of files.
pub trait FileMatcher {
	/// Return the absolute paths of all files under `root` matching `pattern`.
	///
	/// `pattern` is relative to `root`. Only files are returned, never directories.
	fn matches(&self, root: &Path, pattern: &str) -> Result<Vec<PathBuf>>;

	/// Resolve several patterns at once, one result list per pattern in input order.
	fn matches_all(&self, root: &Path, patterns: &[&str]) -> Result<Vec<Vec<PathBuf>>> {
		patterns
			.iter()
			.map(|pattern| self.matches(root, pattern))
			.collect()
	}
}

/// [`FileMatcher`] backed by the real filesystem.
///
/// Matching is case-sensitive and `*`/`?` never cross a `/`; use `**` to
/// descend into directories. The `.git` directory is never visited. All
/// patterns of a [`FileMatcher::matches_all`] call share a single walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobFileMatcher;

impl FileMatcher for GlobFileMatcher {
	fn matches(&self, root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
		let mut matched = self.matches_all(root, &[pattern])?;
		Ok(matched.pop().unwrap_or_default())
	}

	fn matches_all(&self, root: &Path, patterns: &[&str]) -> Result<Vec<Vec<PathBuf>>> {
		let mut builder = GlobSetBuilder::new();
		for pattern in patterns {
			builder.add(build_glob(pattern)?);
		}
		let set = builder
			.build()
			.map_err(|source| SplitshiftError::InvalidGlob {
				pattern: patterns.join(", "),
				source,
			})?;

		let mut matched = vec![Vec::new(); patterns.len()];
		if patterns.is_empty() {
			return Ok(matched);
		}

		let walker = WalkDir::new(root)
			.follow_links(false)
			.into_iter()
			.filter_entry(|entry| entry.depth() == 0 || entry.file_name() != ".git");

		for entry in walker {
			let entry = entry.map_err(|source| SplitshiftError::Walk {
				root: root.to_path_buf(),
				source,
			})?;

			// Symlinks are followed for the file check only
			if !entry.path().is_file() {
				continue;
			}

			let Ok(relative) = entry.path().strip_prefix(root) else {
				continue;
			};

			for index in set.matches(to_glob_path(relative)) {
				matched[index].push(entry.path().to_path_buf());
			}
		}

		for files in &mut matched {
			files.sort();
		}
		Ok(matched)
	}
}

/// Build a glob with path-aware separator semantics.
fn build_glob(pattern: &str) -> Result<Glob> {
	let trimmed = pattern.strip_prefix("./").unwrap_or(pattern);

	GlobBuilder::new(trimmed)
		.literal_separator(true)
		.case_insensitive(false)
		.build()
		.map_err(|source| SplitshiftError::InvalidGlob {
			pattern: pattern.to_string(),
			source,
		})
}

/// Compile a single glob pattern into a matcher.
pub(crate) fn compile_glob(pattern: &str) -> Result<GlobMatcher> {
	Ok(build_glob(pattern)?.compile_matcher())
}

/// Render a relative path with `/` separators for glob matching.
fn to_glob_path(relative: &Path) -> String {
	relative
		.components()
		.map(|c| c.as_os_str().to_string_lossy())
		.collect::<Vec<_>>()
		.join("/")
}
