//! Path normalization shared by rule expansion and copy lookups.
//!
//! Both sides of the expanded-mapping lookup go through [`canonicalize`], so a
//! file reached through `a/../b.txt` and through `b.txt` resolves to the same key.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` components and fold `..` into its parent.
///
/// Does not touch the filesystem and does not resolve symlinks.
pub fn normalize(path: &Path) -> PathBuf {
	let mut out = PathBuf::new();

	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				// `..` at the root stays at the root
				if !out.pop() && !out.has_root() {
					out.push("..");
				}
			}
			other => out.push(other.as_os_str()),
		}
	}

	if out.as_os_str().is_empty() {
		out.push(".");
	}

	out
}

/// Canonicalize the directories leading to a file, keeping the file's own name.
///
/// A symlinked file keeps its own path instead of resolving to its target, so a
/// link and the file it points to stay separate keys. Parent directories that
/// cannot be resolved (missing, virtual filesystem in tests) fall back to
/// [`normalize`].
pub fn canonicalize(path: &Path) -> PathBuf {
	let normalized = normalize(path);

	match (normalized.parent(), normalized.file_name()) {
		(Some(parent), Some(name)) if parent.as_os_str().is_empty() => {
			canonicalize_dir(Path::new(".")).join(name)
		}
		(Some(parent), Some(name)) => canonicalize_dir(parent).join(name),
		_ => canonicalize_dir(&normalized),
	}
}

/// Canonicalize a directory that may not exist yet.
///
/// The deepest existing ancestor is resolved on disk and the remaining
/// components are appended unchanged.
pub fn canonicalize_dir(path: &Path) -> PathBuf {
	let normalized = normalize(path);

	for ancestor in normalized.ancestors() {
		if ancestor.as_os_str().is_empty() {
			break;
		}
		let Ok(resolved) = std::fs::canonicalize(ancestor) else {
			continue;
		};
		return match normalized.strip_prefix(ancestor) {
			Ok(rest) if !rest.as_os_str().is_empty() => resolved.join(rest),
			_ => resolved,
		};
	}

	normalized
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_normalize_drops_cur_dir() {
		assert_eq!(normalize(Path::new("/a/./b/./c")), PathBuf::from("/a/b/c"));
	}

	#[test]
	fn test_normalize_folds_parent_dir() {
		assert_eq!(normalize(Path::new("/a/b/../c")), PathBuf::from("/a/c"));
		assert_eq!(normalize(Path::new("/a/b/../../c")), PathBuf::from("/c"));
	}

	#[test]
	fn test_normalize_parent_at_root() {
		assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
	}

	#[test]
	fn test_normalize_relative_keeps_leading_parent() {
		assert_eq!(normalize(Path::new("../a/./b")), PathBuf::from("../a/b"));
		assert_eq!(normalize(Path::new("./")), PathBuf::from("."));
	}

	#[test]
	fn test_canonicalize_existing_and_missing() {
		let temp_dir = tempfile::tempdir().unwrap();
		let file = temp_dir.path().join("real.txt");
		std::fs::write(&file, "x").unwrap();

		let via_parent = temp_dir.path().join("sub/../real.txt");
		std::fs::create_dir(temp_dir.path().join("sub")).unwrap();
		assert_eq!(canonicalize(&via_parent), canonicalize(&file));

		let missing = Path::new("/definitely/not/../here.txt");
		assert_eq!(canonicalize(missing), PathBuf::from("/definitely/here.txt"));
	}

	#[cfg(unix)]
	#[test]
	fn test_canonicalize_keeps_symlinked_file_name() {
		let temp_dir = tempfile::tempdir().unwrap();
		let target = temp_dir.path().join("b.secret");
		let link = temp_dir.path().join("link.txt");
		std::fs::write(&target, "x").unwrap();
		std::os::unix::fs::symlink("b.secret", &link).unwrap();

		let root = std::fs::canonicalize(temp_dir.path()).unwrap();
		assert_eq!(canonicalize(&link), root.join("link.txt"));
		assert_ne!(canonicalize(&link), canonicalize(&target));
	}

	#[cfg(unix)]
	#[test]
	fn test_canonicalize_resolves_symlinked_directory() {
		let temp_dir = tempfile::tempdir().unwrap();
		std::fs::create_dir(temp_dir.path().join("real")).unwrap();
		std::fs::write(temp_dir.path().join("real/a.txt"), "a").unwrap();
		std::os::unix::fs::symlink("real", temp_dir.path().join("alias")).unwrap();

		assert_eq!(
			canonicalize(&temp_dir.path().join("alias/a.txt")),
			canonicalize(&temp_dir.path().join("real/a.txt"))
		);
	}

	#[test]
	fn test_canonicalize_dir_missing_tail() {
		let temp_dir = tempfile::tempdir().unwrap();
		let root = std::fs::canonicalize(temp_dir.path()).unwrap();

		assert_eq!(
			canonicalize_dir(&temp_dir.path().join("not/yet/../there")),
			root.join("not/there")
		);
		assert_eq!(canonicalize_dir(temp_dir.path()), root);
	}
}
