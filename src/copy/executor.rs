use crate::copy::planner::{CopyDecision, decide};
use crate::copy::report::CopyReport;
use crate::error::{Result, SplitshiftError};
use crate::paths::canonicalize_dir;
use crate::rules::ExpandedMapping;
use std::path::{Path, PathBuf};

/// Knobs for a mirror run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
	/// Decide and report, but write nothing.
	pub dry_run: bool,
}

/// One tracked file and what was decided for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCopy {
	/// Repository-relative path.
	pub tracked: PathBuf,

	pub decision: CopyDecision,
}

/// Mirror `tracked_files` from `source_root` into `dest_root`.
///
/// Files are processed one at a time in list order. A tracked file missing from
/// the working tree is skipped; any directory or copy failure aborts the run,
/// leaving files already written in place.
pub fn run(
	source_root: &Path,
	dest_root: &Path,
	tracked_files: &[PathBuf],
	mapping: &ExpandedMapping,
	options: RunOptions,
) -> Result<CopyReport> {
	run_with(source_root, dest_root, tracked_files, mapping, options, |_| {})
}

/// Like [`run`], calling `on_file` after each file has been handled.
pub fn run_with<F>(
	source_root: &Path,
	dest_root: &Path,
	tracked_files: &[PathBuf],
	mapping: &ExpandedMapping,
	options: RunOptions,
	mut on_file: F,
) -> Result<CopyReport>
where
	F: FnMut(&PlannedCopy),
{
	check_roots(source_root, dest_root)?;

	let mut report = CopyReport {
		dry_run: options.dry_run,
		..Default::default()
	};

	for tracked in tracked_files {
		let source_file = source_root.join(tracked);
		let decision = decide(&source_file, mapping);

		tracing::debug!(
			file = %tracked.display(),
			decision = decision.label(),
			"Planned tracked file"
		);

		if !options.dry_run {
			let destination = dest_root.join(tracked);
			match &decision {
				CopyDecision::Verbatim => copy_file(&source_file, &destination)?,
				CopyDecision::Substitute(substitute) => copy_file(substitute, &destination)?,
				CopyDecision::Skip | CopyDecision::Missing => {}
			}
		}

		report.record(&decision);
		on_file(&PlannedCopy {
			tracked: tracked.clone(),
			decision,
		});
	}

	tracing::info!(
		copied = report.copied,
		substituted = report.substituted,
		suppressed = report.suppressed,
		missing = report.missing,
		dry_run = report.dry_run,
		"Mirror run finished"
	);

	Ok(report)
}

/// Reject a destination that is the source tree or lies inside it.
fn check_roots(source_root: &Path, dest_root: &Path) -> Result<()> {
	let source = canonicalize_dir(source_root);
	let dest = canonicalize_dir(dest_root);

	if dest.starts_with(&source) {
		return Err(SplitshiftError::OverlappingRoots {
			source_root: source,
			destination_root: dest,
		});
	}

	Ok(())
}

/// Copy `from` to `to`, creating `to`'s parent directories first.
///
/// `std::fs::copy` onto the same file truncates it, so that case is an error.
fn copy_file(from: &Path, to: &Path) -> Result<()> {
	if let Some(parent) = to.parent() {
		ensure_dir(parent)?;
	}

	if is_same_file(from, to) {
		return Err(SplitshiftError::SameFile {
			path: to.to_path_buf(),
		});
	}

	std::fs::copy(from, to).map_err(|source| SplitshiftError::CopyFailed {
		from: from.to_path_buf(),
		to: to.to_path_buf(),
		source,
	})?;

	Ok(())
}

/// Both paths exist and resolve to the same file on disk.
fn is_same_file(from: &Path, to: &Path) -> bool {
	match (std::fs::canonicalize(from), std::fs::canonicalize(to)) {
		(Ok(from), Ok(to)) => from == to,
		_ => false,
	}
}

/// Create a directory chain; an existing directory counts as success.
fn ensure_dir(dir: &Path) -> Result<()> {
	match std::fs::create_dir_all(dir) {
		Ok(()) => Ok(()),
		Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
		Err(source) => Err(SplitshiftError::CreateDir {
			path: dir.to_path_buf(),
			source,
		}),
	}
}
