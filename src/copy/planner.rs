use crate::config::types::ReplaceTarget;
use crate::paths::canonicalize;
use crate::rules::ExpandedMapping;
use std::path::{Path, PathBuf};

/// What happens to one tracked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyDecision {
	/// Copy the tracked file's own bytes.
	Verbatim,

	/// Copy this file's bytes to the tracked file's destination.
	Substitute(PathBuf),

	/// Suppressed by a rule; nothing is written.
	Skip,

	/// Tracked but absent from the working tree; nothing is written.
	Missing,
}

impl CopyDecision {
	/// Short label used in dry-run output and logs.
	pub fn label(&self) -> &'static str {
		match self {
			CopyDecision::Verbatim => "copy",
			CopyDecision::Substitute(_) => "substitute",
			CopyDecision::Skip => "skip",
			CopyDecision::Missing => "missing",
		}
	}
}

/// Decide what to do with `source_file` (absolute, `source_root` joined with
/// the tracked path).
pub fn decide(source_file: &Path, mapping: &ExpandedMapping) -> CopyDecision {
	if !source_file.exists() {
		return CopyDecision::Missing;
	}

	match mapping.get(&canonicalize(source_file)) {
		None => CopyDecision::Verbatim,
		Some(ReplaceTarget::Suppress) => CopyDecision::Skip,
		Some(ReplaceTarget::Substitute(path)) => CopyDecision::Substitute(path.clone()),
	}
}
