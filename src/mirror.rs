//! End-to-end mirror run: enumerate, expand, copy.

use crate::config::LoadedConfig;
use crate::copy::{self, CopyReport, PlannedCopy, RunOptions};
use crate::error::Result;
use crate::git::TrackedFileLister;
use crate::rules::{FileMatcher, expand};

/// Mirror the tracked files described by `loaded`.
///
/// Enumeration and rule expansion both complete before the destination is
/// touched, so a failure in either leaves the destination unchanged.
pub fn mirror(
	loaded: &LoadedConfig,
	lister: &dyn TrackedFileLister,
	matcher: &dyn FileMatcher,
	options: RunOptions,
) -> Result<CopyReport> {
	mirror_with(loaded, lister, matcher, options, |_| {})
}

/// Like [`mirror`], calling `on_file` after each tracked file is handled.
pub fn mirror_with<F>(
	loaded: &LoadedConfig,
	lister: &dyn TrackedFileLister,
	matcher: &dyn FileMatcher,
	options: RunOptions,
	on_file: F,
) -> Result<CopyReport>
where
	F: FnMut(&PlannedCopy),
{
	let layout = &loaded.layout;

	let tracked = lister.list(&layout.source_root)?;
	let mapping = expand(&layout.source_root, loaded.config.replace.as_ref(), matcher)?;

	tracing::info!(
		tracked = tracked.len(),
		mapped = mapping.len(),
		rules_configured = mapping.is_configured(),
		"Starting mirror run"
	);

	copy::run_with(
		&layout.source_root,
		&layout.destination_root,
		&tracked,
		&mapping,
		options,
		on_file,
	)
}
