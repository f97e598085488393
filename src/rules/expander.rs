use crate::config::types::{ReplaceTarget, RuleSet};
use crate::error::Result;
use crate::paths::{canonicalize, normalize};
use crate::rules::matcher::FileMatcher;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Concrete per-file decision table built from a [`RuleSet`].
///
/// Keys are canonical absolute source paths. Substitute targets are absolute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedMapping {
	entries: BTreeMap<PathBuf, ReplaceTarget>,
	configured: bool,
}

impl ExpandedMapping {
	/// Mapping for a run without any `[replace]` rules.
	pub fn unconfigured() -> Self {
		Self::default()
	}

	/// Whether replacement rules were configured at all, even if none matched.
	pub fn is_configured(&self) -> bool {
		self.configured
	}

	/// Look up a canonical source path.
	pub fn get(&self, canonical_source: &Path) -> Option<&ReplaceTarget> {
		self.entries.get(canonical_source)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &ReplaceTarget)> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Expand every pattern in `rules` against the files under `source_root`.
///
/// All patterns are resolved in one [`FileMatcher::matches_all`] call, then
/// applied in declaration order, so when two patterns match the same file the
/// later one wins. Patterns matching nothing are accepted.
pub fn expand(
	source_root: &Path,
	rules: Option<&RuleSet>,
	matcher: &dyn FileMatcher,
) -> Result<ExpandedMapping> {
	let Some(rules) = rules else {
		return Ok(ExpandedMapping::unconfigured());
	};

	let mut mapping = ExpandedMapping {
		entries: BTreeMap::new(),
		configured: true,
	};

	let patterns: Vec<&str> = rules.iter().map(|rule| rule.pattern.as_str()).collect();
	let resolved = matcher.matches_all(source_root, &patterns)?;

	for (rule, matched) in rules.iter().zip(resolved) {
		if matched.is_empty() {
			tracing::debug!(pattern = %rule.pattern, "Replace pattern matched no files");
			continue;
		}

		let target = resolve_target(source_root, &rule.target);
		tracing::debug!(
			pattern = %rule.pattern,
			matched = matched.len(),
			target = ?target,
			"Expanded replace pattern"
		);

		for file in matched {
			mapping.entries.insert(canonicalize(&file), target.clone());
		}
	}

	Ok(mapping)
}

/// Make a substitute path absolute, relative to the source root.
fn resolve_target(source_root: &Path, target: &ReplaceTarget) -> ReplaceTarget {
	match target {
		ReplaceTarget::Suppress => ReplaceTarget::Suppress,
		ReplaceTarget::Substitute(path) => {
			ReplaceTarget::Substitute(normalize(&source_root.join(path)))
		}
	}
}
