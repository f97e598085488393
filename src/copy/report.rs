//! Copy run counters.

use crate::copy::planner::CopyDecision;
use std::fmt;

/// Aggregate counters for one mirror run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopyReport {
	/// Tracked files copied with their own bytes.
	pub copied: u64,
	/// Tracked files written from a substitute.
	pub substituted: u64,
	/// Tracked files suppressed by a rule.
	pub suppressed: u64,
	/// Tracked files absent from the working tree.
	pub missing: u64,
	/// Whether this run only planned and wrote nothing.
	pub dry_run: bool,
}

impl CopyReport {
	pub(crate) fn record(&mut self, decision: &CopyDecision) {
		match decision {
			CopyDecision::Verbatim => self.copied += 1,
			CopyDecision::Substitute(_) => self.substituted += 1,
			CopyDecision::Skip => self.suppressed += 1,
			CopyDecision::Missing => self.missing += 1,
		}
	}

	/// Number of tracked files considered.
	pub fn total(&self) -> u64 {
		self.copied + self.substituted + self.suppressed + self.missing
	}

	/// Number of destination files written (or that would be, in a dry run).
	pub fn written(&self) -> u64 {
		self.copied + self.substituted
	}
}

impl fmt::Display for CopyReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let prefix = if self.dry_run { "[dry-run]" } else { "[mirror]" };
		write!(
			f,
			"{prefix} tracked={} copied={} substituted={} suppressed={} missing={}",
			self.total(),
			self.copied,
			self.substituted,
			self.suppressed,
			self.missing
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	#[test]
	fn test_record_and_display() {
		let mut report = CopyReport::default();
		report.record(&CopyDecision::Verbatim);
		report.record(&CopyDecision::Verbatim);
		report.record(&CopyDecision::Substitute(PathBuf::from("/s")));
		report.record(&CopyDecision::Skip);
		report.record(&CopyDecision::Missing);

		assert_eq!(report.total(), 5);
		assert_eq!(report.written(), 3);
		assert_eq!(
			report.to_string(),
			"[mirror] tracked=5 copied=2 substituted=1 suppressed=1 missing=1"
		);
	}

	#[test]
	fn test_dry_run_prefix() {
		let report = CopyReport {
			dry_run: true,
			..Default::default()
		};
		assert!(report.to_string().starts_with("[dry-run] tracked=0"));
	}
}
