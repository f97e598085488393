use crate::config::parser::parse_config_file;
use crate::config::types::{Config, Layout};
use crate::error::Result;
use crate::paths::normalize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when no override is given.
pub const DEFAULT_CONFIG_FILE: &str = "splitshift.toml";

/// A parsed config together with the roots it resolves to.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	pub config: Config,

	pub layout: Layout,
}

/// Resolve the config file path.
///
/// An override is taken relative to `cwd` (absolute overrides are kept as-is);
/// otherwise [`DEFAULT_CONFIG_FILE`] in `cwd` is used.
pub fn resolve_config_path(cwd: &Path, override_path: Option<&Path>) -> PathBuf {
	let path = match override_path {
		Some(path) => cwd.join(path),
		None => cwd.join(DEFAULT_CONFIG_FILE),
	};
	normalize(&path)
}

/// Locate, parse and resolve the config.
///
/// Returns `Ok(None)` when no config file exists at the resolved location.
pub fn load_config(cwd: &Path, override_path: Option<&Path>) -> Result<Option<LoadedConfig>> {
	let config_path = resolve_config_path(cwd, override_path);

	if !config_path.is_file() {
		tracing::debug!(path = %config_path.display(), "No config file found");
		return Ok(None);
	}

	let config = parse_config_file(&config_path)?;
	let layout = Layout::from_config(&config_path, &config);

	tracing::debug!(
		config = %config_path.display(),
		source = %layout.source_root.display(),
		destination = %layout.destination_root.display(),
		"Configuration loaded"
	);

	Ok(Some(LoadedConfig { config, layout }))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	#[test]
	fn test_resolve_default_path() {
		let path = resolve_config_path(Path::new("/work/repo"), None);
		assert_eq!(path, PathBuf::from("/work/repo/splitshift.toml"));
	}

	#[test]
	fn test_resolve_relative_override() {
		let path = resolve_config_path(Path::new("/work/repo"), Some(Path::new("../cfg/x.toml")));
		assert_eq!(path, PathBuf::from("/work/cfg/x.toml"));
	}

	#[test]
	fn test_resolve_absolute_override() {
		let path = resolve_config_path(Path::new("/work/repo"), Some(Path::new("/etc/split.toml")));
		assert_eq!(path, PathBuf::from("/etc/split.toml"));
	}

	#[test]
	fn test_load_config_missing_is_none() {
		let temp_dir = tempfile::tempdir().unwrap();
		let loaded = load_config(temp_dir.path(), None).unwrap();
		assert!(loaded.is_none());
	}

	#[test]
	fn test_load_config_resolves_roots_against_config_dir() {
		let temp_dir = tempfile::tempdir().unwrap();
		let cfg_dir = temp_dir.path().join("cfg");
		fs::create_dir(&cfg_dir).unwrap();
		fs::write(
			cfg_dir.join("split.toml"),
			r#"
source = "../repo"
destination = "../mirror"
"#,
		)
		.unwrap();

		let loaded = load_config(temp_dir.path(), Some(Path::new("cfg/split.toml")))
			.unwrap()
			.unwrap();

		assert_eq!(loaded.layout.source_root, temp_dir.path().join("repo"));
		assert_eq!(
			loaded.layout.destination_root,
			temp_dir.path().join("mirror")
		);
		assert_eq!(loaded.layout.config_path, cfg_dir.join("split.toml"));
	}

	#[test]
	fn test_load_config_default_source_is_config_dir() {
		let temp_dir = tempfile::tempdir().unwrap();
		fs::write(
			temp_dir.path().join(DEFAULT_CONFIG_FILE),
			r#"destination = "out""#,
		)
		.unwrap();

		let loaded = load_config(temp_dir.path(), None).unwrap().unwrap();
		assert_eq!(loaded.layout.source_root, temp_dir.path());
		assert_eq!(loaded.layout.destination_root, temp_dir.path().join("out"));
	}

	#[test]
	fn test_load_config_parse_error_propagates() {
		let temp_dir = tempfile::tempdir().unwrap();
		fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILE), "invalid toml [[[").unwrap();

		assert!(load_config(temp_dir.path(), None).is_err());
	}
}
