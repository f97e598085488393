use crate::config::types::{Config, ConfigFile};
use crate::error::{Result, SplitshiftError};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content =
		std::fs::read_to_string(path).map_err(|source| SplitshiftError::ConfigRead {
			path: path.to_path_buf(),
			source,
		})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let file: ConfigFile =
		toml::from_str(content).map_err(|source| SplitshiftError::ConfigParse {
			path: path.to_path_buf(),
			source,
		})?;

	Config::try_from(file)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::types::ReplaceTarget;
	use std::path::PathBuf;

	#[test]
	fn test_parse_minimal_config() {
		let content = r#"destination = "../out""#;
		let path = PathBuf::from("splitshift.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.source, PathBuf::from("."));
		assert_eq!(config.destination, PathBuf::from("../out"));
		assert!(config.replace.is_none());
	}

	#[test]
	fn test_parse_missing_destination() {
		let content = r#"source = "src""#;
		let path = PathBuf::from("splitshift.toml");
		let result = parse_config_str(content, &path);

		assert!(matches!(
			result.unwrap_err(),
			SplitshiftError::ConfigParse { .. }
		));
	}

	#[test]
	fn test_parse_unknown_key_rejected() {
		let content = r#"
destination = "out"
filemap = {}
"#;
		let path = PathBuf::from("splitshift.toml");
		assert!(parse_config_str(content, &path).is_err());
	}

	#[test]
	fn test_parse_replace_table() {
		let content = r#"
source = "repo"
destination = "mirror"

[replace]
"*.secret" = false
"config/*.yaml" = "config/default.yaml"
"#;
		let path = PathBuf::from("splitshift.toml");
		let config = parse_config_str(content, &path).unwrap();

		let rules: Vec<_> = config.replace.as_ref().unwrap().iter().collect();
		assert_eq!(rules.len(), 2);
		assert_eq!(rules[0].pattern, "*.secret");
		assert_eq!(rules[0].target, ReplaceTarget::Suppress);
		assert_eq!(rules[1].pattern, "config/*.yaml");
		assert_eq!(
			rules[1].target,
			ReplaceTarget::Substitute(PathBuf::from("config/default.yaml"))
		);
	}

	#[test]
	fn test_parse_replace_keeps_document_order() {
		let content = r#"
destination = "out"

[replace]
"zeta/**" = false
"alpha/**" = "a.txt"
"mid/*" = false
"#;
		let path = PathBuf::from("splitshift.toml");
		let config = parse_config_str(content, &path).unwrap();

		let patterns: Vec<_> = config
			.replace
			.unwrap()
			.iter()
			.map(|rule| rule.pattern.clone())
			.collect();
		assert_eq!(patterns, vec!["zeta/**", "alpha/**", "mid/*"]);
	}

	#[test]
	fn test_parse_empty_replace_table_is_configured() {
		let content = r#"
destination = "out"

[replace]
"#;
		let path = PathBuf::from("splitshift.toml");
		let config = parse_config_str(content, &path).unwrap();

		let rules = config.replace.unwrap();
		assert!(rules.is_empty());
	}

	#[test]
	fn test_parse_replace_true_rejected() {
		let content = r#"
destination = "out"

[replace]
"*.txt" = true
"#;
		let path = PathBuf::from("splitshift.toml");
		match parse_config_str(content, &path).unwrap_err() {
			SplitshiftError::InvalidReplaceTarget { pattern, reason } => {
				assert_eq!(pattern, "*.txt");
				assert!(reason.contains("boolean"));
			}
			other => panic!("Expected InvalidReplaceTarget error, got {other:?}"),
		}
	}

	#[test]
	fn test_parse_replace_empty_path_rejected() {
		let content = r#"
destination = "out"

[replace]
"*.txt" = ""
"#;
		let path = PathBuf::from("splitshift.toml");
		assert!(matches!(
			parse_config_str(content, &path).unwrap_err(),
			SplitshiftError::InvalidReplaceTarget { .. }
		));
	}
}
