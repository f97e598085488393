use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use splitshift::config::{
	DEFAULT_CONFIG_FILE, LoadedConfig, ReplaceTarget, load_config, resolve_config_path,
};
use splitshift::copy::{CopyDecision, PlannedCopy, RunOptions};
use splitshift::git::{DEFAULT_REVISION, GitLsTree};
use splitshift::mirror_with;
use splitshift::rules::{GlobFileMatcher, expand};

#[derive(Parser)]
#[command(name = "splitshift")]
#[command(
	author,
	version,
	about = "Mirror the tracked files of a git tree into another directory with glob-keyed substitutions"
)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Config file to use instead of ./splitshift.toml
	#[arg(short, long, value_name = "PATH", global = true)]
	config: Option<PathBuf>,

	/// Print what would be copied without writing anything
	#[arg(long)]
	dry_run: bool,

	/// Revision whose tracked files are mirrored
	#[arg(long, value_name = "REV", default_value = DEFAULT_REVISION)]
	revision: String,

	/// Enable debug logging (RUST_LOG takes precedence)
	#[arg(short, long, global = true)]
	verbose: bool,

	/// Create a template splitshift.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing splitshift.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display resolved roots, rules and the expanded mapping
	Show,
	/// Check the config file and its patterns without copying anything
	Validate,
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_tracing(verbose: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::registry()
		.with(fmt::layer().with_writer(std::io::stderr))
		.with(filter)
		.init();
}

fn run(cli: Cli) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	if cli.init {
		return handle_init(&cwd, cli.force);
	}

	if let Some(command) = cli.command {
		return match command {
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(&cwd, cli.config.as_deref()),
				ConfigAction::Validate => handle_config_validate(&cwd, cli.config.as_deref()),
			},
		};
	}

	handle_mirror(&cwd, cli.config.as_deref(), &cli.revision, cli.dry_run)
}

fn handle_init(cwd: &Path, force: bool) -> Result<ExitCode> {
	let config_path = cwd.join(DEFAULT_CONFIG_FILE);

	if config_path.exists() && !force {
		anyhow::bail!("{DEFAULT_CONFIG_FILE} already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {DEFAULT_CONFIG_FILE}");
	Ok(ExitCode::SUCCESS)
}

fn init_template() -> &'static str {
	r#"# splitshift configuration
#
# Paths are relative to the directory containing this file.

# Tree whose tracked files are mirrored (defaults to ".")
source = "."

# Where the mirror is written; created if missing
destination = "../mirror"

# Glob patterns, relative to `source`, applied in order. Later patterns win.
#   false         leave matching files out of the mirror
#   "some/path"   write this file's bytes in place of each match
[replace]
# "**/*.secret" = false
# "config/*.yaml" = "config/default.yaml"
"#
}

fn handle_mirror(
	cwd: &Path,
	config_override: Option<&Path>,
	revision: &str,
	dry_run: bool,
) -> Result<ExitCode> {
	// No config is a quiet no-op
	let Some(loaded) = load_config(cwd, config_override).context("Failed to load configuration")?
	else {
		return Ok(ExitCode::SUCCESS);
	};

	let lister = GitLsTree::new(revision);
	let options = RunOptions { dry_run };

	let report = mirror_with(&loaded, &lister, &GlobFileMatcher, options, |planned| {
		if dry_run {
			print_planned(planned);
		}
	})
	.with_context(|| {
		format!(
			"Failed to mirror {} into {}",
			loaded.layout.source_root.display(),
			loaded.layout.destination_root.display()
		)
	})?;

	println!("{report}");
	Ok(ExitCode::SUCCESS)
}

fn print_planned(planned: &PlannedCopy) {
	match &planned.decision {
		CopyDecision::Substitute(from) => println!(
			"{:<10} {} <- {}",
			planned.decision.label(),
			planned.tracked.display(),
			from.display()
		),
		decision => println!("{:<10} {}", decision.label(), planned.tracked.display()),
	}
}

fn handle_config_show(cwd: &Path, config_override: Option<&Path>) -> Result<ExitCode> {
	let Some(loaded) = load_config(cwd, config_override).context("Failed to load configuration")?
	else {
		println!(
			"No configuration file found at {}",
			resolve_config_path(cwd, config_override).display()
		);
		return Ok(ExitCode::SUCCESS);
	};

	println!("# Source: {}", loaded.layout.config_path.display());
	println!("# source root: {}", loaded.layout.source_root.display());
	println!(
		"# destination root: {}",
		loaded.layout.destination_root.display()
	);

	match loaded.config.replace {
		None => println!("# replace: (not configured)"),
		Some(ref rules) => {
			println!("# replace: {} rules", rules.len());
			println!();
			for (i, rule) in rules.iter().enumerate() {
				println!("  Rule {}: {} => {}", i + 1, rule.pattern, describe(&rule.target));
			}
		}
	}

	let mapping = expand(
		&loaded.layout.source_root,
		loaded.config.replace.as_ref(),
		&GlobFileMatcher,
	)
	.context("Failed to expand replace patterns")?;

	if mapping.is_configured() {
		println!();
		println!("Expanded mapping ({} files):", mapping.len());
		for (file, target) in mapping.iter() {
			println!(
				"  {} => {}",
				display_relative(&loaded, file).display(),
				describe(target)
			);
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(cwd: &Path, config_override: Option<&Path>) -> Result<ExitCode> {
	let loaded = match load_config(cwd, config_override) {
		Ok(Some(loaded)) => loaded,
		Ok(None) => {
			println!("No configuration file found.");
			return Ok(ExitCode::SUCCESS);
		}
		Err(e) => {
			eprintln!("Configuration error: {e}");
			return Ok(ExitCode::FAILURE);
		}
	};

	match expand(
		&loaded.layout.source_root,
		loaded.config.replace.as_ref(),
		&GlobFileMatcher,
	) {
		Ok(mapping) => {
			println!(
				"Configuration is valid: {} ({} rules, {} files mapped)",
				loaded.layout.config_path.display(),
				loaded.config.replace.as_ref().map_or(0, |rules| rules.len()),
				mapping.len()
			);
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {e}");
			Ok(ExitCode::FAILURE)
		}
	}
}

fn describe(target: &ReplaceTarget) -> String {
	match target {
		ReplaceTarget::Suppress => "(suppressed)".to_string(),
		ReplaceTarget::Substitute(path) => path.display().to_string(),
	}
}

/// Show mapping keys relative to the source root when possible.
fn display_relative<'a>(loaded: &LoadedConfig, file: &'a Path) -> &'a Path {
	let root = splitshift::paths::canonicalize(&loaded.layout.source_root);
	file.strip_prefix(&root).unwrap_or(file)
}
