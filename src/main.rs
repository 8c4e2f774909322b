use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cfgstack::loader::{ConfigLoader, LoaderOptions};
use cfgstack::source::{parse_config_str, scan_directory};

#[derive(Parser)]
#[command(name = "cfgstack")]
#[command(
	author,
	version,
	about = "Merge layered Hjson/JSON configuration files and directories"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Load loader options (fileList, default, configDirList) from an Hjson/JSON file
	#[arg(long, global = true, value_name = "PATH")]
	options: Option<PathBuf>,

	/// Config file to merge; repeatable, later files win
	#[arg(short, long = "file", global = true, value_name = "PATH")]
	files: Vec<PathBuf>,

	/// Config directory to scan recursively; repeatable
	#[arg(short, long = "dir", global = true, value_name = "PATH")]
	dirs: Vec<PathBuf>,

	/// Default values as an inline Hjson/JSON object; repeatable
	#[arg(long = "default", global = true, value_name = "OBJECT")]
	defaults: Vec<String>,

	/// Increase log verbosity (-v debug, -vv trace); CFGSTACK_LOG overrides
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Print the merged configuration as JSON
	Show {
		/// Print on a single line
		#[arg(long)]
		compact: bool,
	},
	/// Print the value at a dotted key path
	Get {
		/// Dotted key path, e.g. database.host
		key: String,

		/// Value printed when the key is missing (JSON, or a plain string)
		#[arg(long)]
		fallback: Option<String>,

		/// Print strings without JSON quoting
		#[arg(long)]
		raw: bool,
	},
	/// Check that all configured sources load without errors
	Validate,
	/// Print the scan result of a single directory
	Scan {
		/// Directory to scan
		dir: PathBuf,
	},
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_logging(verbose: u8) {
	let default_level = match verbose {
		0 => "warn",
		1 => "debug",
		_ => "trace",
	};
	let filter =
		EnvFilter::try_from_env("CFGSTACK_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn run(cli: Cli) -> Result<ExitCode> {
	match &cli.command {
		Commands::Show { compact } => handle_show(&cli, *compact),
		Commands::Get { key, fallback, raw } => handle_get(&cli, key, fallback.as_deref(), *raw),
		Commands::Validate => handle_validate(&cli),
		Commands::Scan { dir } => handle_scan(dir),
	}
}

/// Assemble loader options from `--options` and the source flags.
///
/// Flags append to whatever the options file declares. Without an options
/// file, explicit `--file` flags replace the default file list.
fn build_options(cli: &Cli) -> Result<LoaderOptions> {
	let mut options = match &cli.options {
		Some(path) => LoaderOptions::from_file(path)
			.with_context(|| format!("Failed to load options from {}", path.display()))?,
		None if !cli.files.is_empty() => LoaderOptions::empty(),
		None => LoaderOptions::default(),
	};

	for raw in &cli.defaults {
		let value = parse_config_str(raw, Path::new("--default"))
			.with_context(|| format!("Invalid --default value: {raw}"))?;
		options = options.with_default(value);
	}
	for dir in &cli.dirs {
		options = options.with_dir(dir);
	}
	for file in &cli.files {
		options = options.with_file(file);
	}

	Ok(options)
}

fn load_config(cli: &Cli) -> Result<ConfigLoader> {
	let options = build_options(cli)?;
	ConfigLoader::new(options).context("Failed to load configuration")
}

fn handle_show(cli: &Cli, compact: bool) -> Result<ExitCode> {
	let config = load_config(cli)?;
	println!("{}", render(&config, compact)?);
	Ok(ExitCode::SUCCESS)
}

fn handle_get(cli: &Cli, key: &str, fallback: Option<&str>, raw: bool) -> Result<ExitCode> {
	let config = load_config(cli)?;

	let value = match (config.fetch_value(key), fallback) {
		(Some(value), _) => value.clone(),
		(None, Some(fallback)) => parse_fallback(fallback),
		(None, None) => {
			eprintln!("Key not found: {key}");
			return Ok(ExitCode::FAILURE);
		}
	};

	match value {
		Value::String(s) if raw => println!("{s}"),
		other => println!("{}", render(&other, false)?),
	}
	Ok(ExitCode::SUCCESS)
}

fn handle_validate(cli: &Cli) -> Result<ExitCode> {
	let options = build_options(cli)?;
	let sources = options.sources();

	match ConfigLoader::new(options) {
		Ok(config) => {
			println!("Configuration is valid:");
			for source in &sources {
				println!("  {}", source.describe());
			}
			println!("{} top-level keys", config.keys().count());
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {:#}", anyhow::Error::from(e));
			Ok(ExitCode::FAILURE)
		}
	}
}

fn handle_scan(dir: &Path) -> Result<ExitCode> {
	let scanned =
		scan_directory(dir).with_context(|| format!("Failed to scan {}", dir.display()))?;
	println!("{}", render(&scanned, false)?);
	Ok(ExitCode::SUCCESS)
}

/// Interpret a `--fallback` argument as JSON, or as a plain string if it isn't.
fn parse_fallback(raw: &str) -> Value {
	serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn render(value: &impl Serialize, compact: bool) -> Result<String> {
	let rendered = if compact {
		serde_json::to_string(value)?
	} else {
		serde_json::to_string_pretty(value)?
	};
	Ok(rendered)
}
