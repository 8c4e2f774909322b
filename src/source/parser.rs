use crate::error::{ConfigError, Result};
use serde_json::Value;
use std::path::Path;

/// Read a listed config file, treating a missing or blank file as absent.
///
/// The parsed value must be an object: a listed file always contributes
/// top-level keys to the merged config.
pub fn read_config_file(path: &Path) -> Result<Option<Value>> {
	if !path.exists() {
		tracing::debug!(path = %path.display(), "config file not found, skipping");
		return Ok(None);
	}

	match parse_config_file(path)? {
		Some(value @ Value::Object(_)) => Ok(Some(value)),
		Some(_) => Err(ConfigError::InvalidRoot {
			path: path.to_path_buf(),
		}),
		None => Ok(None),
	}
}

/// Parse a config file from the given path.
///
/// Returns `Ok(None)` when the file contains only whitespace.
pub fn parse_config_file(path: &Path) -> Result<Option<Value>> {
	let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
		path: path.to_path_buf(),
		source,
	})?;

	if content.trim().is_empty() {
		tracing::debug!(path = %path.display(), "config file is empty, skipping");
		return Ok(None);
	}

	parse_config_str(&content, path).map(Some)
}

/// Parse Hjson (or plain JSON / JSONC) text into a value.
///
/// `path` is only used for error reporting.
pub fn parse_config_str(content: &str, path: &Path) -> Result<Value> {
	deser_hjson::from_str(content).map_err(|source| ConfigError::Parse {
		path: path.to_path_buf(),
		source,
	})
}
