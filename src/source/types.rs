use crate::error::Result;
use crate::source::parser::read_config_file;
use crate::source::scanner::scan_directory;
use serde_json::Value;
use std::path::PathBuf;

/// File extensions picked up by the directory scanner. Matched case-sensitively.
pub const CONFIG_EXTENSIONS: [&str; 3] = ["json", "jsonc", "hjson"];

/// Keys that never appear at the top level of a merged config or in a scan result.
pub const RESERVED_KEYS: [&str; 2] = ["fetchValue", "prototype"];

/// Check if a key is reserved by the loader's accessor interface.
pub fn is_reserved_key(key: &str) -> bool {
	RESERVED_KEYS.contains(&key)
}

/// A single origin of configuration data.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
	/// An in-memory value supplied directly by the caller.
	Raw(Value),

	/// A file to parse. Missing or blank files contribute nothing.
	File(PathBuf),

	/// A directory to scan recursively. Must exist.
	Directory(PathBuf),
}

impl ConfigSource {
	/// Resolve this source into a value.
	///
	/// Returns `Ok(None)` when the source is absent: a missing or blank file,
	/// or a raw value that is not an object.
	pub fn load(&self) -> Result<Option<Value>> {
		match self {
			ConfigSource::Raw(value) => Ok(raw_object(value)),
			ConfigSource::File(path) => read_config_file(path),
			ConfigSource::Directory(path) => scan_directory(path).map(|map| Some(Value::Object(map))),
		}
	}

	/// Short human-readable description, used in logs and CLI output.
	pub fn describe(&self) -> String {
		match self {
			ConfigSource::Raw(_) => "<raw object>".to_string(),
			ConfigSource::File(path) => format!("file {}", path.display()),
			ConfigSource::Directory(path) => format!("directory {}", path.display()),
		}
	}
}

impl From<Value> for ConfigSource {
	fn from(value: Value) -> Self {
		ConfigSource::Raw(value)
	}
}

impl From<PathBuf> for ConfigSource {
	fn from(path: PathBuf) -> Self {
		ConfigSource::File(path)
	}
}

impl From<&str> for ConfigSource {
	fn from(path: &str) -> Self {
		ConfigSource::File(PathBuf::from(path))
	}
}

fn raw_object(value: &Value) -> Option<Value> {
	match value {
		Value::Object(_) => Some(value.clone()),
		Value::Null => None,
		other => {
			tracing::warn!(kind = value_kind(other), "ignoring raw config source that is not an object");
			None
		}
	}
}

/// Name of a value's JSON type, for diagnostics.
pub(crate) fn value_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_reserved_keys() {
		assert!(is_reserved_key("fetchValue"));
		assert!(is_reserved_key("prototype"));
		assert!(!is_reserved_key("fetchvalue"));
		assert!(!is_reserved_key("database"));
	}

	#[test]
	fn test_raw_object_passes_through() {
		let source = ConfigSource::Raw(json!({"a": {"b": 1}}));
		assert_eq!(source.load().unwrap(), Some(json!({"a": {"b": 1}})));
	}

	#[test]
	fn test_raw_non_object_is_absent() {
		for value in [json!(null), json!(42), json!("text"), json!(true), json!([1, 2])] {
			let source = ConfigSource::Raw(value);
			assert_eq!(source.load().unwrap(), None);
		}
	}

	#[test]
	fn test_missing_file_is_absent() {
		let source = ConfigSource::from("./does-not-exist-cfgstack.json");
		assert_eq!(source.load().unwrap(), None);
	}

	#[test]
	fn test_missing_directory_is_error() {
		let source = ConfigSource::Directory(PathBuf::from("./does-not-exist-cfgstack.d"));
		assert!(source.load().is_err());
	}

	#[test]
	fn test_describe() {
		assert_eq!(ConfigSource::Raw(json!({})).describe(), "<raw object>");
		assert_eq!(ConfigSource::from("a.json").describe(), "file a.json");
		assert_eq!(
			ConfigSource::Directory(PathBuf::from("conf.d")).describe(),
			"directory conf.d"
		);
	}
}
