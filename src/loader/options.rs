use crate::error::{ConfigError, Result};
use crate::source::ConfigSource;
use crate::source::parser::parse_config_file;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Files loaded when no file list is given.
pub const DEFAULT_FILE_LIST: [&str; 2] = ["./config.json", "./config.hjson"];

/// One entry of the file list: a path to load, or an object used as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FileEntry {
	Path(PathBuf),
	Raw(Value),
}

impl From<FileEntry> for ConfigSource {
	fn from(entry: FileEntry) -> Self {
		match entry {
			FileEntry::Path(path) => ConfigSource::File(path),
			FileEntry::Raw(value) => ConfigSource::Raw(value),
		}
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
	Many(Vec<Value>),
	One(Value),
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<Value>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	Ok(match OneOrMany::deserialize(deserializer)? {
		OneOrMany::Many(values) => values,
		OneOrMany::One(Value::Null) => Vec::new(),
		OneOrMany::One(value) => vec![value],
	})
}

fn default_file_list() -> Vec<FileEntry> {
	DEFAULT_FILE_LIST
		.iter()
		.map(|path| FileEntry::Path(PathBuf::from(path)))
		.collect()
}

/// Construction options for a [`ConfigLoader`](super::ConfigLoader).
///
/// Deserializes from the camelCase shape used by options files:
///
/// ```hjson
/// {
///   fileList: ["./config.json", { inline: true }]
///   default: { port: 8080 }
///   configDirList: ["./conf.d"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderOptions {
	/// Files (or raw objects) merged last, later entries winning.
	#[serde(default = "default_file_list")]
	pub file_list: Vec<FileEntry>,

	/// Lowest-precedence objects. A single object is accepted in place of a list.
	#[serde(default, deserialize_with = "one_or_many")]
	pub default: Vec<Value>,

	/// Directories scanned recursively, merged over the defaults.
	#[serde(default)]
	pub config_dir_list: Vec<PathBuf>,
}

impl Default for LoaderOptions {
	fn default() -> Self {
		Self {
			file_list: default_file_list(),
			default: Vec::new(),
			config_dir_list: Vec::new(),
		}
	}
}

impl LoaderOptions {
	/// Options with an empty file list, for building up sources explicitly.
	pub fn empty() -> Self {
		Self {
			file_list: Vec::new(),
			..Self::default()
		}
	}

	/// Load options from an Hjson or JSON file. A blank file yields the defaults.
	pub fn from_file(path: &Path) -> Result<Self> {
		let Some(value) = parse_config_file(path)? else {
			return Ok(Self::default());
		};
		serde_json::from_value(value).map_err(|source| ConfigError::OptionsParse {
			path: path.to_path_buf(),
			source,
		})
	}

	pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
		self.file_list.push(FileEntry::Path(path.into()));
		self
	}

	pub fn with_raw(mut self, value: Value) -> Self {
		self.file_list.push(FileEntry::Raw(value));
		self
	}

	pub fn with_default(mut self, value: Value) -> Self {
		self.default.push(value);
		self
	}

	pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
		self.config_dir_list.push(path.into());
		self
	}

	/// All sources in precedence order, lowest first:
	/// defaults, then scanned directories, then the file list.
	pub fn sources(&self) -> Vec<ConfigSource> {
		let defaults = self.default.iter().cloned().map(ConfigSource::Raw);
		let dirs = self.config_dir_list.iter().cloned().map(ConfigSource::Directory);
		let files = self.file_list.iter().cloned().map(ConfigSource::from);
		defaults.chain(dirs).chain(files).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use std::fs;

	#[test]
	fn test_default_options() {
		let options = LoaderOptions::default();
		assert_eq!(
			options.file_list,
			vec![
				FileEntry::Path(PathBuf::from("./config.json")),
				FileEntry::Path(PathBuf::from("./config.hjson")),
			]
		);
		assert!(options.default.is_empty());
		assert!(options.config_dir_list.is_empty());
	}

	#[test]
	fn test_deserialize_full_options() {
		let options: LoaderOptions = serde_json::from_value(json!({
			"fileList": ["./a.json", {"inline": true}],
			"default": [{"a": 1}, {"b": 2}],
			"configDirList": ["./conf.d"]
		}))
		.unwrap();

		assert_eq!(
			options.file_list,
			vec![
				FileEntry::Path(PathBuf::from("./a.json")),
				FileEntry::Raw(json!({"inline": true})),
			]
		);
		assert_eq!(options.default, vec![json!({"a": 1}), json!({"b": 2})]);
		assert_eq!(options.config_dir_list, vec![PathBuf::from("./conf.d")]);
	}

	#[test]
	fn test_deserialize_single_default() {
		let options: LoaderOptions = serde_json::from_value(json!({"default": {"a": 1}})).unwrap();

		assert_eq!(options.default, vec![json!({"a": 1})]);
		assert_eq!(options.file_list, default_file_list());
	}

	#[test]
	fn test_deserialize_null_default() {
		let options: LoaderOptions = serde_json::from_value(json!({"default": null})).unwrap();
		assert!(options.default.is_empty());
	}

	#[test]
	fn test_sources_precedence_order() {
		let options = LoaderOptions::empty()
			.with_default(json!({"d": 1}))
			.with_file("./override.json")
			.with_dir("./conf.d")
			.with_raw(json!({"r": 1}));

		assert_eq!(
			options.sources(),
			vec![
				ConfigSource::Raw(json!({"d": 1})),
				ConfigSource::Directory(PathBuf::from("./conf.d")),
				ConfigSource::File(PathBuf::from("./override.json")),
				ConfigSource::Raw(json!({"r": 1})),
			]
		);
	}

	#[test]
	fn test_from_file() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("options.hjson");
		fs::write(
			&path,
			"{\n\tfileList: [\n\t\t./override.json\n\t]\n\tconfigDirList: [\n\t\t./conf.d\n\t]\n}\n",
		)
		.unwrap();

		let options = LoaderOptions::from_file(&path).unwrap();

		assert_eq!(
			options.file_list,
			vec![FileEntry::Path(PathBuf::from("./override.json"))]
		);
		assert_eq!(options.config_dir_list, vec![PathBuf::from("./conf.d")]);
	}

	#[test]
	fn test_from_file_invalid_shape() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("options.json");
		fs::write(&path, r#"{"configDirList": 42}"#).unwrap();

		assert!(matches!(
			LoaderOptions::from_file(&path),
			Err(ConfigError::OptionsParse { .. })
		));
	}
}
