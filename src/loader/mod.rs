//! The configuration aggregator.
//!
//! A [`ConfigLoader`] is built once from [`LoaderOptions`], merging every
//! source in precedence order, and is read-only afterwards.

pub mod options;

pub use options::{DEFAULT_FILE_LIST, FileEntry, LoaderOptions};

use crate::error::Result;
use crate::merge::deep_merge;
use crate::path::{KeyPath, fetch_in_object};
use crate::source::{ConfigSource, is_reserved_key};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::ops::Index;
use std::sync::Arc;

static NULL: Value = Value::Null;

/// Merged, immutable configuration.
///
/// Clones share the same underlying tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLoader {
	root: Arc<Map<String, Value>>,
}

impl ConfigLoader {
	/// Build the merged configuration from `options`.
	///
	/// Fails on the first malformed file or unreadable directory; no partial
	/// configuration is ever returned.
	pub fn new(options: LoaderOptions) -> Result<Self> {
		Self::from_sources(&options.sources())
	}

	/// Build from the default options: `./config.json` then `./config.hjson`.
	pub fn load() -> Result<Self> {
		Self::new(LoaderOptions::default())
	}

	/// Build from an explicit list of sources, lowest precedence first.
	pub fn from_sources(sources: &[ConfigSource]) -> Result<Self> {
		let mut merged = Value::Object(Map::new());

		for source in sources {
			match source.load()? {
				Some(value) => {
					tracing::debug!(source = %source.describe(), "merging config source");
					merged = deep_merge(merged, value);
				}
				None => tracing::debug!(source = %source.describe(), "config source is absent"),
			}
		}

		let mut map = match merged {
			Value::Object(map) => map,
			_ => Map::new(),
		};
		map.retain(|key, _| !is_reserved_key(key));

		Ok(Self {
			root: Arc::new(map),
		})
	}

	/// Look up a dotted path (`"db.host"`) or segment list (`["db", "host"]`).
	///
	/// Returns `None` when any segment is missing, or for an empty segment list
	/// (use [`as_map`](Self::as_map) for the whole tree).
	pub fn fetch_value(&self, key: impl Into<KeyPath>) -> Option<&Value> {
		fetch_in_object(&self.root, &key.into())
	}

	/// Look up a path, returning `fallback` when it is missing.
	pub fn fetch_value_or(&self, key: impl Into<KeyPath>, fallback: Value) -> Value {
		self.fetch_value(key).cloned().unwrap_or(fallback)
	}

	/// Look up a path and deserialize it into `T`.
	///
	/// A value that does not fit `T` is treated like a missing one.
	pub fn get<T: DeserializeOwned>(&self, key: impl Into<KeyPath>) -> Option<T> {
		let key = key.into();
		let value = fetch_in_object(&self.root, &key)?;
		match T::deserialize(value) {
			Ok(typed) => Some(typed),
			Err(e) => {
				tracing::debug!(key = %key, error = %e, "config value has unexpected type");
				None
			}
		}
	}

	/// Typed lookup with a fallback for missing or mistyped values.
	pub fn get_or<T: DeserializeOwned>(&self, key: impl Into<KeyPath>, fallback: T) -> T {
		self.get(key).unwrap_or(fallback)
	}

	/// The merged top-level object.
	pub fn as_map(&self) -> &Map<String, Value> {
		&self.root
	}

	/// An owned copy of the merged tree.
	pub fn snapshot(&self) -> Value {
		Value::Object(self.root.as_ref().clone())
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.as_map().keys().map(String::as_str)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.as_map().contains_key(key)
	}

	pub fn is_empty(&self) -> bool {
		self.as_map().is_empty()
	}
}

impl Index<&str> for ConfigLoader {
	type Output = Value;

	/// Top-level property access. Missing keys yield `Value::Null`.
	fn index(&self, key: &str) -> &Value {
		self.root.get(key).unwrap_or(&NULL)
	}
}

impl Serialize for ConfigLoader {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		self.root.as_ref().serialize(serializer)
	}
}
