//! Dotted-path lookup into a configuration tree.

use serde_json::{Map, Value};

/// A lookup key: an ordered list of object keys to descend through.
///
/// Built from a dotted string (`"database.host"`) or from explicit segments
/// (`["database", "host"]`), which allows keys that themselves contain dots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
	segments: Vec<String>,
}

impl KeyPath {
	/// Split a dotted string into segments. Every `.` separates two segments,
	/// so `"a..b"` has an empty middle segment.
	pub fn parse(dotted: &str) -> Self {
		Self {
			segments: dotted.split('.').map(str::to_string).collect(),
		}
	}

	pub fn segments(&self) -> &[String] {
		&self.segments
	}

	pub fn is_root(&self) -> bool {
		self.segments.is_empty()
	}
}

impl std::fmt::Display for KeyPath {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.segments.join("."))
	}
}

impl From<&str> for KeyPath {
	fn from(dotted: &str) -> Self {
		KeyPath::parse(dotted)
	}
}

impl From<&String> for KeyPath {
	fn from(dotted: &String) -> Self {
		KeyPath::parse(dotted)
	}
}

impl From<String> for KeyPath {
	fn from(dotted: String) -> Self {
		KeyPath::parse(&dotted)
	}
}

impl From<Vec<String>> for KeyPath {
	fn from(segments: Vec<String>) -> Self {
		Self { segments }
	}
}

impl From<&[&str]> for KeyPath {
	fn from(segments: &[&str]) -> Self {
		Self {
			segments: segments.iter().map(|s| s.to_string()).collect(),
		}
	}
}

impl<const N: usize> From<[&str; N]> for KeyPath {
	fn from(segments: [&str; N]) -> Self {
		Self::from(&segments[..])
	}
}

/// Walk `root` one segment at a time.
///
/// Returns `None` as soon as a segment is missing or the current node is not
/// an object. An empty path returns `root` itself.
pub fn fetch_nested_value<'a>(root: &'a Value, path: &KeyPath) -> Option<&'a Value> {
	if path.is_root() {
		return Some(root);
	}
	fetch_in_object(root.as_object()?, path)
}

/// Like [`fetch_nested_value`], starting from an object. An empty path finds nothing.
pub fn fetch_in_object<'a>(object: &'a Map<String, Value>, path: &KeyPath) -> Option<&'a Value> {
	let (first, rest) = path.segments().split_first()?;
	rest.iter()
		.try_fold(object.get(first)?, |node, segment| node.as_object()?.get(segment))
}
