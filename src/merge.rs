//! Deep merge of configuration values.
//!
//! Objects merge key by key, arrays concatenate, and anything else in the
//! overlay replaces the base. An explicit `null` in the overlay is a value
//! like any other scalar and replaces the base. Sources that contribute
//! nothing (missing files, for example) never reach the merge at all.

use serde_json::{Map, Value};

/// Deep merge two values, with `overlay` taking precedence over `base`.
///
/// # Example
/// ```
/// use serde_json::json;
/// use cfgstack::merge::deep_merge;
///
/// let base = json!({
///     "server": { "port": 8080, "host": "localhost" },
///     "features": ["a", "b"]
/// });
/// let overlay = json!({
///     "server": { "port": 9000 },
///     "features": ["c"]
/// });
/// let result = deep_merge(base, overlay);
/// assert_eq!(
///     result,
///     json!({
///         "server": { "port": 9000, "host": "localhost" },
///         "features": ["a", "b", "c"]
///     })
/// );
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
	match (base, overlay) {
		(Value::Object(mut base_map), Value::Object(overlay_map)) => {
			for (key, overlay_value) in overlay_map {
				merge_entry(&mut base_map, key, overlay_value);
			}
			Value::Object(base_map)
		}
		(Value::Array(mut base_items), Value::Array(overlay_items)) => {
			base_items.extend(overlay_items);
			Value::Array(base_items)
		}
		(_, overlay) => overlay,
	}
}

/// Merge `value` into `map` under `key`, deep merging with any existing entry.
pub fn merge_entry(map: &mut Map<String, Value>, key: String, value: Value) {
	let merged = match map.remove(&key) {
		Some(existing) => deep_merge(existing, value),
		None => value,
	};
	map.insert(key, merged);
}

/// Merge multiple values in order, with later values taking precedence.
///
/// Folds [`deep_merge`] over the list starting from an empty object, so the
/// result of merging objects is always an object.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
	values
		.into_iter()
		.fold(Value::Object(Map::new()), deep_merge)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_merge_simple_objects() {
		let base = json!({"a": 1, "b": 2});
		let overlay = json!({"b": 3, "c": 4});
		let result = deep_merge(base, overlay);
		assert_eq!(result, json!({"a": 1, "b": 3, "c": 4}));
	}

	#[test]
	fn test_merge_keeps_siblings() {
		let base = json!({"a": {"x": 1}});
		let overlay = json!({"a": {"y": 2}});
		let result = deep_merge(base, overlay);
		assert_eq!(result, json!({"a": {"x": 1, "y": 2}}));
	}

	#[test]
	fn test_arrays_concatenated() {
		let base = json!({"list": [1, 2]});
		let overlay = json!({"list": [3]});
		let result = deep_merge(base, overlay);
		assert_eq!(result, json!({"list": [1, 2, 3]}));
	}

	#[test]
	fn test_arrays_keep_duplicates() {
		let base = json!({"list": ["a"]});
		let overlay = json!({"list": ["a"]});
		let result = deep_merge(base, overlay);
		assert_eq!(result, json!({"list": ["a", "a"]}));
	}

	#[test]
	fn test_explicit_null_overrides_base() {
		let base = json!({"a": 1, "b": {"c": 2}});
		let overlay = json!({"a": null, "b": {"c": null}});
		let result = deep_merge(base, overlay);
		assert_eq!(result, json!({"a": null, "b": {"c": null}}));
	}

	#[test]
	fn test_null_base_is_replaced() {
		let base = json!({"a": null});
		let overlay = json!({"a": {"b": 1}});
		let result = deep_merge(base, overlay);
		assert_eq!(result, json!({"a": {"b": 1}}));
	}

	#[test]
	fn test_missing_key_in_overlay_keeps_base() {
		let base = json!({"a": 1, "b": 2});
		let overlay = json!({"b": 3});
		let result = deep_merge(base, overlay);
		assert_eq!(result["a"], json!(1));
	}

	#[test]
	fn test_deep_nested_merge() {
		let base = json!({
			"level1": {
				"level2": {
					"level3": {"a": 1, "b": 2}
				}
			}
		});
		let overlay = json!({
			"level1": {
				"level2": {
					"level3": {"b": 3, "c": 4}
				}
			}
		});
		let result = deep_merge(base, overlay);
		assert_eq!(
			result,
			json!({
				"level1": {
					"level2": {
						"level3": {"a": 1, "b": 3, "c": 4}
					}
				}
			})
		);
	}

	#[test]
	fn test_merge_all() {
		let values = vec![json!({"a": 1}), json!({"b": 2}), json!({"a": 3, "c": 4})];
		let result = deep_merge_all(values);
		assert_eq!(result, json!({"a": 3, "b": 2, "c": 4}));
	}

	#[test]
	fn test_merge_all_empty() {
		assert_eq!(deep_merge_all(Vec::new()), json!({}));
	}

	#[test]
	fn test_overlay_replaces_primitive_with_object() {
		let base = json!({"value": 42});
		let overlay = json!({"value": {"nested": true}});
		let result = deep_merge(base, overlay);
		assert_eq!(result, json!({"value": {"nested": true}}));
	}

	#[test]
	fn test_overlay_replaces_array_with_object() {
		let base = json!({"value": [1, 2]});
		let overlay = json!({"value": {"nested": true}});
		let result = deep_merge(base, overlay);
		assert_eq!(result, json!({"value": {"nested": true}}));
	}

	#[test]
	fn test_overlay_replaces_object_with_primitive() {
		let base = json!({"value": {"nested": true}});
		let overlay = json!({"value": 42});
		let result = deep_merge(base, overlay);
		assert_eq!(result, json!({"value": 42}));
	}

	#[test]
	fn test_merge_entry_inserts_and_merges() {
		let mut map = Map::new();
		merge_entry(&mut map, "db".to_string(), json!({"host": "a"}));
		merge_entry(&mut map, "db".to_string(), json!({"port": 1}));
		assert_eq!(Value::Object(map), json!({"db": {"host": "a", "port": 1}}));
	}
}
