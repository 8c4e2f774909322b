use crate::error::{ConfigError, Result};
use crate::merge::merge_entry;
use crate::source::parser::parse_config_file;
use crate::source::types::{CONFIG_EXTENSIONS, is_reserved_key};
use serde_json::{Map, Value};
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Recursively scan a directory into a nested object.
///
/// Each `.json`, `.jsonc` or `.hjson` file becomes an entry keyed by its file
/// stem, holding the file's parsed contents. Each subdirectory becomes an
/// entry keyed by its full name, holding the scan of that subdirectory.
/// Other files are ignored.
///
/// Entries are visited in file name order, so colliding keys (for example
/// `db/` and `db.json`) always merge the same way: the directory first, then
/// the files in name order on top of it.
pub fn scan_directory(dir: &Path) -> Result<Map<String, Value>> {
	if !dir.exists() {
		return Err(ConfigError::DirectoryNotFound {
			path: dir.to_path_buf(),
		});
	}
	if !dir.is_dir() {
		return Err(ConfigError::NotADirectory {
			path: dir.to_path_buf(),
		});
	}

	tracing::debug!(path = %dir.display(), "scanning config directory");

	let walker = WalkDir::new(dir)
		.min_depth(1)
		.follow_links(true)
		.sort_by_file_name()
		.into_iter()
		.filter_entry(|entry| !entry.file_type().is_dir() || directory_key(entry).is_some());

	let mut root = Map::new();
	// Keys of the directories enclosing the current entry, outermost first.
	let mut ancestors: Vec<String> = Vec::new();

	for entry in walker {
		let entry = match entry {
			Ok(entry) => entry,
			Err(err) if is_ignored_dangling_link(&err) => {
				tracing::trace!(path = ?err.path(), "skipping dangling symlink");
				continue;
			}
			Err(source) => {
				return Err(ConfigError::DirectoryRead {
					path: dir.to_path_buf(),
					source,
				});
			}
		};
		ancestors.truncate(entry.depth() - 1);

		if entry.file_type().is_dir() {
			let Some(key) = directory_key(&entry) else {
				continue;
			};
			let Some(parent) = object_at(&mut root, &ancestors) else {
				continue;
			};
			merge_entry(parent, key.clone(), Value::Object(Map::new()));
			ancestors.push(key);
			continue;
		}

		if !entry.file_type().is_file() {
			continue;
		}

		let Some(key) = file_key(entry.file_name()) else {
			tracing::trace!(path = %entry.path().display(), "skipping unrecognized file");
			continue;
		};
		if is_reserved_key(&key) {
			tracing::debug!(path = %entry.path().display(), key = %key, "skipping reserved key");
			continue;
		}

		let Some(value) = parse_config_file(entry.path())? else {
			continue;
		};
		tracing::trace!(path = %entry.path().display(), key = %key, "loaded scanned config file");

		let Some(parent) = object_at(&mut root, &ancestors) else {
			continue;
		};
		merge_entry(parent, key, value);
	}

	Ok(root)
}

/// Key for a subdirectory, or `None` if the directory must be skipped.
fn directory_key(entry: &DirEntry) -> Option<String> {
	let name = entry.file_name().to_str()?;
	if is_reserved_key(name) {
		tracing::debug!(path = %entry.path().display(), "skipping reserved directory");
		return None;
	}
	Some(name.to_string())
}

/// Key for a file with a recognized extension: the file name without it.
///
/// A dotfile such as `.json` has no extension, only a stem, so it gets no key.
fn file_key(name: &OsStr) -> Option<String> {
	let name = Path::new(name);
	let extension = name.extension()?.to_str()?;
	if !CONFIG_EXTENSIONS.contains(&extension) {
		return None;
	}
	name.file_stem()?.to_str().map(str::to_string)
}

/// A symlink whose target is gone and whose name would be skipped anyway.
///
/// Dangling links named like config files stay fatal.
fn is_ignored_dangling_link(err: &walkdir::Error) -> bool {
	let Some(path) = err.path() else {
		return false;
	};
	err.depth() > 0
		&& err
			.io_error()
			.is_some_and(|io| io.kind() == ErrorKind::NotFound)
		&& path
			.symlink_metadata()
			.is_ok_and(|meta| meta.file_type().is_symlink())
		&& path.file_name().is_none_or(|name| file_key(name).is_none())
}

/// The object at `path` below `root`, if every step is an object.
///
/// Directory entries are inserted as objects before their contents are
/// visited, so enclosing directories always resolve.
fn object_at<'a>(
	root: &'a mut Map<String, Value>,
	path: &[String],
) -> Option<&'a mut Map<String, Value>> {
	path.iter()
		.try_fold(root, |map, key| map.get_mut(key)?.as_object_mut())
}
