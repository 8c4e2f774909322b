//! Configuration sources for cfgstack.
//!
//! This module handles:
//! - Hjson/JSON/JSONC file parsing
//! - Recursive directory scanning into nested objects
//! - Resolving a single source into an optional value

pub mod parser;
pub mod scanner;
pub mod types;

pub use parser::{parse_config_file, parse_config_str, read_config_file};
pub use scanner::scan_directory;
pub use types::{CONFIG_EXTENSIONS, ConfigSource, RESERVED_KEYS, is_reserved_key};
