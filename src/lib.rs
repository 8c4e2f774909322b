//! cfgstack - layered configuration loading for Hjson/JSON config files.
//!
//! This library provides:
//! - Hjson, JSON and JSONC file parsing into untyped values
//! - Recursive directory scanning into nested objects
//! - Deep merging of sources in a fixed precedence order
//! - Dotted-path lookup with fallbacks on the merged result
//!
//! Precedence, lowest first: `default` objects, then scanned directories,
//! then the file list in order.
//!
//! # Example
//!
//! ```no_run
//! use cfgstack::loader::{ConfigLoader, LoaderOptions};
//! use serde_json::json;
//!
//! let options = LoaderOptions::default()
//!     .with_default(json!({"db": {"host": "localhost", "port": 5432}}))
//!     .with_dir("./conf.d");
//! let config = ConfigLoader::new(options).unwrap();
//!
//! let host = config.fetch_value_or("db.host", json!("127.0.0.1"));
//! let port: u16 = config.get_or("db.port", 5432);
//! println!("connecting to {host}:{port}");
//! ```

pub mod error;
pub mod loader;
pub mod merge;
pub mod path;
pub mod source;

pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, LoaderOptions};
pub use path::KeyPath;
