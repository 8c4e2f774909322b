use std::path::PathBuf;

/// Library-level structured errors for cfgstack.
///
/// Every variant is raised while a [`ConfigLoader`](crate::loader::ConfigLoader)
/// is being built. Lookups on a built loader never fail.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Failed to read config file: {path}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	Parse {
		path: PathBuf,
		#[source]
		source: deser_hjson::Error,
	},

	#[error("Config file does not contain an object at its root: {path}")]
	InvalidRoot { path: PathBuf },

	#[error("Config directory not found: {path}")]
	DirectoryNotFound { path: PathBuf },

	#[error("Config path is not a directory: {path}")]
	NotADirectory { path: PathBuf },

	#[error("Failed to read config directory: {path}")]
	DirectoryRead {
		path: PathBuf,
		#[source]
		source: walkdir::Error,
	},

	#[error("Invalid loader options in {path}")]
	OptionsParse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
}

/// Result type alias using ConfigError.
pub type Result<T> = std::result::Result<T, ConfigError>;
