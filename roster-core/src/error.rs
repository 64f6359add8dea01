//! Error types for roster-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load — includes file path and line context.
    #[error("failed to parse configuration at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A sheet mapping references a channel with no channel→team mapping.
    #[error("sheet mapping for channel {channel} has no channel→team mapping")]
    DanglingSheetMapping { channel: String },
}
