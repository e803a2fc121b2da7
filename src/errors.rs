use std::path::PathBuf;
use thiserror::Error;

/// Type alias for Result with FileOpsError as the error type
pub type FileOpsResult<T> = Result<T, FileOpsError>;

/// Error types for the batch directory operations
///
/// Every variant that concerns a file carries its path so a failed batch
/// reports which entry stopped it.
#[derive(Error, Debug)]
pub enum FileOpsError {
    /// The source path does not exist
    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The path exists but is not a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The encoding name is unknown, or cannot be used for writing
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// Underlying read/write/open failure
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is malformed for the declared source encoding
    #[error("Invalid {encoding} data in file {}", path.display())]
    Decode { path: PathBuf, encoding: String },

    /// Text contains characters the target encoding cannot represent
    #[error("Content of {} cannot be represented in {encoding}", path.display())]
    Unmappable { path: PathBuf, encoding: String },

    /// Relocation of an entry during rename could not be completed
    #[error("Failed to move {} to {}: {reason}", from.display(), to.display())]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    /// Configuration related errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl FileOpsError {
    /// Wrap an IO error together with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FileOpsError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Specific errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unsupported encoding in config field `{field}`: {name}")]
    InvalidEncoding { field: &'static str, name: String },

    #[error("Config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Output directory is not writable: {}", .0.display())]
    OutputDirectoryNotWritable(PathBuf),

    #[error("Invalid configuration format: {0}")]
    InvalidFormat(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl From<dialoguer::Error> for ConfigError {
    fn from(err: dialoguer::Error) -> Self {
        ConfigError::Prompt(err.to_string())
    }
}

impl From<serde_json::Error> for FileOpsError {
    fn from(err: serde_json::Error) -> Self {
        FileOpsError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}
