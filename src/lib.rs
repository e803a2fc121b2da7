// Declare the core module, which exposes the recode, rename and merge batch operations
pub mod core;

// Declare the file_utils module, which lists directories and filters entries by suffix
pub mod file_utils;

// Declare the encoding module, which resolves encoding names and converts file contents
pub mod encoding;

// Declare the renamer module, which computes zero-padded names and moves entries
pub mod renamer;

// Declare the merger module, which concatenates entries into one output file
pub mod merger;

// Declare the cli module, which defines the command-line interface
pub mod cli;

// Declare the commands module, which turns parsed arguments into batch operations
pub mod commands;

// Declare the config module, which handles configuration management
pub mod config;

// Declare the progress module, which tracks and displays progress information
pub mod progress;

// Declare the logging module, which handles logging of messages and errors
pub mod logging;

// Declare the errors module, which contains custom error types
pub mod errors;

pub use crate::core::FileOps;
pub use crate::encoding::EncodingConverter;
pub use crate::errors::{ConfigError, FileOpsError, FileOpsResult};
pub use crate::file_utils::{DirectoryEntry, FileUtils, ListOrder};
