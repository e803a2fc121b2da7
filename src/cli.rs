// ============================================================================
// CLI Module - Command-Line Interface Definitions
//
// Defines the command-line interface for rustfileops using clap derive
// macros: one subcommand per batch operation plus configuration helpers.
// ============================================================================

use clap::{Parser, Subcommand}; // Command-line parsing with derive macros
use log::LevelFilter; // Logging level configuration
use std::path::PathBuf; // Cross-platform file path handling

/// rustfileops - batch operations on the files of one directory
///
/// Re-encode text files, rename files to their zero-padded numeric suffix,
/// or concatenate a directory's text files into one file. Only the immediate
/// entries of a directory are processed, never subdirectories' contents.
#[derive(Parser)]
#[command(
    name = "rustfileops",
    about = "Batch re-encode, rename and merge the files of a directory",
    version,
    after_help = "Examples:\n  \
                  rustfileops recode ./subs --suffix .srt --from GBK --to UTF-8\n  \
                  rustfileops rename ./scans ./pages\n  \
                  rustfileops merge ./chapters ./book.txt --sort\n  \
                  rustfileops generate-config rustfileops.json"
)]
pub struct Cli {
    /// Increase verbosity level (can be used multiple times)
    #[arg(
        global = true,
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v: debug, -vv: trace)"
    )]
    verbose: u8,

    /// Set the logging level explicitly
    #[arg(
        global = true,
        long,
        value_name = "LEVEL",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"],
        ignore_case = true,
        help = "Set log level explicitly"
    )]
    log_level: Option<String>,

    /// Also append log lines to this file
    #[arg(global = true, long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Also append error lines to this file
    #[arg(global = true, long, value_name = "FILE")]
    pub error_file: Option<PathBuf>,

    /// Never draw progress bars
    #[arg(global = true, long)]
    pub no_progress: bool,

    /// The operation to perform
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for different operations
#[derive(Subcommand)]
pub enum Commands {
    /// Re-encode files ending with a suffix, in place
    #[command(
        long_about = "Decode every file in DIR whose name ends with SUFFIX using the source \
                      encoding and rewrite it in the target encoding. Leading and trailing \
                      blanks are trimmed. Both encodings are checked before any file is \
                      touched; the first failing file aborts the batch."
    )]
    Recode(RecodeArgs),

    /// Move files to their zero-padded suffix after the last underscore
    #[command(
        long_about = "For every entry of SRC take the part after the last '_', pad it with \
                      zeros to three characters and move the entry into DEST under that name \
                      (x_1 -> 001, x_22 -> 022, x_333 -> 333). Existing files in DEST are \
                      never overwritten."
    )]
    Rename(RenameArgs),

    /// Concatenate the files of a directory into one UTF-8 file
    #[command(
        long_about = "Read every entry of SRC as UTF-8, trim it, and append it to DEST \
                      without separators. DEST is overwritten, so running twice gives the \
                      same result."
    )]
    Merge(MergeArgs),

    /// Generate a JSON configuration file template
    GenerateConfig(GenerateConfigArgs),

    /// Run interactive guided setup for a configuration file
    GuidedSetup(GuidedSetupArgs),
}

// Arguments for the recode command
#[derive(Parser, Clone, Debug)]
pub struct RecodeArgs {
    #[arg(help = "Directory whose files are re-encoded", value_name = "DIR")]
    pub dir: PathBuf,

    #[arg(short = 's', long, help = "Only files whose name ends with this (e.g. .txt)")]
    pub suffix: Option<String>,

    #[arg(short = 'f', long = "from", help = "Source encoding (e.g. GBK)", value_name = "ENCODING")]
    pub from_encoding: Option<String>,

    #[arg(short = 't', long = "to", help = "Target encoding (e.g. UTF-8)", value_name = "ENCODING")]
    pub to_encoding: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

// Arguments for the rename command
#[derive(Parser, Clone, Debug)]
pub struct RenameArgs {
    #[arg(help = "Directory holding the files to rename", value_name = "SRC")]
    pub src: PathBuf,

    #[arg(help = "Directory receiving the renamed files", value_name = "DEST")]
    pub dest: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

// Arguments for the merge command
#[derive(Parser, Clone, Debug)]
pub struct MergeArgs {
    #[arg(help = "Directory holding the files to merge", value_name = "SRC")]
    pub src: PathBuf,

    #[arg(help = "Output file, overwritten", value_name = "DEST_FILE")]
    pub dest: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

// Options shared by the three batch operations
#[derive(Parser, Clone, Debug)]
pub struct CommonArgs {
    #[arg(long, help = "Process entries sorted by name instead of file system order")]
    pub sort: bool,

    #[arg(
        short = 'c',
        long = "config",
        help = "JSON configuration file with default settings",
        value_name = "FILE"
    )]
    pub config: Option<PathBuf>,
}

// Arguments for the generate-config command
#[derive(Parser, Clone, Debug)]
pub struct GenerateConfigArgs {
    #[arg(help = "Destination path for configuration file", value_name = "FILE")]
    pub output: PathBuf,
}

// Arguments for the guided-setup command
#[derive(Parser, Clone, Debug)]
pub struct GuidedSetupArgs {
    #[arg(help = "Destination path for interactive configuration", value_name = "FILE")]
    pub output: PathBuf,
}

impl Cli {
    // An explicit --log-level wins over -v flags
    pub fn log_level(&self) -> LevelFilter {
        if let Some(level) = &self.log_level {
            return match level.to_ascii_lowercase().as_str() {
                "error" => LevelFilter::Error,
                "warn" => LevelFilter::Warn,
                "info" => LevelFilter::Info,
                "debug" => LevelFilter::Debug,
                "trace" => LevelFilter::Trace,
                "off" => LevelFilter::Off,
                _ => LevelFilter::Info,
            };
        }

        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
